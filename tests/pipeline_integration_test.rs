//! Integration tests for the full batch pipeline
//!
//! Exercises the orchestrated parse → normalize → validate → enrich →
//! build flow end to end for all three input formats.

use relaydx::config::AnalyteProfile;
use relaydx::core::enrich::ClinicalStage;
use relaydx::core::pipeline::Pipeline;
use relaydx::domain::raw::SourceFormat;
use relaydx::domain::RelayError;

#[test]
fn hl7_message_with_three_observations_yields_three_pairs() {
    let input = "\
MSH|^~\\&|LAB|QUEST|EHR|CLINIC|20250806120000||ORU^R01|MSG001|P|2.5.1
PID|1||MRN12345^^^QUEST^MR||DOE^JANE||19800412|F
OBR|1|ORD001||98979-8^eGFR|||2025-08-06T10:30:00Z
OBX|1|NM|98979-8^eGFR (CKD-EPI)||95|mL/min/1.73m2
OBX|2|NM|98979-8^eGFR (CKD-EPI)||55|mL/min/1.73m2
OBX|3|NM|98979-8^eGFR (CKD-EPI)||38|mL/min/1.73m2
";
    let pipeline = Pipeline::with_defaults();

    let raw = pipeline.parse(input, SourceFormat::Hl7).unwrap();
    assert_eq!(raw.len(), 3);
    for record in &raw {
        assert_eq!(record.patient_id.as_deref(), Some("MRN12345"));
        assert_eq!(record.timestamp.as_deref(), Some("2025-08-06T10:30:00Z"));
    }

    let batch = pipeline.run(input, SourceFormat::Hl7).unwrap();
    assert_eq!(batch.raw_count, 3);
    assert_eq!(batch.validated_count, 3);
    assert_eq!(batch.resources.len(), 3);

    // every record shares the collection timestamp from OBR-7
    for result in &batch.results {
        assert_eq!(result.timestamp, "2025-08-06T10:30:00Z");
        assert_eq!(result.patient_id, "MRN12345");
    }
}

#[test]
fn two_of_five_failing_records_leave_three_pairs_and_two_errors() {
    // rows B and D are invalid: out-of-range value, foreign unit
    let csv = "\
MRN,NUMERIC_RESULT,RESULT_UNITS
A,95,mL/min/1.73m2
B,250,mL/min/1.73m2
C,72,ml/min/1.73m2
D,50,mg/dL
E,30,mL/min/1.73 m²
";
    let batch = Pipeline::with_defaults()
        .run(csv, SourceFormat::Csv)
        .unwrap();

    assert_eq!(batch.raw_count, 5);
    assert_eq!(batch.validated_count, 3);
    assert_eq!(batch.errors.len(), 2);
    assert_eq!(batch.resources.len(), 3);

    // rejected records name their violation
    assert!(batch.errors[0].contains("outside expected range"));
    assert!(batch.errors[1].contains("invalid"));
}

#[test]
fn every_report_references_its_own_observation() {
    let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nA,95,mL/min/1.73m2\nB,45,mL/min/1.73m2\n";
    let batch = Pipeline::with_defaults()
        .run(csv, SourceFormat::Csv)
        .unwrap();

    for pair in &batch.resources {
        assert_eq!(
            pair.report.result[0].reference,
            format!("Observation/{}", pair.observation.id)
        );
    }
    // identifiers are fresh per pair
    assert_ne!(
        batch.resources[0].observation.id,
        batch.resources[1].observation.id
    );
}

#[test]
fn json_vendor_payload_end_to_end() {
    let payload = r#"{
        "patientIdentification": {"lastName": "Doe", "firstName": "Jane"},
        "timeStamp": "2025-08-06T10:30:00Z",
        "testResults": [
            {
                "testCode": "EGFR001",
                "quantitativeValue": {"value": 72, "unit": "mL/min/1.73m2"}
            }
        ]
    }"#;

    let batch = Pipeline::with_defaults()
        .run(payload, SourceFormat::Json)
        .unwrap();

    assert_eq!(batch.validated_count, 1);
    let result = &batch.results[0];
    assert!(result.patient_id.starts_with("Doe^Jane"));
    assert_eq!(result.result_value, 72.0);
    assert_eq!(result.unit, "mL/min/1.73m2");
    assert_eq!(result.test_code, "98979-8");
    assert_eq!(result.clinical_stage(), ClinicalStage::G2);
    assert_eq!(
        result.clinical_stage().to_string(),
        "G2 - Mildly decreased"
    );
    // follow-up flag holds iff the value is below 60
    assert!(!result.needs_attention());
}

#[test]
fn all_records_failing_validation_is_a_distinct_batch_failure() {
    let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nA,250,mL/min/1.73m2\nB,300,mL/min/1.73m2\n";
    let err = Pipeline::with_defaults()
        .run(csv, SourceFormat::Csv)
        .unwrap_err();

    match err {
        RelayError::NoValidResults { failed, errors } => {
            assert_eq!(failed, 2);
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected NoValidResults, got: {other}"),
    }
}

#[test]
fn parse_failures_abort_before_validation() {
    let pipeline = Pipeline::with_defaults();

    let err = pipeline.run("{oops", SourceFormat::Json).unwrap_err();
    assert!(matches!(err, RelayError::Parse(_)));

    let err = pipeline
        .run("no hl7 here at all", SourceFormat::Hl7)
        .unwrap_err();
    assert!(matches!(err, RelayError::Parse(_)));
}

#[test]
fn csv_non_numeric_value_defaults_to_zero_and_passes_the_egfr_floor() {
    // The eGFR floor is 0 inclusive, so a defaulted 0.0 survives the
    // range rule; the row is kept either way.
    let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nA,PENDING,mL/min/1.73m2\n";
    let batch = Pipeline::with_defaults()
        .run(csv, SourceFormat::Csv)
        .unwrap();
    assert_eq!(batch.validated_count, 1);
    assert_eq!(batch.results[0].result_value, 0.0);
    assert_eq!(batch.results[0].clinical_stage(), ClinicalStage::G5);
}

#[test]
fn analyte_with_positive_floor_rejects_the_zero_default() {
    let mut profile = AnalyteProfile::default();
    profile.min_value = 1.0;
    let pipeline = Pipeline::new(profile);

    let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nA,PENDING,mL/min/1.73m2\n";
    let err = pipeline.run(csv, SourceFormat::Csv).unwrap_err();
    assert!(matches!(err, RelayError::NoValidResults { .. }));
}

#[test]
fn missing_patient_identity_is_rejected_not_fabricated() {
    let input = "\
MSH|^~\\&|LAB|QUEST|||20250806||ORU^R01|M1|P|2.5.1
OBX|1|NM|98979-8^eGFR||72|mL/min/1.73m2
";
    let err = Pipeline::with_defaults()
        .run(input, SourceFormat::Hl7)
        .unwrap_err();
    match err {
        RelayError::NoValidResults { errors, .. } => {
            assert!(errors[0].contains("patient ID"));
        }
        other => panic!("expected NoValidResults, got: {other}"),
    }
}
