//! Vendor transparency tests
//!
//! The system's core guarantee: the same measurement arriving via HL7,
//! CSV, or JSON produces the same canonical record (modulo lab name and
//! timestamp source differences) and structurally identical output
//! resources.

use relaydx::core::pipeline::Pipeline;
use relaydx::domain::raw::SourceFormat;
use relaydx::domain::RelayError;

const HL7_INPUT: &str = "\
MSH|^~\\&|LAB|QUEST|||20250806120000||ORU^R01|M1|P|2.5.1
PID|1||MRN12345
OBR|1|||98979-8^eGFR|||2025-08-06T10:30:00Z
OBX|1|NM|98979-8^eGFR (CKD-EPI)||72|mL/min/1.73m2
";

const CSV_INPUT: &str = "\
MRN,TEST_CODE,NUMERIC_RESULT,RESULT_UNITS,COLLECTION_DATETIME
MRN12345,98979-8,72,mL/min/1.73 m²,2025-08-06T10:30:00Z
";

const JSON_INPUT: &str = r#"{
    "patientIdentification": {"lastName": "MRN12345"},
    "timeStamp": "2025-08-06T10:30:00Z",
    "laboratory": "LGC",
    "labResults": [
        {
            "biomarkerName": "eGFR (CKD-EPI)",
            "coding": [{"system": "http://loinc.org", "code": "98979-8"}],
            "quantitativeValue": {"value": 72, "unit": "ml/min/1.73m2"}
        }
    ]
}"#;

#[test]
fn same_measurement_is_canonically_identical_across_formats() {
    let pipeline = Pipeline::with_defaults();

    let from_hl7 = &pipeline.run(HL7_INPUT, SourceFormat::Hl7).unwrap().results[0];
    let from_csv = &pipeline.run(CSV_INPUT, SourceFormat::Csv).unwrap().results[0];
    let from_json = &pipeline.run(JSON_INPUT, SourceFormat::Json).unwrap().results[0];

    for result in [from_hl7, from_csv, from_json] {
        assert_eq!(result.test_code, "98979-8");
        assert_eq!(result.result_value, 72.0);
        // the three vendor unit spellings collapse to one canonical one
        assert_eq!(result.unit, "mL/min/1.73m2");
        assert_eq!(result.status, "final");
        assert_eq!(result.clinical_stage(), from_hl7.clinical_stage());
        assert_eq!(result.risk_level(), from_hl7.risk_level());
    }
}

#[test]
fn output_resources_are_structurally_identical_across_formats() {
    let pipeline = Pipeline::with_defaults();

    let inputs = [
        (HL7_INPUT, SourceFormat::Hl7),
        (CSV_INPUT, SourceFormat::Csv),
        (JSON_INPUT, SourceFormat::Json),
    ];

    for (input, format) in inputs {
        let batch = pipeline.run(input, format).unwrap();
        let pair = &batch.resources[0];

        assert_eq!(pair.observation.resource_type, "Observation");
        assert_eq!(pair.report.resource_type, "DiagnosticReport");
        assert_eq!(pair.observation.code.coding[0].code, "98979-8");
        assert_eq!(pair.observation.code.coding[0].system, "http://loinc.org");
        assert_eq!(pair.observation.value_quantity.value, 72.0);
        assert_eq!(pair.observation.value_quantity.unit, "mL/min/1.73m2");
        assert_eq!(pair.observation.category[0].coding[0].code, "laboratory");
        assert_eq!(
            pair.report.result[0].reference,
            format!("Observation/{}", pair.observation.id)
        );
    }
}

#[test]
fn out_of_range_value_is_rejected_regardless_of_format() {
    let pipeline = Pipeline::with_defaults();

    let hl7 = "\
MSH|^~\\&|LAB|QUEST|||20250806||ORU^R01|M1|P|2.5.1
PID|1||MRN1
OBX|1|NM|98979-8^eGFR||512|mL/min/1.73m2
";
    let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nMRN1,512,mL/min/1.73m2\n";
    let json = r#"{
        "patientIdentification": {"lastName": "One"},
        "labResults": [
            {"testCode": "EGFR001", "quantitativeValue": {"value": 512, "unit": "mL/min/1.73m2"}}
        ]
    }"#;

    for (input, format) in [
        (hl7, SourceFormat::Hl7),
        (csv, SourceFormat::Csv),
        (json, SourceFormat::Json),
    ] {
        let err = pipeline.run(input, format).unwrap_err();
        match err {
            RelayError::NoValidResults { errors, .. } => {
                assert!(
                    errors[0].contains("outside expected range"),
                    "unexpected error for {format}: {}",
                    errors[0]
                );
            }
            other => panic!("expected NoValidResults for {format}, got: {other}"),
        }
    }
}

#[test]
fn alias_columns_normalize_to_the_same_record() {
    let pipeline = Pipeline::with_defaults();

    // three revisions of the same vendor export, different column names
    let revisions = [
        "Patient_ID,Test_LOINC_Code,Result,Units\nP9,98979-8,58,mL/min/1.73m2\n",
        "MRN,TEST_CODE,NUMERIC_RESULT,RESULT_UNITS\nP9,98979-8,58,mL/min/1.73m2\n",
        "PATIENT_ID,Test_Code,Result_Value,Unit\nP9,98979-8,58,mL/min/1.73m2\n",
    ];

    let baseline = &pipeline
        .run(revisions[0], SourceFormat::Csv)
        .unwrap()
        .results[0];

    for revision in &revisions[1..] {
        let result = &pipeline.run(revision, SourceFormat::Csv).unwrap().results[0];
        assert_eq!(result, baseline);
    }
}
