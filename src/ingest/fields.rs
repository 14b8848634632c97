//! Alias-driven field resolution
//!
//! Vendor exports have no fixed schema in practice: the same logical
//! field appears under different column names across vendors and file
//! revisions. Instead of per-field `if column in row` chains, each parser
//! declares an ordered alias list per canonical field and resolves it
//! through one generic lookup — adding a vendor alias is a data change.

use std::collections::HashMap;

/// Ordered alias list for one canonical field; first match wins
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    /// Canonical field name, used in log messages
    pub canonical: &'static str,
    /// Acceptable source column/key names, in priority order
    pub aliases: &'static [&'static str],
}

impl FieldAliases {
    /// Resolves this field from a row, returning the first alias whose
    /// value is present and non-empty
    pub fn resolve<'a>(&self, row: &'a HashMap<String, String>) -> Option<&'a str> {
        self.aliases
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }
}

/// Splits one CSV line into fields, honoring double-quoted values
///
/// Handles embedded commas inside quotes and doubled quotes (`""`) as an
/// escaped quote. This covers the vendor exports seen in practice; it is
/// not a general CSV dialect reader.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Zips a header row and a data row into a column map
///
/// A row shorter than the header simply yields fewer entries; missing
/// columns are treated as absent fields downstream.
pub fn row_to_map(headers: &[String], values: &[String]) -> HashMap<String, String> {
    headers
        .iter()
        .zip(values.iter())
        .map(|(h, v)| (h.clone(), v.clone()))
        .collect()
}
