//! JSON builders for report-data fixtures.

use serde_json::{Value, json};

pub fn field(name: &str, value: &str) -> Value {
    json!({ "type": "field", "name": name, "value": value })
}

pub fn ranged_field(name: &str, value: &str, unit: &str, range: &str) -> Value {
    json!({
        "type": "field",
        "name": name,
        "value": value,
        "unit": unit,
        "referenceRange": range,
    })
}

pub fn abnormal_field(name: &str, value: &str, unit: &str, range: &str, kind: &str) -> Value {
    json!({
        "type": "field",
        "name": name,
        "value": value,
        "unit": unit,
        "referenceRange": range,
        "isAbnormal": true,
        "abnormalType": kind,
    })
}

pub fn group(name: &str, sub_fields: Vec<Value>) -> Value {
    json!({ "type": "group", "name": name, "sub_fields": sub_fields })
}

pub fn test_section(category: &str, test_name: &str, fields: Vec<Value>) -> Value {
    json!({ "category": category, "testName": test_name, "fields": fields })
}

pub fn doctor(name: &str, has_signature: bool, signature_url: &str) -> Value {
    json!({
        "name": name,
        "qualification": "MBBS\nMD (Pathology)",
        "registrationNumber": "MCI-4521",
        "hasSignature": has_signature,
        "signatureUrl": signature_url,
    })
}

/// A full report envelope around the given tests.
pub fn report_with_tests(tests: Vec<Value>) -> Value {
    json!({
        "patient": {
            "fullName": "Anita Desai",
            "ageDisplay": "34 Y",
            "genderDisplay": "Female",
            "referringDoctor": "Dr. Mehta",
        },
        "report": { "billNumber": "B-1042", "reportNumber": "R-2093" },
        "dates": {
            "reportDate": "12-Jan-2026",
            "reportTime": "09:41",
            "collectionDate": "11-Jan-2026",
        },
        "doctors": [doctor("Dr. A. Sharma", true, "")],
        "tests": tests,
        "reportSettings": {},
    })
}

/// A rich-text result table the way a WYSIWYG editor emits it: inline
/// background on the first row, bold data cells.
pub fn editor_table_markup() -> &'static str {
    concat!(
        r#"<table style="border-collapse: collapse; width: 100%;"><tbody>"#,
        r#"<tr style="background-color: #cdc1c1; height: 10px;">"#,
        r#"<td style="font-weight: bold;">Dilution</td>"#,
        r#"<td style="font-weight: bold;">TO</td>"#,
        r#"<td style="font-weight: bold;">TH</td></tr>"#,
        r#"<tr style="height: 10px;"><td>1:80</td><td>Positive</td><td>Negative</td></tr>"#,
        r#"</tbody></table>"#
    )
}
