//! Content tree normalization.
//!
//! Turns the raw report JSON into a [`ReportDocument`]: the structured
//! envelope (patient, report, dates, doctors, settings) deserializes
//! with serde, while the recursively nested `tests[].fields[]` tree is
//! walked by hand so a malformed node can be reported with its exact
//! path. The transform is pure; asset references become unresolved
//! slots for the inliner to join later.

use crate::error::NormalizeError;
use reflow_types::{
    AbnormalFlag, AssetSlot, Doctor, Field, FieldNode, Patient, ReportDates, ReportDocument,
    ReportInfo, ReportSettings, Section,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawReportInfo {
    bill_number: String,
    report_number: String,
    barcode: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawDoctor {
    name: String,
    qualification: String,
    registration_number: String,
    has_signature: bool,
    signature_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSettings {
    header_height: Option<f32>,
    footer_height: Option<f32>,
    ending_line: String,
    ending_line_font_size: Option<f32>,
    has_background: bool,
    background_url: String,
    /// Pre-resolved `data:` URI; wins over the URL when present.
    background_base64: String,
}

/// Normalizes a raw report document.
///
/// # Errors
///
/// `MalformedInput` when a tree node carries a `type` tag other than
/// `"field"` or `"group"`, or a group node lacks a `sub_fields`
/// sequence. Missing scalars are not errors; they default to empty.
pub fn normalize(data: &Value) -> Result<ReportDocument, NormalizeError> {
    if !data.is_object() {
        return Err(NormalizeError::malformed(
            "$",
            "report input is not a JSON object",
        ));
    }

    let patient: Patient = envelope_part(data, "patient")?;
    let raw_report: RawReportInfo = envelope_part(data, "report")?;
    let dates: ReportDates = envelope_part(data, "dates")?;
    let raw_doctors: Vec<RawDoctor> = envelope_part(data, "doctors")?;
    let raw_settings: RawSettings = envelope_part(data, "reportSettings")?;

    let report = ReportInfo {
        bill_number: raw_report.bill_number,
        report_number: raw_report.report_number,
        barcode: AssetSlot::from_reference(raw_report.barcode),
    };

    let doctors: Vec<Doctor> = raw_doctors.into_iter().map(normalize_doctor).collect();

    let settings = ReportSettings {
        header_height_mm: raw_settings.header_height,
        footer_height_mm: raw_settings.footer_height,
        ending_line: raw_settings.ending_line,
        ending_line_font_size: raw_settings.ending_line_font_size,
        background: if !raw_settings.has_background {
            AssetSlot::Absent
        } else if !raw_settings.background_base64.trim().is_empty() {
            AssetSlot::from_reference(raw_settings.background_base64)
        } else {
            AssetSlot::from_reference(raw_settings.background_url)
        },
    };

    let sections = normalize_sections(data.get("tests"))?;
    log::debug!(
        "normalized report {} with {} sections and {} doctors",
        report.report_number,
        sections.len(),
        doctors.len()
    );

    Ok(ReportDocument {
        patient,
        report,
        dates,
        doctors,
        sections,
        settings,
    })
}

fn envelope_part<T: Default + for<'de> Deserialize<'de>>(
    data: &Value,
    key: &str,
) -> Result<T, NormalizeError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => Ok(serde_json::from_value(v.clone())?),
    }
}

fn normalize_doctor(raw: RawDoctor) -> Doctor {
    let signature = if raw.has_signature {
        AssetSlot::from_reference(raw.signature_url)
    } else {
        AssetSlot::Absent
    };
    Doctor {
        name: raw.name,
        qualification: raw.qualification,
        registration_number: raw.registration_number,
        has_signature: raw.has_signature,
        signature,
    }
}

fn normalize_sections(tests: Option<&Value>) -> Result<Vec<Section>, NormalizeError> {
    let tests = match tests {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(NormalizeError::malformed("tests", "expected a sequence"));
        }
    };

    let mut sections = Vec::with_capacity(tests.len());
    for (index, test) in tests.iter().enumerate() {
        let path = format!("tests[{index}]");
        let fields = match test.get("fields") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => normalize_fields(value, &format!("{path}.fields"))?,
        };
        sections.push(Section {
            category: scalar_string(test.get("category")),
            title: scalar_string(test.get("testName")),
            fields,
        });
    }
    Ok(sections)
}

fn normalize_fields(value: &Value, path: &str) -> Result<Vec<FieldNode>, NormalizeError> {
    let items = value
        .as_array()
        .ok_or_else(|| NormalizeError::malformed(path, "expected a sequence of field nodes"))?;

    let mut nodes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let node_path = format!("{path}[{index}]");
        match item.get("type").and_then(Value::as_str) {
            Some("field") => {
                if let Some(field) = normalize_leaf(item) {
                    nodes.push(FieldNode::Field(field));
                }
            }
            Some("group") => {
                let children = match item.get("sub_fields") {
                    Some(children @ Value::Array(_)) => {
                        normalize_fields(children, &format!("{node_path}.sub_fields"))?
                    }
                    _ => {
                        return Err(NormalizeError::malformed(
                            format!("{node_path}.sub_fields"),
                            "group node without a sub_fields sequence",
                        ));
                    }
                };
                nodes.push(FieldNode::Group {
                    name: scalar_string(item.get("name")),
                    children,
                });
            }
            Some(other) => {
                return Err(NormalizeError::malformed(
                    node_path,
                    format!("type tag '{other}' is neither \"field\" nor \"group\""),
                ));
            }
            None => {
                return Err(NormalizeError::malformed(
                    node_path,
                    "node has no string type tag",
                ));
            }
        }
    }
    Ok(nodes)
}

/// Builds a leaf field, or `None` when the field carries no value and
/// therefore contributes nothing to layout.
fn normalize_leaf(item: &Value) -> Option<Field> {
    let value = scalar_string(item.get("value"));
    if value.is_empty() {
        return None;
    }
    Some(Field {
        name: scalar_string(item.get("name")),
        value,
        display_value: opt_scalar(item.get("displayValue")),
        unit: opt_scalar(item.get("unit")),
        reference_range: opt_scalar(item.get("referenceRange")),
        abnormal: abnormal_flag(item),
    })
}

fn abnormal_flag(item: &Value) -> AbnormalFlag {
    if !item
        .get("isAbnormal")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return AbnormalFlag::None;
    }
    match item.get("abnormalType").and_then(Value::as_str) {
        Some("high") => AbnormalFlag::High,
        Some("low") => AbnormalFlag::Low,
        _ => AbnormalFlag::None,
    }
}

/// Lenient scalar extraction: strings pass through, numbers and bools
/// stringify, anything else becomes the empty string.
fn scalar_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn opt_scalar(value: Option<&Value>) -> Option<String> {
    let s = scalar_string(value);
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_nested_groups_preserving_order_and_depth() {
        let data = json!({
            "tests": [{
                "category": "SEROLOGY",
                "testName": "Widal Test",
                "fields": [
                    { "type": "field", "name": "Method", "value": "Tube" },
                    { "type": "group", "name": "Titres", "sub_fields": [
                        { "type": "field", "name": "TO", "value": "1:80" },
                        { "type": "group", "name": "Paratyphi", "sub_fields": [
                            { "type": "field", "name": "AH", "value": "1:40" }
                        ]}
                    ]}
                ]
            }]
        });

        let doc = normalize(&data).unwrap();
        assert_eq!(doc.sections.len(), 1);
        let section = &doc.sections[0];
        assert_eq!(section.title, "Widal Test");
        assert_eq!(section.fields.len(), 2);
        assert_eq!(section.fields[0].name(), "Method");
        assert_eq!(section.fields[1].name(), "Titres");
        assert_eq!(section.fields[1].depth(), 3);
        match &section.fields[1] {
            FieldNode::Group { children, .. } => {
                assert_eq!(children[0].name(), "TO");
                assert_eq!(children[1].name(), "Paratyphi");
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn drops_fields_without_a_value() {
        let data = json!({
            "tests": [{
                "fields": [
                    { "type": "field", "name": "Empty", "value": "" },
                    { "type": "field", "name": "Missing" },
                    { "type": "field", "name": "Kept", "value": "12" }
                ]
            }]
        });

        let doc = normalize(&data).unwrap();
        assert_eq!(doc.sections[0].fields.len(), 1);
        assert_eq!(doc.sections[0].fields[0].name(), "Kept");
    }

    #[test]
    fn stringifies_numeric_values() {
        let data = json!({
            "tests": [{ "fields": [{ "type": "field", "name": "WBC", "value": 11000 }] }]
        });
        let doc = normalize(&data).unwrap();
        match &doc.sections[0].fields[0] {
            FieldNode::Field(f) => assert_eq!(f.value, "11000"),
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_type_tag_with_path() {
        let data = json!({
            "tests": [{ "fields": [{ "type": "widget", "name": "X", "value": "1" }] }]
        });
        let err = normalize(&data).unwrap_err();
        match err {
            NormalizeError::MalformedInput { path, message } => {
                assert_eq!(path, "tests[0].fields[0]");
                assert!(message.contains("widget"));
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn rejects_group_without_sub_fields() {
        let data = json!({
            "tests": [{ "fields": [
                { "type": "field", "name": "ok", "value": "1" },
                { "type": "group", "name": "broken", "sub_fields": "nope" }
            ]}]
        });
        let err = normalize(&data).unwrap_err();
        match err {
            NormalizeError::MalformedInput { path, .. } => {
                assert_eq!(path, "tests[1].fields[1].sub_fields");
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn abnormal_flags_require_both_markers() {
        let data = json!({
            "tests": [{ "fields": [
                { "type": "field", "name": "High", "value": "1", "isAbnormal": true, "abnormalType": "high" },
                { "type": "field", "name": "Low", "value": "2", "isAbnormal": true, "abnormalType": "low" },
                { "type": "field", "name": "Unflagged", "value": "3", "abnormalType": "high" }
            ]}]
        });
        let doc = normalize(&data).unwrap();
        let flags: Vec<AbnormalFlag> = doc.sections[0]
            .fields
            .iter()
            .map(|n| match n {
                FieldNode::Field(f) => f.abnormal,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            flags,
            vec![AbnormalFlag::High, AbnormalFlag::Low, AbnormalFlag::None]
        );
    }

    #[test]
    fn doctor_signature_slots_follow_has_signature() {
        let data = json!({
            "doctors": [
                { "name": "Dr. A", "hasSignature": true, "signatureUrl": "sigs/a.png" },
                { "name": "Dr. B", "hasSignature": false, "signatureUrl": "sigs/b.png" },
                { "name": "Dr. C", "hasSignature": true }
            ]
        });
        let doc = normalize(&data).unwrap();
        assert_eq!(doc.doctors[0].signature.reference(), Some("sigs/a.png"));
        assert!(doc.doctors[1].signature.is_absent());
        assert!(doc.doctors[2].signature.is_absent());
    }

    #[test]
    fn background_slot_requires_has_background() {
        let data = json!({
            "reportSettings": { "backgroundUrl": "letterhead.png", "hasBackground": false }
        });
        assert!(normalize(&data).unwrap().settings.background.is_absent());

        let data = json!({
            "reportSettings": { "backgroundUrl": "letterhead.png", "hasBackground": true }
        });
        assert_eq!(
            normalize(&data).unwrap().settings.background.reference(),
            Some("letterhead.png")
        );
    }

    #[test]
    fn pre_resolved_background_wins_over_the_url() {
        let data = json!({
            "reportSettings": {
                "hasBackground": true,
                "backgroundUrl": "letterhead.png",
                "backgroundBase64": "data:image/png;base64,AQID",
            }
        });
        assert_eq!(
            normalize(&data).unwrap().settings.background.reference(),
            Some("data:image/png;base64,AQID")
        );
    }

    #[test]
    fn missing_envelope_parts_default_to_empty() {
        let doc = normalize(&json!({})).unwrap();
        assert_eq!(doc.patient, Patient::default());
        assert!(doc.sections.is_empty());
        assert!(doc.doctors.is_empty());
        assert_eq!(doc.settings.header_height_mm, None);
    }

    #[test]
    fn non_object_input_is_malformed() {
        let err = normalize(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedInput { .. }));
    }
}
