mod common;

use common::fixtures::*;
use common::{TestResult, render_report, render_with_pipeline};
use reflow::types::Diagnostic;
use reflow::{HtmlEmitter, InMemoryResourceProvider, PipelineBuilder};
use serde_json::json;
use std::sync::Arc;

#[test]
fn header_band_carries_the_patient_and_report_identity() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let data = report_with_tests(vec![test_section(
        "HAEMATOLOGY",
        "CBC",
        vec![ranged_field("Haemoglobin", "13.2", "g/dL", "13.0 - 17.0")],
    )]);

    let report = render_report(&data)?;
    let header = &report.pages[0].header;
    assert_eq!(header.patient_name, "Anita Desai");
    assert_eq!(header.age_gender, "34 Y / Female");
    assert_eq!(header.referred_by, "Dr. Mehta");
    assert_eq!(header.patient_id, "B-1042");
    assert_eq!(header.report_id, "R-2093");
    assert_eq!(header.report_date, "12-Jan-2026 09:41");
    assert_eq!(header.registration_date, "11-Jan-2026");
    Ok(())
}

#[test]
fn footer_band_joins_qualifications_with_commas() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let report = render_report(&report_with_tests(vec![]))?;
    let footer = &report.pages[0].footer;
    assert_eq!(footer.cells.len(), 1);
    assert_eq!(footer.cells[0].doctor_name, "Dr. A. Sharma");
    assert_eq!(footer.cells[0].qualifications, "MBBS, MD (Pathology)");
    assert_eq!(footer.cells[0].registration_number, "MCI-4521");
    Ok(())
}

#[test]
fn unreachable_signature_degrades_but_the_render_succeeds() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut data = report_with_tests(vec![test_section(
        "HAEMATOLOGY",
        "CBC",
        vec![ranged_field("Haemoglobin", "13.2", "g/dL", "13.0 - 17.0")],
    )]);
    data["doctors"] = json!([doctor("Dr. A. Sharma", true, "sigs/unreachable.png")]);

    let report = render_report(&data)?;

    // The footer cell is still rendered, with no image slot.
    let cell = &report.pages[0].footer.cells[0];
    assert_eq!(cell.doctor_name, "Dr. A. Sharma");
    assert!(cell.signature.is_absent());

    assert!(report.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::AssetUnavailable { slot, .. } if slot == "signature for Dr. A. Sharma"
    )));

    // The emitted page still shows the doctor, without a data URI.
    let html = HtmlEmitter::new("report").emit_to_string(&report);
    assert!(html.contains("Dr. A. Sharma"));
    assert!(!html.contains("data:image/png"));
    Ok(())
}

#[test]
fn resolved_signature_is_embedded_as_a_data_uri() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let provider = InMemoryResourceProvider::new();
    provider.add("sigs/a-sharma.png", vec![1, 2, 3])?;

    let pipeline = PipelineBuilder::new()
        .with_provider(Arc::new(provider))
        .build();

    let mut data = report_with_tests(vec![]);
    data["doctors"] = json!([doctor("Dr. A. Sharma", true, "sigs/a-sharma.png")]);

    let report = render_with_pipeline(&pipeline, &data)?;
    assert!(report.diagnostics.is_empty());

    let cell = &report.pages[0].footer.cells[0];
    let asset = cell.signature.as_resolved().expect("signature resolved");
    assert_eq!(asset.mime_type, "image/png");

    let html = HtmlEmitter::new("report").emit_to_string(&report);
    assert!(html.contains("data:image/png;base64,AQID"));
    Ok(())
}

#[test]
fn non_signing_doctors_never_reach_the_footer() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut data = report_with_tests(vec![]);
    data["doctors"] = json!([
        doctor("Dr. A. Sharma", true, ""),
        doctor("Dr. B. Rao", false, "sigs/b-rao.png"),
        doctor("Dr. C. Iyer", true, ""),
    ]);

    let report = render_report(&data)?;
    let names: Vec<&str> = report.pages[0]
        .footer
        .cells
        .iter()
        .map(|c| c.doctor_name.as_str())
        .collect();
    assert_eq!(names, vec!["Dr. A. Sharma", "Dr. C. Iyer"]);
    Ok(())
}

#[test]
fn background_reference_repeats_on_every_emitted_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let provider = InMemoryResourceProvider::new();
    provider.add("letterhead.png", vec![9, 9, 9])?;
    let pipeline = PipelineBuilder::new()
        .with_provider(Arc::new(provider))
        .build();

    // Enough sections to spill onto a second page.
    let tests = (0..30)
        .map(|i| {
            test_section(
                "HAEMATOLOGY",
                &format!("Panel {i}"),
                vec![ranged_field("Value", "1", "u", "0 - 2")],
            )
        })
        .collect();
    let mut data = report_with_tests(tests);
    data["reportSettings"] = json!({ "hasBackground": true, "backgroundUrl": "letterhead.png" });

    let report = render_with_pipeline(&pipeline, &data)?;
    assert!(report.page_count() > 1);
    assert!(report.background.as_resolved().is_some());

    let html = HtmlEmitter::new("report").emit_to_string(&report);
    assert_eq!(
        html.matches("background-image: url('data:image/png").count(),
        report.page_count()
    );
    Ok(())
}

#[test]
fn ending_line_renders_with_line_breaks() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut data = report_with_tests(vec![test_section(
        "MICROBIOLOGY",
        "Culture",
        vec![field("Specimen", "Urine")],
    )]);
    data["reportSettings"] = json!({
        "endingLine": "This report is electronically verified.\nNot valid for medico-legal purposes.",
        "endingLineFontSize": 9.0,
    });

    let report = render_report(&data)?;
    let html = HtmlEmitter::new("report").emit_to_string(&report);
    assert!(html.contains(
        "This report is electronically verified.<br>Not valid for medico-legal purposes."
    ));
    assert!(html.contains("font-size: 9pt"));
    Ok(())
}

#[test]
fn render_to_file_writes_the_artifact() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.html");
    let data = report_with_tests(vec![test_section(
        "HAEMATOLOGY",
        "CBC",
        vec![ranged_field("Haemoglobin", "13.2", "g/dL", "13.0 - 17.0")],
    )]);

    let diagnostics = PipelineBuilder::new().build().render_to_file(&data, &path)?;

    assert!(diagnostics.is_empty());
    let html = std::fs::read_to_string(&path)?;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Anita Desai"));
    Ok(())
}

#[test]
fn render_to_writer_emits_html_and_returns_diagnostics() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut data = report_with_tests(vec![test_section(
        "HAEMATOLOGY",
        "CBC",
        vec![ranged_field("Haemoglobin", "13.2", "g/dL", "13.0 - 17.0")],
    )]);
    data["doctors"] = json!([doctor("Dr. A. Sharma", true, "sigs/unreachable.png")]);

    let pipeline = PipelineBuilder::new().build();
    let mut buffer = Vec::new();
    let diagnostics = tokio::runtime::Runtime::new()?
        .block_on(pipeline.render_to_writer(&data, &mut buffer))?;

    let html = String::from_utf8(buffer)?;
    assert!(html.contains("<title>Lab Report R-2093</title>"));
    assert!(html.contains("Anita Desai"));
    assert!(html.contains("Haemoglobin"));
    assert_eq!(diagnostics.len(), 1);
    Ok(())
}
