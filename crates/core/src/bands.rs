//! Band composition.
//!
//! Computes the header and footer band content once per document.
//! Bands are a pure function of the envelope data; they carry no
//! dependency on page count or body content, which is what makes the
//! repeating-band guarantee cheap to uphold downstream.

use reflow_types::{FooterBand, HeaderBand, ReportDocument, SignatureCell};

/// Header band height when the settings leave it unset, millimeters.
pub const DEFAULT_HEADER_HEIGHT_MM: f32 = 80.0;

/// Footer band height when the settings leave it unset, millimeters.
pub const DEFAULT_FOOTER_HEIGHT_MM: f32 = 60.0;

pub fn compose_header(doc: &ReportDocument) -> HeaderBand {
    HeaderBand {
        height_mm: doc
            .settings
            .header_height_mm
            .unwrap_or(DEFAULT_HEADER_HEIGHT_MM),
        patient_name: doc.patient.full_name.clone(),
        age_gender: format!(
            "{} / {}",
            doc.patient.age_display, doc.patient.gender_display
        ),
        referred_by: doc.patient.referring_doctor.clone(),
        patient_id: doc.report.bill_number.clone(),
        report_id: doc.report.report_number.clone(),
        report_date: join_date_time(&doc.dates.report_date, &doc.dates.report_time),
        registration_date: doc.dates.collection_date.clone(),
        barcode: doc.report.barcode.clone(),
    }
}

pub fn compose_footer(doc: &ReportDocument) -> FooterBand {
    FooterBand {
        height_mm: doc
            .settings
            .footer_height_mm
            .unwrap_or(DEFAULT_FOOTER_HEIGHT_MM),
        cells: doc
            .signing_doctors()
            .map(|doctor| SignatureCell {
                doctor_name: doctor.name.clone(),
                qualifications: join_qualifications(&doctor.qualification),
                registration_number: doctor.registration_number.clone(),
                signature: doctor.signature.clone(),
            })
            .collect(),
    }
}

fn join_date_time(date: &str, time: &str) -> String {
    format!("{date} {time}").trim().to_string()
}

/// Qualifications arrive newline-joined and render comma-joined.
fn join_qualifications(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
