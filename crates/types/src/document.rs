//! The normalized report document.
//!
//! A [`ReportDocument`] is created once per render request by the
//! normalizer, has its asset slots joined by the inliner, and is then
//! treated as immutable by the classifier, band compositor, and
//! pagination engine.

use crate::asset::AssetSlot;
use crate::tree::Section;
use serde::{Deserialize, Serialize};

/// Patient identity as displayed in the header band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    pub full_name: String,
    /// Pre-formatted age, e.g. `"34 Y"`.
    pub age_display: String,
    pub gender_display: String,
    pub referring_doctor: String,
}

/// Report identifiers. The barcode reference becomes an asset slot at
/// normalization time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportInfo {
    /// Shown as the patient ID in the header band.
    pub bill_number: String,
    pub report_number: String,
    pub barcode: AssetSlot,
}

/// Report dates arrive pre-formatted as display strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportDates {
    pub report_date: String,
    pub report_time: String,
    pub collection_date: String,
}

/// One signing (or non-signing) doctor. Only doctors with
/// `has_signature` set are rendered in the footer band, in list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doctor {
    pub name: String,
    /// Newline-joined qualifications as they arrive from the input.
    pub qualification: String,
    pub registration_number: String,
    pub has_signature: bool,
    pub signature: AssetSlot,
}

/// Layout settings for one render. Band heights are in millimeters;
/// unset heights fall back to the compositor defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSettings {
    pub header_height_mm: Option<f32>,
    pub footer_height_mm: Option<f32>,
    /// Trailing note that flows after the last section.
    pub ending_line: String,
    pub ending_line_font_size: Option<f32>,
    pub background: AssetSlot,
}

/// Top-level aggregate handed through the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDocument {
    pub patient: Patient,
    pub report: ReportInfo,
    pub dates: ReportDates,
    pub doctors: Vec<Doctor>,
    pub sections: Vec<Section>,
    pub settings: ReportSettings,
}

impl ReportDocument {
    /// Doctors that contribute a footer signature cell, in list order.
    pub fn signing_doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter().filter(|d| d.has_signature)
    }
}
