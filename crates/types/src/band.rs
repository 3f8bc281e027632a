//! Header and footer band content.
//!
//! Bands are computed once per render by the band compositor and
//! repeated identically on every page; only their asset slots differ
//! between an un-inlined and an inlined document, never between pages.

use crate::asset::AssetSlot;

/// The letterhead-style header band: patient identity, report
/// identity, and an optional barcode/QR asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderBand {
    /// Reserved height in millimeters, fixed for the whole render.
    pub height_mm: f32,
    pub patient_name: String,
    /// Combined display, e.g. `"34 Y / Male"`.
    pub age_gender: String,
    pub referred_by: String,
    pub patient_id: String,
    pub report_id: String,
    /// Report date and time joined for display.
    pub report_date: String,
    pub registration_date: String,
    pub barcode: AssetSlot,
}

/// One doctor's cell in the signature footer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureCell {
    pub doctor_name: String,
    /// Comma-joined qualifications (newline-joined in the source data).
    pub qualifications: String,
    pub registration_number: String,
    pub signature: AssetSlot,
}

/// The signature footer band: one cell per signing doctor, in list
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FooterBand {
    /// Reserved height in millimeters, fixed for the whole render.
    pub height_mm: f32,
    pub cells: Vec<SignatureCell>,
}
