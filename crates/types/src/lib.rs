pub mod asset;
pub mod band;
pub mod blocks;
pub mod diag;
pub mod document;
pub mod tree;

pub use asset::{AssetSlot, InlineAsset, SharedAssetData};
pub use band::{FooterBand, HeaderBand, SignatureCell};
pub use blocks::{ContentBlock, PlainEntry, RenderMode, SectionBlock, SectionRun, TableRow};
pub use diag::Diagnostic;
pub use document::{Doctor, Patient, ReportDates, ReportDocument, ReportInfo, ReportSettings};
pub use tree::{AbnormalFlag, Field, FieldNode, Section};
