//! Concurrent asset inlining.
//!
//! The background, the barcode, and each signing doctor's signature
//! are independent references with no shared state, so they resolve as
//! fanned-out blocking tasks joined before the pipeline continues.
//! There are no retries and no partial-result streaming: a failed
//! fetch degrades that one slot to absent, records a diagnostic, and
//! never aborts the render. References that are already `data:` URIs
//! decode in place without touching the provider.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, warn};
use reflow_traits::ResourceProvider;
use reflow_types::{AssetSlot, Diagnostic, InlineAsset, ReportDocument};
use std::sync::Arc;

const DEFAULT_MIME: &str = "image/png";

/// Which slot of the document a resolution joins back into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotId {
    Background,
    Barcode,
    Signature(usize),
}

/// Resolves every unresolved asset slot of the document, concurrently.
/// Returns the diagnostics for slots that degraded to absent.
pub async fn resolve_report_assets(
    doc: &mut ReportDocument,
    provider: &Arc<dyn ResourceProvider>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let jobs = collect_jobs(doc);
    if jobs.is_empty() {
        return diagnostics;
    }
    debug!(
        "resolving {} asset references via {}",
        jobs.len(),
        provider.name()
    );

    let mut handles = Vec::with_capacity(jobs.len());
    for (id, label, reference) in jobs {
        if reference.starts_with("data:") {
            // Already inline; decode without a provider round-trip.
            let outcome = decode_data_uri(&reference)
                .ok_or_else(|| "invalid data URI".to_string());
            handles.push((id, label, reference, Resolution::Immediate(outcome)));
            continue;
        }
        let task_provider = Arc::clone(provider);
        let task_reference = reference.clone();
        let handle =
            tokio::task::spawn_blocking(move || task_provider.load(&task_reference));
        handles.push((id, label, reference, Resolution::Pending(handle)));
    }

    for (id, label, reference, resolution) in handles {
        let outcome = match resolution {
            Resolution::Immediate(outcome) => outcome,
            Resolution::Pending(handle) => match handle.await {
                Ok(Ok(bytes)) => Ok(InlineAsset {
                    mime_type: sniff_mime(&reference).to_string(),
                    bytes,
                }),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("resolver task failed: {e}")),
            },
        };

        match outcome {
            Ok(asset) => {
                debug!("resolved {label} ({}, {} bytes)", asset.mime_type, asset.bytes.len());
                *slot_mut(doc, id) = AssetSlot::Resolved(asset);
            }
            Err(reason) => {
                warn!("could not resolve {label} ({reference}): {reason}");
                diagnostics.push(Diagnostic::AssetUnavailable {
                    slot: label,
                    reference,
                    reason,
                });
                *slot_mut(doc, id) = AssetSlot::Absent;
            }
        }
    }

    diagnostics
}

enum Resolution {
    Immediate(Result<InlineAsset, String>),
    Pending(tokio::task::JoinHandle<Result<reflow_traits::SharedResourceData, reflow_traits::ResourceError>>),
}

fn collect_jobs(doc: &ReportDocument) -> Vec<(SlotId, String, String)> {
    let mut jobs = Vec::new();
    if let Some(reference) = doc.settings.background.reference() {
        jobs.push((SlotId::Background, "background".to_string(), reference.to_string()));
    }
    if let Some(reference) = doc.report.barcode.reference() {
        jobs.push((SlotId::Barcode, "barcode".to_string(), reference.to_string()));
    }
    for (index, doctor) in doc.doctors.iter().enumerate() {
        if let Some(reference) = doctor.signature.reference() {
            jobs.push((
                SlotId::Signature(index),
                format!("signature for {}", doctor.name),
                reference.to_string(),
            ));
        }
    }
    jobs
}

fn slot_mut(doc: &mut ReportDocument, id: SlotId) -> &mut AssetSlot {
    match id {
        SlotId::Background => &mut doc.settings.background,
        SlotId::Barcode => &mut doc.report.barcode,
        SlotId::Signature(index) => &mut doc.doctors[index].signature,
    }
}

fn decode_data_uri(reference: &str) -> Option<InlineAsset> {
    let rest = reference.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let (mime, base64_encoded) = match meta.strip_suffix(";base64") {
        Some(mime) => (mime, true),
        None => (meta, false),
    };
    let bytes = if base64_encoded {
        BASE64.decode(payload.trim()).ok()?
    } else {
        payload.as_bytes().to_vec()
    };
    let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
    Some(InlineAsset::new(mime, bytes))
}

/// MIME type from the reference's file extension, defaulting to PNG.
fn sniff_mime(reference: &str) -> &'static str {
    let path = reference
        .split(['?', '#'])
        .next()
        .unwrap_or(reference);
    let extension = path.rsplit('.').next().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => DEFAULT_MIME,
    }
}
