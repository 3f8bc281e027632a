//! Paginated HTML emission.
//!
//! Every page becomes a fixed-size box: the body flow (spacers plus
//! content blocks) lays out inside it, and the two bands render as
//! absolutely-positioned overlays on top. Embedded markup fragments
//! are injected as-is — they were sanitized during classification —
//! while every other string is escaped here.

use crate::{DocumentEmitter, EmitError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reflow_layout::{AtomicBlock, Page, PaginatedReport};
use reflow_types::{
    AbnormalFlag, ContentBlock, FooterBand, HeaderBand, SectionBlock, SectionRun, TableRow,
};
use std::fmt::Write as _;
use std::io;

pub struct HtmlEmitter {
    document_title: String,
}

impl HtmlEmitter {
    pub fn new(document_title: impl Into<String>) -> Self {
        Self {
            document_title: document_title.into(),
        }
    }

    pub fn emit_to_string(&self, report: &PaginatedReport) -> String {
        let mut out = String::with_capacity(16 * 1024);
        self.write_document(report, &mut out);
        out
    }

    fn write_document(&self, report: &PaginatedReport, out: &mut String) {
        let (header_mm, footer_mm) = band_heights(report);
        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n",
            escape(&self.document_title),
            stylesheet(report, header_mm, footer_mm)
        );
        for page in &report.pages {
            self.write_page(report, page, out);
        }
        out.push_str("</body>\n</html>\n");
        log::debug!(
            "emitted {} pages of html ({} bytes)",
            report.page_count(),
            out.len()
        );
    }

    fn write_page(&self, report: &PaginatedReport, page: &Page, out: &mut String) {
        match report.background.as_resolved() {
            Some(asset) => {
                let _ = write!(
                    out,
                    "<div class=\"page\" style=\"background-image: url('{}');\">\n",
                    data_uri(&asset.mime_type, &asset.bytes)
                );
            }
            None => out.push_str("<div class=\"page\">\n"),
        }

        out.push_str("<div class=\"content\">\n");
        for slot in &page.body {
            match slot {
                AtomicBlock::Spacer { height_mm } => {
                    let _ = write!(
                        out,
                        "<div class=\"spacer\" style=\"height: {height_mm}mm\"></div>\n"
                    );
                }
                AtomicBlock::Content { block, .. } => write_block(block, out),
            }
        }
        out.push_str("</div>\n");

        write_header_band(&page.header, out);
        write_footer_band(&page.footer, out);
        out.push_str("</div>\n");
    }
}

impl DocumentEmitter for HtmlEmitter {
    fn emit_to(
        &self,
        report: &PaginatedReport,
        writer: &mut dyn io::Write,
    ) -> Result<(), EmitError> {
        let html = self.emit_to_string(report);
        writer.write_all(html.as_bytes())?;
        Ok(())
    }
}

fn band_heights(report: &PaginatedReport) -> (f32, f32) {
    report
        .pages
        .first()
        .map(|p| (p.header.height_mm, p.footer.height_mm))
        .unwrap_or((80.0, 60.0))
}

fn write_block(block: &ContentBlock, out: &mut String) {
    match block {
        ContentBlock::Section(section) => write_section(section, out),
        ContentBlock::ClosingNote { text, font_size } => {
            let _ = write!(
                out,
                "<div class=\"ending-line\" style=\"font-size: {font_size}pt\">{}</div>\n",
                escape(text).replace('\n', "<br>")
            );
        }
    }
}

fn write_section(section: &SectionBlock, out: &mut String) {
    out.push_str("<section class=\"test-section\">\n");
    if !section.category.is_empty() {
        let _ = write!(
            out,
            "<div class=\"department-header\">{}</div>\n",
            escape(&section.category)
        );
    }
    if !section.title.is_empty() {
        let _ = write!(
            out,
            "<div class=\"test-name\">{}</div>\n",
            escape(&section.title)
        );
    }
    for run in &section.runs {
        match run {
            SectionRun::EmbeddedMarkup { fragments } => {
                for fragment in fragments {
                    // Sanitized during classification; injected verbatim.
                    let _ = write!(out, "<div class=\"embedded-markup\">{fragment}</div>\n");
                }
            }
            SectionRun::StructuredTable { rows } => write_table(rows, out),
            SectionRun::PlainText { entries } => {
                for entry in entries {
                    out.push_str("<div class=\"plain-field\">");
                    if !entry.label.is_empty() {
                        let _ = write!(
                            out,
                            "<span class=\"plain-label\">{}:</span> ",
                            escape(&entry.label)
                        );
                    }
                    let _ = write!(out, "{}</div>\n", escape(&entry.value));
                }
            }
        }
    }
    out.push_str("</section>\n");
}

fn write_table(rows: &[TableRow], out: &mut String) {
    out.push_str(concat!(
        "<table class=\"results-table\">\n<thead><tr>",
        "<th class=\"col-name\">Test Description</th>",
        "<th class=\"col-result\">Result</th>",
        "<th class=\"col-flag\">Flag</th>",
        "<th class=\"col-range\">Ref. Range</th>",
        "<th class=\"col-unit\">Unit</th>",
        "</tr></thead>\n<tbody>\n"
    ));
    for row in rows {
        match row {
            TableRow::Field {
                label,
                value,
                reference_range,
                unit,
                abnormal,
                indent,
            } => {
                let value_class = match abnormal {
                    AbnormalFlag::High => " abnormal-high",
                    AbnormalFlag::Low => " abnormal-low",
                    AbnormalFlag::None => "",
                };
                let name_class = if abnormal.is_abnormal() {
                    " abnormal-name"
                } else {
                    ""
                };
                let _ = write!(
                    out,
                    "<tr><td class=\"col-name{name_class}\"{}>{}</td>\
                     <td class=\"col-result{value_class}\">{}</td>\
                     <td class=\"col-flag{value_class}\">{}</td>\
                     <td class=\"col-range\">{}</td>\
                     <td class=\"col-unit\">{}</td></tr>\n",
                    indent_style(*indent),
                    escape(label),
                    escape(value),
                    abnormal.marker(),
                    escape(reference_range),
                    escape(unit),
                );
            }
            TableRow::GroupLabel { label, indent } => {
                let _ = write!(
                    out,
                    "<tr><td class=\"group-label\" colspan=\"5\"{}>{}</td></tr>\n",
                    indent_style(*indent),
                    escape(label),
                );
            }
        }
    }
    out.push_str("</tbody>\n</table>\n");
}

fn write_header_band(header: &HeaderBand, out: &mut String) {
    out.push_str("<div class=\"band band-header\">\n<div class=\"header-border\">\n");

    out.push_str("<div class=\"header-column\">\n");
    write_info_row("Name", &header.patient_name, out);
    write_info_row("Age/Gender", &header.age_gender, out);
    write_info_row("Referred By", &header.referred_by, out);
    write_info_row("Patient ID", &header.patient_id, out);
    out.push_str("</div>\n");

    out.push_str("<div class=\"header-column\">\n");
    write_info_row("Report ID", &header.report_id, out);
    write_info_row("Report Date", &header.report_date, out);
    write_info_row("Reg. Date", &header.registration_date, out);
    out.push_str("</div>\n");

    out.push_str("<div class=\"header-column-small\">");
    if let Some(asset) = header.barcode.as_resolved() {
        let _ = write!(
            out,
            "<img class=\"qr-code\" src=\"{}\" alt=\"\">",
            data_uri(&asset.mime_type, &asset.bytes)
        );
    }
    out.push_str("</div>\n</div>\n</div>\n");
}

fn write_info_row(label: &str, value: &str, out: &mut String) {
    let _ = write!(
        out,
        "<div class=\"info-row\"><span class=\"info-label\">{}</span>\
         <span class=\"info-separator\">:</span>\
         <span class=\"info-value\">{}</span></div>\n",
        escape(label),
        escape(value)
    );
}

fn write_footer_band(footer: &FooterBand, out: &mut String) {
    out.push_str("<div class=\"band band-footer\">\n<div class=\"footer-row\">\n");
    for cell in &footer.cells {
        out.push_str("<div class=\"doctor-sign\">\n");
        if let Some(asset) = cell.signature.as_resolved() {
            let _ = write!(
                out,
                "<img class=\"signature-image\" src=\"{}\" alt=\"\">\n",
                data_uri(&asset.mime_type, &asset.bytes)
            );
        }
        let _ = write!(
            out,
            "<div class=\"doctor-name\">{}</div>\n",
            escape(&cell.doctor_name)
        );
        if !cell.qualifications.is_empty() {
            let _ = write!(
                out,
                "<div class=\"doctor-qualification\">{}</div>\n",
                escape(&cell.qualifications)
            );
        }
        if !cell.registration_number.is_empty() {
            let _ = write!(
                out,
                "<div class=\"doctor-qualification\">Reg: {}</div>\n",
                escape(&cell.registration_number)
            );
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</div>\n");
}

fn stylesheet(report: &PaginatedReport, header_mm: f32, footer_mm: f32) -> String {
    let g = &report.geometry;
    format!(
        r#"@page {{ size: A4; margin: 0; }}
* {{ box-sizing: border-box; }}
body {{ margin: 0; font-family: 'Roboto', 'Helvetica Neue', Arial, sans-serif; font-size: 10pt; color: #000; }}
.page {{ position: relative; width: {w}mm; height: {h}mm; overflow: hidden; page-break-after: always; background-size: {w}mm {h}mm; background-repeat: no-repeat; }}
.content {{ width: 100%; height: 100%; padding: 0 {m}mm; }}
.band {{ position: absolute; left: 0; width: 100%; }}
.band-header {{ top: 0; height: {hh}mm; padding: 0 {m}mm 8mm {m}mm; display: flex; flex-direction: column; justify-content: flex-end; }}
.header-border {{ border: 1pt solid #000; padding: 8px 12px; display: flex; }}
.header-column {{ flex: 2; }}
.header-column-small {{ flex: 1; display: flex; justify-content: flex-end; }}
.info-row {{ display: flex; margin-bottom: 2px; }}
.info-label {{ width: 85pt; }}
.info-separator {{ width: 10pt; }}
.info-value {{ flex: 1; font-weight: 600; }}
.qr-code {{ width: 50pt; height: 50pt; }}
.band-footer {{ bottom: 0; height: {fh}mm; padding: 9mm {m}mm 0 {m}mm; }}
.footer-row {{ display: flex; justify-content: space-between; align-items: flex-start; }}
.doctor-sign {{ width: 120pt; text-align: center; }}
.signature-image {{ width: 100pt; height: 60pt; object-fit: contain; }}
.doctor-name {{ font-size: 11pt; font-weight: 600; margin-top: 2px; }}
.doctor-qualification {{ font-size: 8pt; }}
.test-section {{ margin-bottom: 10px; padding-bottom: 8px; border-bottom: 1px solid #000; }}
.department-header {{ font-size: 11pt; font-weight: 700; text-align: center; text-transform: uppercase; letter-spacing: 0.5px; }}
.test-name {{ font-size: 10pt; font-weight: 600; text-align: center; text-transform: uppercase; margin-bottom: 4px; }}
.results-table {{ width: 100%; border-collapse: collapse; margin-bottom: 8px; }}
.results-table th {{ font-size: 8pt; font-weight: 600; text-transform: uppercase; padding: 2px 4px; text-align: left; }}
.results-table td {{ font-size: 9pt; padding: 1px 4px; }}
.col-name {{ width: 40%; }}
.col-result {{ width: 15%; text-align: center; }}
.col-flag {{ width: 10%; text-align: center; }}
.col-range {{ width: 20%; text-align: center; }}
.col-unit {{ width: 15%; text-align: center; }}
.abnormal-high {{ color: #d32f2f; font-weight: 600; }}
.abnormal-low {{ color: #1976d2; font-weight: 600; }}
.abnormal-name {{ font-weight: 600; }}
.embedded-markup {{ font-size: 9pt; }}
.embedded-markup table {{ width: 100%; border-collapse: collapse; margin: 5px 0; }}
.embedded-markup th {{ background-color: #f5f5f5; font-weight: 600; padding: 3px; text-align: center; }}
.embedded-markup td {{ padding: 3px; text-align: center; }}
.plain-field {{ margin-bottom: 5px; }}
.plain-label {{ font-weight: 600; margin-right: 10px; }}
.ending-line {{ text-align: center; margin-top: 10px; color: #333; }}
"#,
        w = g.page_width_mm,
        h = g.page_height_mm,
        m = g.side_margin_mm,
        hh = header_mm,
        fh = footer_mm,
    )
}

fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

fn indent_style(indent: usize) -> String {
    if indent == 0 {
        String::new()
    } else {
        format!(" style=\"padding-left: {}px\"", indent * 10)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
