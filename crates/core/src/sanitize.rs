//! First-row cleaning for embedded markup.
//!
//! Rich-text editors emit result tables whose header row carries an
//! inline `background-color` and bold cells. Before embedding, the
//! background declaration is stripped from the first `<tr>` so the
//! host stylesheet's own header shading applies, and that row's data
//! cells are promoted to `<th>` when their content is bold-styled.
//!
//! This is a narrow, deterministic text transform over a fixed token
//! set, not an HTML parser, and downstream behavior depends on it
//! staying that shallow: rows after the first must pass through
//! byte-for-byte.

use regex::Regex;
use std::sync::LazyLock;

static FIRST_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<tr([^>]*)>(.*?)</tr>").expect("row pattern is valid")
});

static STYLE_BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(style="[^"]*?)background-color:\s*[^;"']+;?([^"]*")"#)
        .expect("background pattern is valid")
});

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-weight:\s*bold").expect("bold pattern is valid"));

static TD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<td").expect("td-open pattern is valid"));

static TD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</td>").expect("td-close pattern is valid"));

/// Cleans one embedded markup fragment. Values without a table row
/// pass through unchanged.
pub fn clean_markup(html: &str) -> String {
    let Some(caps) = FIRST_ROW.captures(html) else {
        return html.to_string();
    };
    let row = caps.get(0).expect("whole match");
    let attrs = caps.get(1).map_or("", |m| m.as_str());
    let content = caps.get(2).map_or("", |m| m.as_str());

    let attrs = STYLE_BACKGROUND.replace(attrs, "$1$2");

    let content = if BOLD.is_match(content) {
        let promoted = TD_OPEN.replace_all(content, "<th");
        TD_CLOSE.replace_all(&promoted, "</th>").into_owned()
    } else {
        content.to_string()
    };

    format!(
        "{}<tr{}>{}</tr>{}",
        &html[..row.start()],
        attrs,
        content,
        &html[row.end()..]
    )
}
