// ============================================================
// Layer 4 — HTML Text Extractor
// ============================================================
// Turns the raw bytes of an annual filing into one line of
// normalised plain text that the keyword counter can scan.
//
// Steps (applied in order):
//   1. Decode bytes as UTF-8, dropping anything undecodable
//   2. Parse as HTML with scraper (html5ever underneath), which
//      repairs malformed markup instead of failing
//   3. Concatenate every text node that is not inside a
//      <script> or <style> element
//   4. Trim each line, split each line on double spaces, drop
//      empty fragments, join the rest with single spaces
//
// Extraction never fails. The worst case for garbage input is
// an empty string, which counts as zero for every term.

use std::borrow::Cow;

use scraper::{Html, Node};

/// Elements whose text content is code, not prose
const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract normalised plain text from raw HTML bytes.
    pub fn extract(&self, html: &[u8]) -> String {
        let source = decode_lossy(html);
        let raw = visible_text(&source);
        normalize_whitespace(&raw)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode bytes as UTF-8. Invalid sequences are dropped rather than
/// replaced, so they cannot glue onto neighbouring words as U+FFFD.
fn decode_lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            tracing::debug!("Input is not valid UTF-8; dropping undecodable bytes");
            s.replace(char::REPLACEMENT_CHARACTER, "")
        }
    }
}

/// All document text outside script/style elements, concatenated
/// with no separator (markup boundaries add nothing).
fn visible_text(source: &str) -> String {
    let document = Html::parse_document(source);
    let mut out = String::with_capacity(source.len() / 2);

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });

        if !hidden {
            out.push_str(text);
        }
    }

    out
}

/// Line terminators recognised when splitting extracted text into lines
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}'
            | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Collapse extracted text into a single line.
///
/// A lone space inside a fragment survives; any run of two or more
/// spaces becomes one space. The result has no newlines.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split(is_line_break)
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
