//! Plain-text extraction from the platform's XML documents.
//!
//! Three documents are involved: the timed-text caption track itself, the list of
//! caption tracks available for a video, and the video's metadata (for its title).

use roxmltree::{Document, Node};

use crate::FetchError;

/// Punctuation allowed to survive in a title, besides word characters and spaces
const TITLE_PUNCTUATION: &[char] = &['.', '$', '#', '@', '!', '(', ')', '-', '=', '+'];

/// Flatten a timed-text document into a single line of text.
///
/// Every child element of the root is one caption entry. Entries without text
/// are skipped; the others are HTML-unescaped, stripped of leading whitespace and
/// joined with single spaces. The result carries no trailing space.
pub fn extract_subtitle_text(xml: &str) -> Result<String, FetchError> {
    let doc = Document::parse(xml)?;

    let mut text = String::new();
    for entry in doc.root_element().children().filter(|node| node.is_element()) {
        let raw = entry_text(entry);
        let unescaped = html_escape::decode_html_entities(&raw);
        let line = unescaped.trim_start();
        if line.is_empty() {
            continue;
        }
        text.push_str(line);
        text.push(' ');
    }

    Ok(text.trim_end().to_string())
}

/// Collect the `lang_code` of every `track` element, in document order
pub fn extract_language_codes(xml: &str) -> Result<Vec<String>, FetchError> {
    let doc = Document::parse(xml)?;

    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("track"))
        .filter_map(|track| track.attribute("lang_code"))
        .map(str::to_string)
        .collect())
}

/// Read the `title` under the document root and make it safe to use in a file name
pub fn extract_title(xml: &str) -> Result<String, FetchError> {
    let doc = Document::parse(xml)?;

    let raw = doc
        .root_element()
        .children()
        .find(|node| node.has_tag_name("title"))
        .map(entry_text)
        .ok_or(FetchError::MissingTitle)?;

    let title = sanitize_title(&raw);
    if title.is_empty() {
        return Err(FetchError::MissingTitle);
    }
    Ok(title)
}

fn entry_text(node: Node) -> String {
    node.descendants()
        .filter(|node| node.is_text())
        .filter_map(|text| text.text())
        .collect()
}

/// Keep word characters and a few punctuation marks; squeeze whitespace runs and
/// repeated punctuation down to one character.
pub fn sanitize_title(raw: &str) -> String {
    let mut title = String::with_capacity(raw.len());

    for c in raw.chars() {
        if c.is_whitespace() {
            if !title.is_empty() && !title.ends_with(' ') {
                title.push(' ');
            }
        } else if c.is_alphanumeric() || c == '_' {
            title.push(c);
        } else if TITLE_PUNCTUATION.contains(&c) && !title.ends_with(c) {
            title.push(c);
        }
    }

    title.trim_end().to_string()
}
