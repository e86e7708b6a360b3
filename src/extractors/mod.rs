use std::fmt;

pub mod timedtext;
pub mod youtube;

pub use timedtext::{extract_language_codes, extract_subtitle_text, extract_title, sanitize_title};
pub use youtube::resolve;

/// Identifier of a single video on the platform, as taken from a link
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
