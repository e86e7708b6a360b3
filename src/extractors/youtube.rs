use once_cell::sync::Lazy;
use regex::Regex;

use super::VideoId;

/// `youtu.be/<id>`, optionally followed by a query or fragment
static SHORT_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?youtu\.be/([A-Za-z0-9_-]+)(?:[?#]\S*)?$")
        .expect("short link pattern is valid")
});

/// `youtube.com/watch?v=<id>`, optionally followed by more query parameters
static LONG_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]+)(?:[&#]\S*)?$")
        .expect("long link pattern is valid")
});

/// Extract the video id from a YouTube link.
///
/// The short `youtu.be` form is tried before the long `watch?v=` form. Ids are
/// limited to letters, digits, `_` and `-`. Anything else yields `None`, which
/// callers report as a wrong link.
pub fn resolve(link: &str) -> Option<VideoId> {
    let link = link.trim();

    [&*SHORT_LINK, &*LONG_LINK]
        .iter()
        .find_map(|pattern| pattern.captures(link))
        .and_then(|captures| captures.get(1))
        .map(|id| VideoId::new(id.as_str()))
}

/// Check if this looks like any YouTube link, resolvable or not
pub fn supports_url(url: &str) -> bool {
    let url_lower = url.to_lowercase();
    url_lower.contains("youtube.com/") || url_lower.contains("youtu.be/")
}
