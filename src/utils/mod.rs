use anyhow::Result;
use chrono::{DateTime, Utc};
use url::Url;

use crate::extractors::youtube;

/// Validate a URL and return it parsed
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|_| anyhow::anyhow!("Invalid URL format: {}", url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("URL must use HTTP or HTTPS protocol");
    }

    Ok(parsed)
}

/// Whether a command line argument should be treated as a video link.
///
/// Anything URL-shaped counts, including scheme-less `host.tld/path`; whether it
/// actually points at a video is decided later.
pub fn is_link_like(arg: &str) -> bool {
    if validate_url(arg).is_ok() || youtube::supports_url(arg) {
        return true;
    }

    match arg.split_once('/') {
        Some((host, _)) => {
            host.contains('.')
                && !host.starts_with('.')
                && validate_url(&format!("http://{}", arg)).is_ok()
        }
        None => false,
    }
}

/// Name of the directory one run writes into
pub fn run_directory_name(started_at: DateTime<Utc>) -> String {
    format!("subtitles_{}", started_at.timestamp())
}

/// 1-based, zero-padded ordinal used in per-video file names
pub fn ordinal_prefix(index: usize) -> String {
    format!("{:03}", index + 1)
}
