//! YouTube Subtitler - A Rust CLI tool for downloading YouTube subtitles as plain text
//!
//! This library resolves YouTube links to video ids, downloads the timed-text caption
//! track for a chosen language, strips it down to plain text and saves the results
//! either as one combined file or one file per video.

use std::path::PathBuf;

pub mod cli;
pub mod config;
pub mod download;
pub mod extractors;
pub mod output;
pub mod subtitler;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use download::{DownloadOutcome, Fetcher, HttpTimedTextApi, SubtitleRecord, TimedTextApi};
pub use extractors::VideoId;
pub use subtitler::{Summary, Subtitler};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Why a single link could not be turned into a subtitle record, or why a run had to stop
#[derive(thiserror::Error, Debug)]
pub enum SubtitlerError {
    #[error("wrong link")]
    InvalidLink,

    #[error("couldn't download language info")]
    LanguageListUnavailable(#[source] FetchError),

    #[error("no such language (available: {})", .available.join(", "))]
    LanguageUnavailable { available: Vec<String> },

    #[error("couldn't download video info")]
    MetadataUnavailable(#[source] FetchError),

    #[error("couldn't download subtitles")]
    SubtitleUnavailable(#[source] FetchError),

    #[error("Output directory couldn't be created: {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed creating output file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Low-level failure while fetching or reading one of the platform's documents
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),

    #[error("document has no usable title")]
    MissingTitle,
}
