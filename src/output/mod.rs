use fs_err::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::download::SubtitleRecord;
use crate::utils;
use crate::SubtitlerError;

pub mod error_log;

pub use error_log::ErrorLog;

/// File holding every record in collect mode
pub const COLLECTED_FILE: &str = "all_subtitles.txt";

/// Create the directory a run writes into
pub fn create_run_dir(path: &Path) -> Result<(), SubtitlerError> {
    fs_err::create_dir(path).map_err(|source| SubtitlerError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Save subtitle records to `dir`.
///
/// With `collect` everything is appended to one file, records separated by two
/// blank lines. Otherwise each record gets its own `NNN_<title>.txt`.
pub fn save(records: &[SubtitleRecord], collect: bool, dir: &Path) -> Result<(), SubtitlerError> {
    for (index, record) in records.iter().enumerate() {
        let path = if collect {
            dir.join(COLLECTED_FILE)
        } else {
            record_path(dir, index, record)
        };

        let mut content = String::new();
        if collect && index > 0 {
            content.push_str("\n\n\n");
        }
        content.push_str(&format_record(index, record));

        append(&path, &content)?;
    }

    Ok(())
}

/// `Video #N: <title>` header, a blank line, then the text
pub fn format_record(index: usize, record: &SubtitleRecord) -> String {
    format!("Video #{}: {}\n\n{}", index + 1, record.title, record.text)
}

fn record_path(dir: &Path, index: usize, record: &SubtitleRecord) -> PathBuf {
    dir.join(format!("{}_{}.txt", utils::ordinal_prefix(index), record.title))
}

fn append(path: &Path, content: &str) -> Result<(), SubtitlerError> {
    let write_error = |source| SubtitlerError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;

    file.write_all(content.as_bytes()).map_err(write_error)
}
