use fs_err::File;
use std::io::Write;
use std::path::PathBuf;

use crate::SubtitlerError;

/// File name of the failed-links log inside a run directory
pub const ERROR_LOG_FILE: &str = "errors.log";

/// Line-per-entry log that only creates its file once something is logged
pub struct ErrorLog {
    path: PathBuf,
    file: Option<File>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Append one line, creating (or truncating) the file on first use
    pub fn log(&mut self, line: &str) -> Result<(), SubtitlerError> {
        let write_error = |source| SubtitlerError::Write {
            path: self.path.clone(),
            source,
        };

        let file = match self.file.take() {
            Some(file) => file,
            None => File::create(&self.path).map_err(write_error)?,
        };
        let file = self.file.insert(file);

        writeln!(file, "{}", line).map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_created_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ERROR_LOG_FILE);

        let mut log = ErrorLog::new(&path);
        assert!(!path.exists());

        log.log("http://youtu.be/first").unwrap();
        log.log("not a link").unwrap();
        drop(log);

        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "http://youtu.be/first\nnot a link\n"
        );
    }

    #[test]
    fn test_existing_file_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ERROR_LOG_FILE);
        fs_err::write(&path, "stale\n").unwrap();

        let mut log = ErrorLog::new(&path);
        log.log("fresh").unwrap();

        assert_eq!(fs_err::read_to_string(log.path()).unwrap(), "fresh\n");
    }
}
