use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::download::{DownloadOutcome, Fetcher, TimedTextApi};
use crate::extractors;
use crate::output::{self, error_log::ERROR_LOG_FILE, ErrorLog};
use crate::utils;
use crate::SubtitlerError;

pub mod report;

pub use report::Reporter;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Runs a batch of links through resolve, download and save
pub struct Subtitler<A> {
    fetcher: Fetcher<A>,
    language: String,
    run_dir: PathBuf,
    quiet: bool,
}

impl<A: TimedTextApi> Subtitler<A> {
    /// Create `subtitles_<timestamp>` under `output_dir` and prepare a run into it
    pub fn create(
        api: A,
        output_dir: &Path,
        language: impl Into<String>,
        quiet: bool,
    ) -> Result<Self, SubtitlerError> {
        let run_dir = output_dir.join(utils::run_directory_name(Utc::now()));
        output::create_run_dir(&run_dir)?;
        tracing::debug!("Created output directory {}", run_dir.display());

        Ok(Self {
            fetcher: Fetcher::new(api),
            language: language.into(),
            run_dir,
            quiet,
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Fetch subtitles for every link, in order, then save them.
    ///
    /// A link that fails is reported, counted and written to the error log; it
    /// never stops the batch. Only failing to write output is an error.
    pub async fn process(&self, links: &[String], collect: bool) -> Result<Summary, SubtitlerError> {
        let reporter = if self.quiet {
            Reporter::quiet()
        } else {
            Reporter::new(links.len())
        };

        let mut summary = Summary::default();
        let mut records = Vec::new();
        let mut failed_links = Vec::new();

        for link in links {
            reporter.start(link);

            let outcome = match extractors::resolve(link) {
                Some(video_id) => self
                    .fetcher
                    .download(&video_id, &self.language)
                    .await
                    .for_link(link.as_str()),
                None => DownloadOutcome::failure(SubtitlerError::InvalidLink, link.as_str()),
            };

            match outcome {
                DownloadOutcome::Success(record) => {
                    tracing::info!("Loaded {} ({})", record.video_id, record.title);
                    reporter.loaded(&record.title);
                    summary.loaded += 1;
                    records.push(record);
                }
                failure @ DownloadOutcome::Failure { .. } => {
                    tracing::debug!("Skipping {:?}", failure);
                    reporter.skipped(&failure.to_string());
                    summary.skipped += 1;
                    failed_links.push(link.as_str());
                }
            }
        }

        reporter.finish();
        reporter.line(format!("Total: {} loaded, {} skipped", summary.loaded, summary.skipped));
        reporter.line("Saving...");

        output::save(&records, collect, &self.run_dir)?;

        let mut error_log = ErrorLog::new(self.run_dir.join(ERROR_LOG_FILE));
        for link in failed_links {
            error_log.log(link)?;
        }

        reporter.line("Done");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::client::MockTimedTextApi;
    use crate::FetchError;

    const TRACKS: &str = r#"<transcript_list><track lang_code="en"/></transcript_list>"#;

    fn captions(text: &str) -> String {
        format!("<transcript><text start=\"0\">{}</text></transcript>", text)
    }

    /// Serves an English track for every id, titled and captioned after the id
    fn api() -> MockTimedTextApi {
        let mut api = MockTimedTextApi::new();
        api.expect_track_list()
            .returning(|_| Ok(TRACKS.to_string()));
        api.expect_video_info()
            .returning(|id| Ok(format!("<oembed><title>Title {}</title></oembed>", id)));
        api.expect_timed_text()
            .returning(|id, _| Ok(captions(&format!("text of {}", id))));
        api
    }

    fn links(links: &[&str]) -> Vec<String> {
        links.iter().map(|link| link.to_string()).collect()
    }

    #[tokio::test]
    async fn test_invalid_link_skipped_and_logged() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockTimedTextApi::new();
        api.expect_track_list()
            .times(1)
            .returning(|_| Ok(TRACKS.to_string()));
        api.expect_video_info()
            .returning(|_| Ok("<oembed><title>Good one</title></oembed>".to_string()));
        api.expect_timed_text()
            .returning(|_, _| Ok(captions("hi")));

        let subtitler = Subtitler::create(api, dir.path(), "en", true).unwrap();
        let summary = subtitler
            .process(&links(&["http://youtu.be/good", "http://example.com/bad link"]), false)
            .await
            .unwrap();

        assert_eq!(summary, Summary { loaded: 1, skipped: 1 });
        let log = fs_err::read_to_string(subtitler.run_dir().join(ERROR_LOG_FILE)).unwrap();
        assert_eq!(log, "http://example.com/bad link\n");
        assert!(subtitler.run_dir().join("001_Good one.txt").exists());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockTimedTextApi::new();
        api.expect_track_list()
            .withf(|id| id.as_str() == "nolang")
            .returning(|_| Ok(r#"<transcript_list><track lang_code="ru"/></transcript_list>"#.to_string()));
        api.expect_track_list()
            .withf(|id| id.as_str() == "down")
            .returning(|_| Err(FetchError::MissingTitle));
        api.expect_track_list()
            .withf(|id| id.as_str() == "ok")
            .returning(|_| Ok(TRACKS.to_string()));
        api.expect_video_info()
            .returning(|_| Ok("<oembed><title>Fine</title></oembed>".to_string()));
        api.expect_timed_text()
            .withf(|id, _| id.as_str() == "ok")
            .times(1)
            .returning(|_, _| Ok(captions("made it")));

        let input = links(&[
            "http://www.youtube.com/watch?v=nolang&feature=share",
            "http://youtu.be/down",
            "youtu.be/ok",
        ]);
        let subtitler = Subtitler::create(api, dir.path(), "en", true).unwrap();
        let summary = subtitler.process(&input, true).await.unwrap();

        assert_eq!(summary, Summary { loaded: 1, skipped: 2 });
        let log = fs_err::read_to_string(subtitler.run_dir().join(ERROR_LOG_FILE)).unwrap();
        assert_eq!(
            log,
            "http://www.youtube.com/watch?v=nolang&feature=share\nhttp://youtu.be/down\n"
        );
        let collected = fs_err::read_to_string(subtitler.run_dir().join(output::COLLECTED_FILE)).unwrap();
        assert_eq!(collected, "Video #1: Fine\n\nmade it");
    }

    #[tokio::test]
    async fn test_id_with_path_separator_does_not_abort_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = MockTimedTextApi::new();
        api.expect_track_list()
            .times(1)
            .returning(|_| Ok(TRACKS.to_string()));
        api.expect_video_info()
            .returning(|_| Err(FetchError::MissingTitle));
        api.expect_timed_text()
            .returning(|_, _| Ok(captions("hi")));

        let subtitler = Subtitler::create(api, dir.path(), "en", true).unwrap();
        let summary = subtitler
            .process(&links(&["youtu.be/good", "youtube.com/watch?v=a/b"]), false)
            .await
            .unwrap();

        assert_eq!(summary, Summary { loaded: 1, skipped: 1 });
        assert!(subtitler.run_dir().join("001_good.txt").exists());
        let log = fs_err::read_to_string(subtitler.run_dir().join(ERROR_LOG_FILE)).unwrap();
        assert_eq!(log, "youtube.com/watch?v=a/b\n");
    }

    #[tokio::test]
    async fn test_collect_mode_end_to_end() {
        let dir = tempfile::tempdir().unwrap();

        let subtitler = Subtitler::create(api(), dir.path(), "en", true).unwrap();
        let summary = subtitler
            .process(&links(&["http://youtu.be/one", "https://www.youtube.com/watch?v=two"]), true)
            .await
            .unwrap();

        assert_eq!(summary, Summary { loaded: 2, skipped: 0 });
        let content = fs_err::read_to_string(subtitler.run_dir().join(output::COLLECTED_FILE)).unwrap();
        assert!(content.starts_with("Video #1: Title one\n\n"));
        assert_eq!(
            content,
            "Video #1: Title one\n\ntext of one\n\n\nVideo #2: Title two\n\ntext of two"
        );
        assert!(!subtitler.run_dir().join(ERROR_LOG_FILE).exists());
    }

    #[tokio::test]
    async fn test_per_record_mode_end_to_end() {
        let dir = tempfile::tempdir().unwrap();

        let subtitler = Subtitler::create(api(), dir.path(), "en", true).unwrap();
        subtitler
            .process(&links(&["http://youtu.be/one", "http://youtu.be/two"]), false)
            .await
            .unwrap();

        let mut names: Vec<String> = fs_err::read_dir(subtitler.run_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["001_Title one.txt", "002_Title two.txt"]);
    }

    #[tokio::test]
    async fn test_run_dir_created_under_output_dir() {
        let dir = tempfile::tempdir().unwrap();

        let subtitler = Subtitler::create(MockTimedTextApi::new(), dir.path(), "en", true).unwrap();
        let summary = subtitler.process(&[], false).await.unwrap();

        assert_eq!(summary, Summary::default());
        assert_eq!(subtitler.run_dir().parent(), Some(dir.path()));
        let name = subtitler.run_dir().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("subtitles_"));
        assert!(name["subtitles_".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = Subtitler::create(MockTimedTextApi::new(), &missing, "en", true).err().unwrap();
        assert!(matches!(err, SubtitlerError::CreateDir { .. }));
    }
}
