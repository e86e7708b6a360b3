use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal feedback for a run: one line per link plus an optional progress bar
pub struct Reporter {
    progress: ProgressBar,
}

impl Reporter {
    pub fn new(total: usize) -> Self {
        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { progress }
    }

    /// Reporter that prints outcome lines but never draws a progress bar
    pub fn quiet() -> Self {
        Self {
            progress: ProgressBar::hidden(),
        }
    }

    pub fn start(&self, link: &str) {
        self.progress.set_message(link.to_string());
    }

    pub fn loaded(&self, title: &str) {
        self.line(format!("{}: {}", style("Loaded").green(), title));
        self.progress.inc(1);
    }

    pub fn skipped(&self, reason: &str) {
        self.line(format!("{}: {}", style("Skipped").red(), reason));
        self.progress.inc(1);
    }

    pub fn finish(&self) {
        self.progress.finish_and_clear();
    }

    pub fn line(&self, line: impl AsRef<str>) {
        self.progress.suspend(|| println!("{}", line.as_ref()));
    }
}
