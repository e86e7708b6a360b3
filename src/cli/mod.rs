use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::utils;

#[derive(Parser, Debug)]
#[command(
    name = "subtitler",
    about = "YouTube Subtitler - Download subtitles of YouTube videos as plain text",
    version,
    long_about = "Downloads subtitles for one or many YouTube videos at once.\n\n\
All files are saved in a new directory named subtitles_TIMESTAMP, created in OUTPUT_DIR \
(the current directory by default). Links that fail are written to \
subtitles_TIMESTAMP/errors.log, so they can be fixed, or retried with another language, \
by feeding the log back in: `subtitler -lde < errors.log`. Links are read from stdin only \
when none are given as arguments."
)]
pub struct Cli {
    /// Optional existing OUTPUT_DIR, then whitespace-separated YouTube links
    #[arg(value_name = "OUTPUT_DIR | LINK")]
    pub args: Vec<String>,

    /// Subtitle language code (also accepted as -lLANG)
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Collect all subtitles in one file 'all_subtitles.txt'
    #[arg(short, long)]
    pub collect: bool,

    /// Configuration file to use instead of the default locations
    #[arg(long, value_name = "FILE", env = "SUBTITLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

/// Where to write and what to fetch, as given on the command line and stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub output_dir: Option<PathBuf>,
    pub links: Vec<String>,
}

impl Cli {
    /// Sort positional arguments into the output directory and links.
    ///
    /// The first argument naming an existing directory is the output directory;
    /// every other argument must look like a link. Link-like tokens from `stdin`
    /// are appended after the arguments.
    pub fn inputs(&self, stdin: Option<&str>) -> Result<Inputs> {
        let mut output_dir = None;
        let mut links = Vec::new();

        for arg in &self.args {
            if output_dir.is_none() && Path::new(arg).is_dir() {
                output_dir = Some(PathBuf::from(arg));
            } else if utils::is_link_like(arg) {
                links.push(arg.clone());
            } else {
                anyhow::bail!("Wrong parameter: {}", arg);
            }
        }

        if let Some(stdin) = stdin {
            links.extend(
                stdin
                    .split_whitespace()
                    .filter(|token| utils::is_link_like(token))
                    .map(str::to_string),
            );
        }

        Ok(Inputs { output_dir, links })
    }
}
