use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils;

const LOCAL_CONFIG: &str = "subtitler.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform endpoints and HTTP settings
    pub api: ApiConfig,

    /// Defaults for command line options
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint listing the caption tracks of a video (`type=list&v=ID`)
    pub track_list_url: String,

    /// Endpoint serving timed-text captions (`lang=LANG&v=ID`)
    pub timed_text_url: String,

    /// oEmbed endpoint serving video metadata as XML
    pub video_info_url: String,

    /// Watch page the oEmbed request refers to
    pub watch_url: String,

    /// Optional User-Agent header
    pub user_agent: Option<String>,

    /// Optional request timeout in seconds
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Subtitle language when `-l` is not given
    pub language: String,

    /// Save everything into one file when `-c` is not given
    pub collect: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            track_list_url: "http://www.youtube.com/api/timedtext".to_string(),
            timed_text_url: "http://video.google.com/timedtext".to_string(),
            video_info_url: "http://www.youtube.com/oembed".to_string(),
            watch_url: "http://www.youtube.com/watch".to_string(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            collect: false,
        }
    }
}

impl Config {
    /// Load configuration from `explicit`, a local or user config file, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::read(path)?,
            None => match Self::config_path() {
                Some(path) => Self::read(&path)?,
                None => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        tracing::debug!("Reading config from {}", path.display());

        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Find an existing configuration file, if any
    fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("youtube-subtitler").join("config.yaml"))
            .filter(|path| path.exists())
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("track_list_url", &self.api.track_list_url),
            ("timed_text_url", &self.api.timed_text_url),
            ("video_info_url", &self.api.video_info_url),
            ("watch_url", &self.api.watch_url),
        ] {
            utils::validate_url(endpoint)
                .with_context(|| format!("Invalid api.{} in config", name))?;
        }

        if self.defaults.language.trim().is_empty() {
            anyhow::bail!("Default language must not be empty");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Track list URL: {}", self.api.track_list_url);
        println!("  Timed text URL: {}", self.api.timed_text_url);
        println!("  Video info URL: {}", self.api.video_info_url);
        println!("  Watch URL: {}", self.api.watch_url);
        if let Some(user_agent) = &self.api.user_agent {
            println!("  User agent: {}", user_agent);
        }
        if let Some(timeout) = self.api.timeout_secs {
            println!("  Timeout: {}s", timeout);
        }
        println!("  Default language: {}", self.defaults.language);
        println!("  Collect by default: {}", self.defaults.collect);
    }
}
