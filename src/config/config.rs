use home_dir::HomeDirExt;
use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use tracing::{debug, warn};
use url::Url;

use crate::youtube::DEFAULT_API_URL;

use super::app_config::AppConfig;

pub const API_KEY_VARIABLE: &str = "YOUTUBE_API_KEY";

const DEFAULT_OUTPUT_DIR: &str = "playlists";
const DEFAULT_MAX_RESULTS: u32 = 15;
const MAX_RESULTS_LIMIT: u32 = 50;

pub struct Config {
    config_file: PathBuf,
    app_config: AppConfig,
    env_api_key: Option<String>,
}

impl Config {
    pub fn new_from_file(config_path: Option<String>) -> Result<Config> {
        if let Some(config_path) = config_path {
            let config_path = PathBuf::from(config_path);

            Config::new(config_path, true)
        } else {
            Config::new_default()
        }
    }

    pub fn new_default() -> Result<Config> {
        let config_directory_root =
            std::env::var("XDG_CONFIG_HOME").unwrap_or("~/.config".to_string());

        let config_directory = expand(&config_directory_root).join("playlist-generator");
        let config_file = config_directory.join("config.toml");

        Config::new(config_file, false)
    }

    /// A missing file falls back to defaults unless it was asked for
    /// explicitly. Nothing is written to disk.
    fn new(config_file: PathBuf, required: bool) -> Result<Config> {
        let app_config: AppConfig = if config_file.exists() || required {
            let file_content = std::fs::read_to_string(&config_file).with_context(|| {
                format!("Cannot read config file \"{}\"", config_file.display())
            })?;

            debug!("Loaded config from \"{}\"", config_file.display());

            toml::from_str(&file_content).with_context(|| {
                format!("Invalid config file \"{}\"", config_file.display())
            })?
        } else {
            debug!(
                "No config file at \"{}\", using defaults",
                config_file.display()
            );

            AppConfig::new_default()
        };

        Ok(Config {
            config_file,
            app_config,
            env_api_key: std::env::var(API_KEY_VARIABLE).ok(),
        })
    }

    /// Command line values take precedence over the config file.
    pub fn apply_overrides(&mut self, output_dir: Option<String>, max_results: Option<u32>) {
        if output_dir.is_some() {
            self.app_config.output_dir = output_dir;
        }

        if max_results.is_some() {
            self.app_config.max_results = max_results;
        }
    }

    pub fn get_api_key(&self) -> Option<String> {
        self.env_api_key
            .as_ref()
            .or(self.app_config.api_key.as_ref())
            .filter(|key| !key.trim().is_empty())
            .cloned()
    }

    pub fn get_api_url(&self) -> String {
        self.app_config
            .api_url
            .clone()
            .unwrap_or(DEFAULT_API_URL.to_string())
    }

    pub fn get_output_dir(&self) -> PathBuf {
        self.app_config
            .output_dir
            .as_ref()
            .map(|dir| expand(dir))
            .unwrap_or(PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn get_max_results(&self) -> u32 {
        self.app_config.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    pub fn validate(&self) -> Result<()> {
        let max_results = self.get_max_results();
        let api_url = self.get_api_url();
        let output_dir = self.get_output_dir();

        if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
            return Err(anyhow!(
                "Given max_results ({}) must be between 1 and {} (config file path: \"{}\")",
                max_results,
                MAX_RESULTS_LIMIT,
                self.config_file.display()
            ));
        }

        let is_http = Url::parse(&api_url)
            .map(|url| url.scheme() == "http" || url.scheme() == "https")
            .unwrap_or(false);

        if !is_http {
            return Err(anyhow!(
                "Given api_url (\"{}\") is not an http(s) url (config file path: \"{}\")",
                api_url,
                self.config_file.display()
            ));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(anyhow!(
                "Given output_dir (\"{}\") is not a directory (config file path: \"{}\")",
                output_dir.display(),
                self.config_file.display()
            ));
        }

        if self.get_api_key().is_none() {
            warn!(
                "No API key configured, set {} or api_key in \"{}\"",
                API_KEY_VARIABLE,
                self.config_file.display()
            );
        }

        Ok(())
    }
}

fn expand(path: &str) -> PathBuf {
    let path = PathBuf::from(path);

    path.expand_home().unwrap_or(path)
}
