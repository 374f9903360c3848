use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::input::InputFormat;

const DEFAULT_CONFIG_FILE: &str = "sentiq.toml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub request_timeout: Option<u64>,
    pub theme_count: Option<usize>,
    pub cache_capacity: Option<usize>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
    pub request_timeout: u64,
    pub theme_count: usize,
    pub cache_capacity: usize,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub skip_themes: bool,
}

impl Config {
    /// Load config from file (explicit `--config`, else `sentiq.toml` if
    /// present, else defaults) and merge CLI overrides on top.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                let config_path = Path::new(path);
                if !config_path.exists() {
                    return Err(Error::ConfigNotFound(config_path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(config_path)?)?
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    parse_config(&std::fs::read_to_string(default_path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let config = merge(file_config, cli);
        validate(&config)?;
        Ok(config)
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

fn validate(config: &Config) -> Result<()> {
    if let Some(ref format) = config.format
        && InputFormat::from_name(format).is_none()
    {
        return Err(Error::ConfigValidation(format!(
            "unknown format: {format} (expected: json, csv, text)"
        )));
    }
    if config.theme_count == 0 {
        return Err(Error::ConfigValidation(
            "theme_count must be > 0".to_string(),
        ));
    }
    if config.request_timeout == 0 {
        return Err(Error::ConfigValidation(
            "request_timeout must be > 0".to_string(),
        ));
    }
    if config.cache_capacity == 0 {
        return Err(Error::ConfigValidation(
            "cache_capacity must be > 0".to_string(),
        ));
    }
    Ok(())
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Config {
    Config {
        model: cli
            .model
            .clone()
            .or(file.model)
            .unwrap_or_else(|| "gpt-4".to_string()),
        base_url: cli
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        api_key_env: cli
            .api_key_env
            .clone()
            .or(file.api_key_env)
            .unwrap_or_else(|| "OPENAI_API_KEY".to_string()),
        request_timeout: cli.timeout.or(file.request_timeout).unwrap_or(60),
        theme_count: cli.themes.or(file.theme_count).unwrap_or(5),
        cache_capacity: file.cache_capacity.unwrap_or(64),
        format: cli.format.clone().or(file.format),
        output: cli.output.clone(),
        skip_themes: cli.no_themes,
    }
}
