//! Configuration for the paperforge application.
//!
//! Static settings (model choice, limits, chunking policy) loaded from a
//! TOML file with environment-variable overrides. The API credential is
//! never stored here; it is supplied by the caller per run.

use crate::log_debug;
use crate::models::{Model, OUTPUT_TOKEN_CAP};

use anyhow::{Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration structure for the paperforge application
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Default generation model
    #[serde(default)]
    pub default_model: Model,
    /// Number of parallel requests the dispatcher may have in flight
    #[serde(default = "default_max_parallel_requests")]
    pub max_parallel_requests: usize,
    /// Output-token cap requested per call (hard-capped at 2000 regardless)
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Soft per-session request budget
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    /// Break long section prompts into smaller parallel requests
    #[serde(default = "default_section_chunking")]
    pub section_chunking: bool,
    /// Prompts below this word count are never chunked
    #[serde(default = "default_chunk_word_threshold")]
    pub chunk_word_threshold: usize,
    /// Minimum target paper length in words
    #[serde(default = "default_min_paper_length")]
    pub min_paper_length: u32,
    /// Maximum target paper length in words
    #[serde(default = "default_max_paper_length")]
    pub max_paper_length: u32,
    /// Free-tier rate limiting settings
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// Free-tier rate limiting settings
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RateLimitConfig {
    /// Advertised free-tier request ceiling per minute
    pub requests_per_minute: u32,
    /// Advertised free-tier token ceiling per minute
    pub tokens_per_minute: u32,
    /// Pacing delay inserted between accepted chunk results, in milliseconds
    pub delay_between_requests_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            tokens_per_minute: 30_000,
            delay_between_requests_ms: 1000,
        }
    }
}

impl RateLimitConfig {
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_between_requests_ms)
    }
}

fn default_max_parallel_requests() -> usize {
    3
}

fn default_max_output_tokens() -> u32 {
    OUTPUT_TOKEN_CAP
}

fn default_daily_limit() -> u32 {
    60
}

fn default_section_chunking() -> bool {
    true
}

fn default_chunk_word_threshold() -> usize {
    100
}

fn default_min_paper_length() -> u32 {
    1000
}

fn default_max_paper_length() -> u32 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_model: Model::default(),
            max_parallel_requests: default_max_parallel_requests(),
            max_output_tokens: default_max_output_tokens(),
            daily_limit: default_daily_limit(),
            section_chunking: default_section_chunking(),
            chunk_word_threshold: default_chunk_word_threshold(),
            min_paper_length: default_min_paper_length(),
            max_paper_length: default_max_paper_length(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from the file, then apply env overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = if config_path.exists() {
            let config_content = fs::read_to_string(&config_path)?;
            toml::from_str(&config_content).map_err(|e| {
                anyhow!(
                    "Invalid configuration file format: {}. Please check {} for syntax errors.",
                    e,
                    config_path.display()
                )
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Save the configuration to the file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        let config_content = toml::to_string(self)?;
        fs::write(config_path, config_content)?;
        log_debug!("Configuration saved: {:?}", self);
        Ok(())
    }

    /// Get the path to the configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("paperforge");
        std::fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }

    /// Environment variables take precedence over the file
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("PAPERFORGE_MAX_TOKENS")
            && let Ok(tokens) = value.parse::<u32>()
        {
            self.max_output_tokens = tokens;
        }
        if let Ok(value) = std::env::var("PAPERFORGE_DAILY_LIMIT")
            && let Ok(limit) = value.parse::<u32>()
        {
            self.daily_limit = limit;
        }
    }

    /// Clamp a requested target length to the configured word range
    pub fn clamp_target_length(&self, words: u32) -> u32 {
        words.clamp(self.min_paper_length, self.max_paper_length)
    }
}

/// Explicit per-run generation options, replacing ad-hoc keyword arguments.
///
/// Every field has a documented default; `GenerationOptions::default()` is a
/// complete, usable configuration.
#[derive(Clone, Debug)]
pub struct GenerationOptions {
    /// Sampling temperature, clamped to [0.1, 1.0] before use. Default 0.7.
    pub temperature: f32,
    /// Requested output-token cap, hard-capped at 2000. Default 2000.
    pub max_output_tokens: u32,
    /// Model to generate with. Default: the fast model.
    pub model: Model,
    /// Attempts per request before giving up. Default 3.
    pub retry_count: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: OUTPUT_TOKEN_CAP,
            model: Model::default(),
            retry_count: 3,
        }
    }
}

impl GenerationOptions {
    /// Derive per-run options from the static configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            model: config.default_model,
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }
}
