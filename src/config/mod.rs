use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration, loaded from `config.yaml` in the working directory or
/// the platform config directory. Every field has a default, so a missing
/// file is not an error; CLI flags override whatever is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transcription settings
    pub transcription: TranscriptionConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Default whisper model name
    pub default_model: String,

    /// Directory holding GGML model files (defaults to the platform data dir)
    pub models_dir: Option<PathBuf>,

    /// Default language code (auto-detect if unset)
    pub default_language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default output format list
    pub default_format: String,

    /// Keep downloaded audio files after transcription
    pub keep_audio: bool,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            default_model: crate::models::DEFAULT_MODEL.to_string(),
            models_dir: None,
            default_language: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_format: "txt".to_string(),
            keep_audio: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcription: TranscriptionConfig::default(),
            app: AppConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when no file
    /// exists.
    pub fn load() -> Result<Self> {
        let Some(config_path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs_err::read_to_string(&config_path)
            .context("Failed to read config file")?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        // Current directory first for easy testing.
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir().map(|dir| dir.join("voxscribe").join("config.yaml"))
    }

    /// Directory holding GGML model files.
    pub fn models_dir(&self) -> PathBuf {
        self.transcription
            .models_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("voxscribe").join("models")))
            .unwrap_or_else(|| PathBuf::from("models"))
    }
}
