// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClipixError, ClipixResult};
use crate::utils::logging::{LogFormat, LogLevel};

/// Default name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "clipix.toml";

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub tools: ToolsConfig,
    pub transcription: TranscriptionConfig,
    pub logging: LoggingSettings,
    pub cut: CutConfig,
}

/// Where outputs and temporary artifacts are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

/// External tool locations and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    /// Upper bound for any single ffmpeg/ffprobe run; `None` waits forever
    pub process_timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            process_timeout_secs: Some(3600),
        }
    }
}

/// Speech-to-text service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "whisper-1".to_string(),
            request_timeout_secs: 600,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

/// Cut planning policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutConfig {
    /// Probe the source and reject ranges that overlap or run past its end
    pub validate_ranges: bool,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            validate_ranges: true,
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ClipixResult<AppConfig> {
        if !path.exists() {
            return Err(ClipixError::Config {
                message: format!("Config file does not exist: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|source| ClipixError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse configuration from a TOML string; absent keys keep their defaults
    pub fn parse(content: &str) -> Result<AppConfig, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate configuration
    pub fn validate(config: &AppConfig) -> ClipixResult<()> {
        if config.storage.upload_dir.as_os_str().is_empty() {
            return Err(ClipixError::Config {
                message: "storage.upload_dir cannot be empty".to_string(),
            });
        }
        if config.tools.ffmpeg.as_os_str().is_empty() || config.tools.ffprobe.as_os_str().is_empty() {
            return Err(ClipixError::Config {
                message: "tools.ffmpeg and tools.ffprobe cannot be empty".to_string(),
            });
        }
        if config.tools.process_timeout_secs == Some(0) {
            return Err(ClipixError::Config {
                message: "tools.process_timeout_secs must be positive".to_string(),
            });
        }
        if config.transcription.request_timeout_secs == 0 {
            return Err(ClipixError::Config {
                message: "transcription.request_timeout_secs must be positive".to_string(),
            });
        }
        if config.transcription.model.trim().is_empty() {
            return Err(ClipixError::Config {
                message: "transcription.model cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
