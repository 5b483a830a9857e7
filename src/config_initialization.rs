//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI flags > `CLIPIX_*` environment > config file > defaults.
//! The environment is read through a lookup closure so callers (and tests)
//! decide where values come from.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter, DEFAULT_CONFIG_FILE};
use crate::error::{ClipixError, ClipixResult};
use crate::utils::logging::{LogFormat, LogLevel};

/// Values given on the command line; `None` leaves lower layers in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub upload_dir: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub timeout_secs: Option<u64>,
}

/// Build the effective configuration
pub fn initialize_configuration<F>(overrides: &ConfigOverrides, env: F) -> ClipixResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = load_config_file(overrides.config_path.as_deref())?;
    apply_environment(&mut config, &env)?;
    apply_cli_overrides(&mut config, overrides);
    TomlConfigAdapter::validate(&config)?;
    Ok(config)
}

/// An explicit path must exist; the default file is optional
fn load_config_file(explicit: Option<&Path>) -> ClipixResult<AppConfig> {
    match explicit {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            TomlConfigAdapter::load(path)
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                debug!(path = %default_path.display(), "loading configuration file");
                TomlConfigAdapter::load(default_path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

fn apply_environment<F>(config: &mut AppConfig, env: &F) -> ClipixResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(value) = lookup("CLIPIX_UPLOAD_DIR") {
        config.storage.upload_dir = PathBuf::from(value);
    }
    if let Some(value) = lookup("CLIPIX_FFMPEG") {
        config.tools.ffmpeg = PathBuf::from(value);
    }
    if let Some(value) = lookup("CLIPIX_FFPROBE") {
        config.tools.ffprobe = PathBuf::from(value);
    }
    if let Some(value) = lookup("CLIPIX_PROCESS_TIMEOUT") {
        let secs = value.trim().parse::<u64>().map_err(|_| ClipixError::Config {
            message: format!("CLIPIX_PROCESS_TIMEOUT must be a number of seconds, got '{}'", value),
        })?;
        config.tools.process_timeout_secs = Some(secs);
    }
    if let Some(value) = lookup("CLIPIX_TRANSCRIPTION_API_KEY") {
        config.transcription.api_key = Some(value);
    }
    if let Some(value) = lookup("CLIPIX_TRANSCRIPTION_API_BASE") {
        config.transcription.api_base = value;
    }
    if let Some(value) = lookup("CLIPIX_LOG_LEVEL") {
        config.logging.level = LogLevel::parse(&value)?;
    }
    if let Some(value) = lookup("CLIPIX_LOG_FORMAT") {
        config.logging.format = LogFormat::parse(&value)?;
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut AppConfig, overrides: &ConfigOverrides) {
    if let Some(dir) = &overrides.upload_dir {
        config.storage.upload_dir = dir.clone();
    }
    if let Some(level) = overrides.log_level {
        config.logging.level = level;
    }
    if let Some(format) = overrides.log_format {
        config.logging.format = format;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.tools.process_timeout_secs = Some(secs);
    }
}
