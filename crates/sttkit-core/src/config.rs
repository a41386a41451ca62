use crate::error::ConfigError;
use crate::types::{AudioConfig, SpeechConfig};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Application configuration as read from a TOML file.
///
/// Every field falls back to the documented default, so an empty file (or no
/// file at all) yields a working dummy-engine setup.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Engine kind selector, resolved against the factory by the caller.
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub audio: AudioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            engine: default_engine(),
            speech: SpeechConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_engine() -> String {
    "dummy".to_string()
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_valid_toml() {
        let toml_str = r#"
engine = "whisper"

[general]
log_level = "debug"

[speech]
model_path = "./models/ggml-base.bin"
language = "de"
min_confidence = 0.7
enable_partial_results = false
max_silence_ms = 1500

[audio]
sample_rate = 8000
channels = 2
bits_per_sample = 8
buffer_size = 1024
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.engine, "whisper");
        assert_eq!(
            config.speech.model_path,
            std::path::PathBuf::from("./models/ggml-base.bin"),
        );
        assert_eq!(config.speech.language, "de");
        assert_eq!(config.speech.min_confidence, 0.7);
        assert!(!config.speech.enable_partial_results);
        assert_eq!(config.speech.max_silence_ms, 1500);
        assert_eq!(config.audio.sample_rate, 8000);
        assert_eq!(config.audio.channels, 2);
        assert_eq!(config.audio.bits_per_sample, 8);
        assert_eq!(config.audio.buffer_size, 1024);
    }

    #[test]
    fn test_config_default_values() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.engine, "dummy");
        assert!(config.speech.model_path.as_os_str().is_empty());
        assert_eq!(config.speech.language, "en");
        assert_eq!(config.speech.min_confidence, 0.5);
        assert!(config.speech.enable_partial_results);
        assert_eq!(config.speech.max_silence_ms, 2000);
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.audio.channels, 1);
        assert_eq!(config.audio.bits_per_sample, 16);
        assert_eq!(config.audio.buffer_size, 4096);
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml_str = r#"
[speech]
language = "ja"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.speech.language, "ja");
        // Untouched sections keep their defaults
        assert_eq!(config.engine, "dummy");
        assert_eq!(config.audio.sample_rate, 16000);
    }

    #[test]
    fn test_config_env_var_interpolation() {
        std::env::set_var("STTKIT_TEST_MODEL", "/opt/models/base.bin");
        let toml_str = r#"
[speech]
model_path = "${STTKIT_TEST_MODEL}"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(
            config.speech.model_path,
            std::path::PathBuf::from("/opt/models/base.bin"),
        );
        std::env::remove_var("STTKIT_TEST_MODEL");
    }

    #[test]
    fn test_config_missing_env_var_error() {
        let toml_str = r#"
[speech]
model_path = "${DEFINITELY_DOES_NOT_EXIST_12345}"
"#;
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("DEFINITELY_DOES_NOT_EXIST_12345"),
        );
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let toml_str = "this is not valid toml [[[";
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = std::env::temp_dir().join("sttkit_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
engine = "dummy"

[general]
log_level = "warn"

[audio]
sample_rate = 44100
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.audio.sample_rate, 44100);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_load_from_file_not_found() {
        let result = AppConfig::load_from_file(std::path::Path::new("/nonexistent/path.toml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to read config file"),
        );
    }
}
