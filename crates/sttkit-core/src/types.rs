use crate::error::SttError;
use serde::Deserialize;
use std::path::PathBuf;

/// Description of the raw PCM stream an engine will be fed.
///
/// Built once by the caller and passed to `initialize`; never mutated
/// afterwards. The same format must be used for every chunk handed to the
/// engine, in either recognition mode.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u16,

    #[serde(default = "default_bits_per_sample")]
    pub bits_per_sample: u16,

    /// Suggested chunk size in samples for callers that buffer audio.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            bits_per_sample: default_bits_per_sample(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<(), SttError> {
        if self.sample_rate == 0 {
            return Err(SttError::InvalidConfig("sample_rate must be positive".to_string()));
        }
        if self.channels == 0 {
            return Err(SttError::InvalidConfig("channels must be positive".to_string()));
        }
        if !matches!(self.bits_per_sample, 8 | 16 | 24 | 32) {
            return Err(SttError::InvalidConfig(format!(
                "unsupported bits_per_sample: {} (expected 8, 16, 24 or 32)",
                self.bits_per_sample,
            )));
        }
        Ok(())
    }

    /// Raw PCM bytes per second of audio in this format.
    pub fn bytes_per_second(&self) -> u64 {
        self.sample_rate as u64 * self.channels as u64 * (self.bits_per_sample as u64 / 8)
    }
}

/// Engine behavior parameters, passed once at `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Path to the model resource. Empty means "engine default or no model
    /// needed"; engines that require a model reject an empty path.
    #[serde(default)]
    pub model_path: PathBuf,

    #[serde(default = "default_language")]
    pub language: String,

    /// Results below this confidence are suppressed by the engine.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    #[serde(default = "default_true")]
    pub enable_partial_results: bool,

    /// Silence duration after which an in-progress utterance is finalized.
    #[serde(default = "default_max_silence_ms")]
    pub max_silence_ms: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            language: default_language(),
            min_confidence: default_min_confidence(),
            enable_partial_results: default_true(),
            max_silence_ms: default_max_silence_ms(),
        }
    }
}

impl SpeechConfig {
    pub fn validate(&self) -> Result<(), SttError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(SttError::InvalidConfig(format!(
                "min_confidence must be within [0.0, 1.0], got {}",
                self.min_confidence,
            )));
        }
        if self.language.is_empty() {
            return Err(SttError::InvalidConfig("language must not be empty".to_string()));
        }
        Ok(())
    }
}

/// One recognized piece of speech.
///
/// Partial results (`is_final == false`) for an utterance always precede its
/// single final result, and timestamps within an utterance are monotonic.
#[derive(Debug, Clone)]
pub struct SpeechResult {
    pub text: String,
    /// Always within [0.0, 1.0].
    pub confidence: f32,
    pub is_final: bool,
    /// Seconds, relative to the start of recognition.
    pub timestamp: f64,
}

/// Lifecycle state of an engine instance.
///
/// `Uninitialized → Ready ⇄ Recognizing`; teardown is permitted from any
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Recognizing,
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Ready => "ready",
            EngineState::Recognizing => "recognizing",
        };
        f.write_str(s)
    }
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_channels() -> u16 {
    1
}

fn default_bits_per_sample() -> u16 {
    16
}

fn default_buffer_size() -> u32 {
    4096
}

fn default_language() -> String {
    "en".to_string()
}

fn default_min_confidence() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_max_silence_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_config_defaults() {
        let config = AudioConfig::default();
        assert_eq!(config.sample_rate, 16000);
        assert_eq!(config.channels, 1);
        assert_eq!(config.bits_per_sample, 16);
        assert_eq!(config.buffer_size, 4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_audio_config_rejects_zero_sample_rate() {
        let config = AudioConfig {
            sample_rate: 0,
            ..AudioConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_audio_config_rejects_zero_channels() {
        let config = AudioConfig {
            channels: 0,
            ..AudioConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_audio_config_rejects_odd_bit_depth() {
        let config = AudioConfig {
            bits_per_sample: 12,
            ..AudioConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bits_per_sample"));
    }

    #[test]
    fn test_audio_config_accepts_all_valid_bit_depths() {
        for bits in [8, 16, 24, 32] {
            let config = AudioConfig {
                bits_per_sample: bits,
                ..AudioConfig::default()
            };
            assert!(config.validate().is_ok(), "bits_per_sample={bits}");
        }
    }

    #[test]
    fn test_audio_config_bytes_per_second() {
        let config = AudioConfig::default();
        // 16000 Hz * 1 ch * 2 bytes
        assert_eq!(config.bytes_per_second(), 32000);

        let stereo = AudioConfig {
            channels: 2,
            ..AudioConfig::default()
        };
        assert_eq!(stereo.bytes_per_second(), 64000);
    }

    #[test]
    fn test_speech_config_defaults() {
        let config = SpeechConfig::default();
        assert!(config.model_path.as_os_str().is_empty());
        assert_eq!(config.language, "en");
        assert_eq!(config.min_confidence, 0.5);
        assert!(config.enable_partial_results);
        assert_eq!(config.max_silence_ms, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_speech_config_rejects_out_of_range_confidence() {
        let config = SpeechConfig {
            min_confidence: 1.5,
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SpeechConfig {
            min_confidence: -0.1,
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_speech_config_rejects_empty_language() {
        let config = SpeechConfig {
            language: String::new(),
            ..SpeechConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_speech_result_fields() {
        let result = SpeechResult {
            text: "hello world".to_string(),
            confidence: 0.9,
            is_final: true,
            timestamp: 1.5,
        };
        assert_eq!(result.text, "hello world");
        assert_eq!(result.confidence, 0.9);
        assert!(result.is_final);
        assert_eq!(result.timestamp, 1.5);
    }

    #[test]
    fn test_engine_state_display() {
        assert_eq!(EngineState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(EngineState::Ready.to_string(), "ready");
        assert_eq!(EngineState::Recognizing.to_string(), "recognizing");
    }
}
