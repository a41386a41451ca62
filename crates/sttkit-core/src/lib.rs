pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, GeneralConfig};
pub use error::{ConfigError, SttError};
pub use types::{AudioConfig, EngineState, SpeechConfig, SpeechResult};
