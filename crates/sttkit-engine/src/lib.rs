pub mod dummy_engine;
pub mod engine_trait;
pub mod factory;
pub mod host;
#[cfg(feature = "vosk")]
pub mod vosk_engine;
#[cfg(feature = "whisper")]
pub mod whisper_engine;

pub use dummy_engine::DummyEngine;
pub use engine_trait::SttEngine;
pub use factory::{EngineFactory, EngineKind};
pub use host::EngineHost;
#[cfg(feature = "vosk")]
pub use vosk_engine::VoskEngine;
#[cfg(feature = "whisper")]
pub use whisper_engine::WhisperEngine;
