use crate::dummy_engine::DummyEngine;
use crate::engine_trait::SttEngine;
#[cfg(feature = "vosk")]
use crate::vosk_engine::VoskEngine;
#[cfg(feature = "whisper")]
use crate::whisper_engine::WhisperEngine;

/// Closed enumeration of the concrete engine implementations. Used only at
/// construction time through [`EngineFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Whisper,
    Vosk,
    Dummy,
}

impl EngineKind {
    pub const ALL: [EngineKind; 3] = [EngineKind::Whisper, EngineKind::Vosk, EngineKind::Dummy];

    pub fn display_name(&self) -> &'static str {
        match self {
            EngineKind::Whisper => "Whisper (offline neural)",
            EngineKind::Vosk => "Vosk (offline)",
            EngineKind::Dummy => "Dummy (test stub)",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EngineKind::Whisper => "whisper",
            EngineKind::Vosk => "vosk",
            EngineKind::Dummy => "dummy",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whisper" => Ok(EngineKind::Whisper),
            "vosk" => Ok(EngineKind::Vosk),
            "dummy" => Ok(EngineKind::Dummy),
            other => Err(format!("unknown engine kind: {other}")),
        }
    }
}

/// Maps an [`EngineKind`] to a constructed, not-yet-initialized engine.
pub struct EngineFactory;

impl EngineFactory {
    /// `None` means the kind is not compiled into this build; a returned
    /// engine is fully constructed and exclusively owned by the caller.
    pub fn create(kind: EngineKind) -> Option<Box<dyn SttEngine>> {
        match kind {
            #[cfg(feature = "whisper")]
            EngineKind::Whisper => Some(Box::new(WhisperEngine::new())),
            #[cfg(not(feature = "whisper"))]
            EngineKind::Whisper => None,

            #[cfg(feature = "vosk")]
            EngineKind::Vosk => Some(Box::new(VoskEngine::new())),
            #[cfg(not(feature = "vosk"))]
            EngineKind::Vosk => None,

            EngineKind::Dummy => Some(Box::new(DummyEngine::new())),
        }
    }

    /// Kinds this build can actually construct.
    pub fn available_kinds() -> Vec<EngineKind> {
        let mut kinds = Vec::new();
        #[cfg(feature = "whisper")]
        kinds.push(EngineKind::Whisper);
        #[cfg(feature = "vosk")]
        kinds.push(EngineKind::Vosk);
        kinds.push(EngineKind::Dummy);
        kinds
    }
}
