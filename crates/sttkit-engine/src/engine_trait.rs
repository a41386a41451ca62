use async_trait::async_trait;
use sttkit_core::{AudioConfig, SpeechConfig, SpeechResult, SttError};
use tokio::sync::mpsc;

/// Contract every concrete speech recognizer satisfies, independent of its
/// internal algorithm.
///
/// Lifecycle: `Uninitialized → Ready ⇄ Recognizing`. `initialize` must
/// succeed before any recognition call; on initialization failure the engine
/// rolls back to `Uninitialized` with no observable half-initialized state.
///
/// Each instance is exclusively owned by one caller. The two recognition
/// modes are mutually exclusive per instance: `process_audio` while a
/// streaming session is active is a state error.
#[async_trait]
pub trait SttEngine: Send + Sync {
    /// Stable human-readable identifier, used for diagnostics and
    /// configuration echoing.
    fn name(&self) -> &str;

    /// Closed set of language codes this implementation can recognize.
    fn supported_languages(&self) -> &[&str];

    /// One-time setup: validate both configs, load the model, allocate
    /// decoder state. Transitions `Uninitialized → Ready`.
    async fn initialize(
        &mut self,
        speech: SpeechConfig,
        audio: AudioConfig,
    ) -> Result<(), SttError>;

    /// Begin continuous recognition. Returns immediately with the receive
    /// end of the result channel; the engine produces results from its own
    /// background task (zero or more partials followed by exactly one final
    /// per utterance, finals only when partials are disabled). Fails when the
    /// engine is not `Ready`.
    fn start_recognition(
        &mut self,
    ) -> Result<mpsc::UnboundedReceiver<SpeechResult>, SttError>;

    /// Halt continuous recognition and land in `Ready`. No-op when not
    /// recognizing. Engines document what happens to a pending partial; the
    /// bundled engines flush it as a final result when partials are enabled.
    async fn stop_recognition(&mut self) -> Result<(), SttError>;

    /// Pull-mode alternative: decode one chunk of raw PCM matching the
    /// configured `AudioConfig` and return the current best result. Safe to
    /// call repeatedly with successive chunks of one utterance; internal
    /// state accumulates across calls.
    async fn process_audio(&mut self, audio: &[u8]) -> Result<SpeechResult, SttError>;

    /// Current state, without side effects.
    fn is_recognizing(&self) -> bool;
}

/// Handle to an engine's background recognition task. Stopping is a message
/// on the channel, not a flag; dropping the handle has the same effect.
pub(crate) struct RecognitionWorker {
    pub(crate) stop_tx: mpsc::UnboundedSender<()>,
    pub(crate) handle: tokio::task::JoinHandle<()>,
}

impl RecognitionWorker {
    pub(crate) async fn stop(self) {
        let _ = self.stop_tx.send(());
        drop(self.stop_tx);
        let _ = self.handle.await;
    }
}
