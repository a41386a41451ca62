use crate::engine_trait::SttEngine;
use sttkit_core::{AudioConfig, SpeechConfig, SpeechResult, SttError};
use tokio::sync::mpsc;

/// Channel-driven pull-mode runner around one engine.
///
/// The host initializes the engine, then feeds it each PCM chunk received on
/// the audio channel and forwards every result on the result channel.
/// Dropping the audio sender shuts the host down; `shutdown` joins the task.
pub struct EngineHost {
    audio_tx: Option<mpsc::UnboundedSender<Vec<u8>>>,
    result_rx: Option<mpsc::UnboundedReceiver<SpeechResult>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl EngineHost {
    pub async fn spawn(
        mut engine: Box<dyn SttEngine>,
        speech: SpeechConfig,
        audio: AudioConfig,
    ) -> Result<Self, SttError> {
        engine.initialize(speech, audio).await?;

        let (audio_tx, mut audio_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            while let Some(chunk) = audio_rx.recv().await {
                match engine.process_audio(&chunk).await {
                    Ok(result) => {
                        if result_tx.send(result).is_err() {
                            // Result receiver dropped
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(engine = engine.name(), "chunk processing failed: {e}");
                    }
                }
            }
            tracing::debug!(engine = engine.name(), "audio sender dropped, host task exiting");
        });

        Ok(Self {
            audio_tx: Some(audio_tx),
            result_rx: Some(result_rx),
            handle: Some(handle),
        })
    }

    pub fn audio_sender(&self) -> Option<mpsc::UnboundedSender<Vec<u8>>> {
        self.audio_tx.clone()
    }

    pub fn take_result_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<SpeechResult>> {
        self.result_rx.take()
    }

    pub async fn shutdown(&mut self) {
        self.audio_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}
