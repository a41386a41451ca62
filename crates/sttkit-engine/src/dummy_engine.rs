use crate::engine_trait::{RecognitionWorker, SttEngine};
use async_trait::async_trait;
use sttkit_core::{AudioConfig, EngineState, SpeechConfig, SpeechResult, SttError};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const PARTIAL_CONFIDENCE: f32 = 0.6;
const FINAL_CONFIDENCE: f32 = 1.0;

/// No-op test backend. Needs no model (an empty `model_path` is the normal
/// case; a non-empty path must still exist).
///
/// Pull mode returns one final result per chunk with deterministic
/// placeholder text (`dummy transcription (<n> bytes)`) and a timestamp
/// computed from the total PCM fed so far. Streaming mode emits synthetic
/// utterances on a cadence derived from `max_silence_ms`: one partial
/// (confidence 0.6) followed by one final (confidence 1.0) each, finals only
/// when partials are disabled. Results below `min_confidence` are suppressed.
/// `stop_recognition` flushes a pending partial as a final result.
pub struct DummyEngine {
    state: EngineState,
    ctx: Option<EngineContext>,
    bytes_fed: u64,
    worker: Option<RecognitionWorker>,
}

#[derive(Clone)]
struct EngineContext {
    speech: SpeechConfig,
    audio: AudioConfig,
}

impl DummyEngine {
    pub fn new() -> Self {
        Self {
            state: EngineState::Uninitialized,
            ctx: None,
            bytes_fed: 0,
            worker: None,
        }
    }
}

impl Default for DummyEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SttEngine for DummyEngine {
    fn name(&self) -> &str {
        "dummy"
    }

    fn supported_languages(&self) -> &[&str] {
        &["en"]
    }

    async fn initialize(
        &mut self,
        speech: SpeechConfig,
        audio: AudioConfig,
    ) -> Result<(), SttError> {
        if self.state != EngineState::Uninitialized {
            return Err(SttError::InvalidState {
                op: "initialize",
                state: self.state,
            });
        }
        audio.validate()?;
        speech.validate()?;
        if !self.supported_languages().contains(&speech.language.as_str()) {
            return Err(SttError::UnsupportedLanguage(speech.language));
        }
        if !speech.model_path.as_os_str().is_empty() && !speech.model_path.exists() {
            return Err(SttError::ModelNotFound(speech.model_path));
        }

        tracing::info!(
            language = %speech.language,
            sample_rate = audio.sample_rate,
            channels = audio.channels,
            "dummy engine initialized"
        );
        self.ctx = Some(EngineContext { speech, audio });
        self.bytes_fed = 0;
        self.state = EngineState::Ready;
        Ok(())
    }

    fn start_recognition(
        &mut self,
    ) -> Result<mpsc::UnboundedReceiver<SpeechResult>, SttError> {
        if self.state != EngineState::Ready {
            return Err(SttError::InvalidState {
                op: "start_recognition",
                state: self.state,
            });
        }
        let Some(ctx) = &self.ctx else {
            return Err(SttError::InvalidState {
                op: "start_recognition",
                state: self.state,
            });
        };
        let speech = ctx.speech.clone();

        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_stream(speech, result_tx, stop_rx));

        self.worker = Some(RecognitionWorker { stop_tx, handle });
        self.state = EngineState::Recognizing;
        Ok(result_rx)
    }

    async fn stop_recognition(&mut self) -> Result<(), SttError> {
        if let Some(worker) = self.worker.take() {
            worker.stop().await;
            self.state = EngineState::Ready;
            tracing::debug!("dummy engine recognition stopped");
        }
        Ok(())
    }

    async fn process_audio(&mut self, audio: &[u8]) -> Result<SpeechResult, SttError> {
        if self.state != EngineState::Ready {
            return Err(SttError::InvalidState {
                op: "process_audio",
                state: self.state,
            });
        }
        let Some(ctx) = &self.ctx else {
            return Err(SttError::InvalidState {
                op: "process_audio",
                state: self.state,
            });
        };
        if audio.is_empty() {
            return Err(SttError::Processing("empty audio buffer".to_string()));
        }

        let bytes_per_second = ctx.audio.bytes_per_second();
        self.bytes_fed += audio.len() as u64;
        let timestamp = self.bytes_fed as f64 / bytes_per_second as f64;

        Ok(SpeechResult {
            text: format!("dummy transcription ({} bytes)", audio.len()),
            confidence: FINAL_CONFIDENCE,
            is_final: true,
            timestamp,
        })
    }

    fn is_recognizing(&self) -> bool {
        self.state == EngineState::Recognizing
    }
}

async fn run_stream(
    speech: SpeechConfig,
    result_tx: mpsc::UnboundedSender<SpeechResult>,
    mut stop_rx: mpsc::UnboundedReceiver<()>,
) {
    let cadence = Duration::from_millis((speech.max_silence_ms / 2).max(1));
    let started = Instant::now();
    let mut utterance: u64 = 0;

    loop {
        utterance += 1;
        let text = format!("dummy utterance {utterance}");

        let mut pending: Option<SpeechResult> = None;
        if speech.enable_partial_results {
            let partial = SpeechResult {
                text: text.clone(),
                confidence: PARTIAL_CONFIDENCE,
                is_final: false,
                timestamp: started.elapsed().as_secs_f64(),
            };
            pending = Some(partial.clone());
            if partial.confidence >= speech.min_confidence {
                let _ = result_tx.send(partial);
            }
        }

        tokio::select! {
            _ = stop_rx.recv() => {
                // Flush the pending partial as the utterance's final result
                if let Some(mut partial) = pending.take() {
                    partial.is_final = true;
                    partial.confidence = FINAL_CONFIDENCE;
                    partial.timestamp = started.elapsed().as_secs_f64();
                    let _ = result_tx.send(partial);
                }
                break;
            }
            _ = tokio::time::sleep(cadence) => {}
        }

        let fin = SpeechResult {
            text,
            confidence: FINAL_CONFIDENCE,
            is_final: true,
            timestamp: started.elapsed().as_secs_f64(),
        };
        if fin.confidence >= speech.min_confidence {
            let _ = result_tx.send(fin);
        }

        tokio::select! {
            _ = stop_rx.recv() => break,
            _ = tokio::time::sleep(cadence) => {}
        }
    }

    tracing::debug!(utterances = utterance, "dummy recognition task exiting");
}
