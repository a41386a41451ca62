use crate::engine_trait::{RecognitionWorker, SttEngine};
use async_trait::async_trait;
use sttkit_core::{AudioConfig, EngineState, SpeechConfig, SpeechResult, SttError};
use tokio::sync::mpsc;

/// Alternative offline backend. Stub with the same discipline as the whisper
/// engine; vosk models are directories, so `model_path` must name an existing
/// directory.
pub struct VoskEngine {
    state: EngineState,
    audio: Option<AudioConfig>,
    bytes_fed: u64,
    worker: Option<RecognitionWorker>,
}

impl VoskEngine {
    pub fn new() -> Self {
        Self {
            state: EngineState::Uninitialized,
            audio: None,
            bytes_fed: 0,
            worker: None,
        }
    }
}

impl Default for VoskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SttEngine for VoskEngine {
    fn name(&self) -> &str {
        "vosk"
    }

    fn supported_languages(&self) -> &[&str] {
        &["en", "ru"]
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
        if speech.model_path.as_os_str().is_empty() {
            return Err(SttError::InvalidConfig(
                "vosk requires a model directory, model_path is empty".to_string(),
            ));
        }
        if !speech.model_path.is_dir() {
            return Err(SttError::ModelNotFound(speech.model_path));
        }

        tracing::info!(
            model_path = %speech.model_path.display(),
            language = %speech.language,
            "vosk engine initialized (stub, model not loaded)"
        );
        self.audio = Some(audio);
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

        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel::<()>();
        let handle = tokio::spawn(async move {
            let _result_tx = result_tx;
            let _ = stop_rx.recv().await;
        });

        self.worker = Some(RecognitionWorker { stop_tx, handle });
        self.state = EngineState::Recognizing;
        Ok(result_rx)
    }

    async fn stop_recognition(&mut self) -> Result<(), SttError> {
        if let Some(worker) = self.worker.take() {
            worker.stop().await;
            self.state = EngineState::Ready;
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
        let Some(audio_cfg) = &self.audio else {
            return Err(SttError::InvalidState {
                op: "process_audio",
                state: self.state,
            });
        };
        if audio.is_empty() {
            return Err(SttError::Processing("empty audio buffer".to_string()));
        }

        let bytes_per_second = audio_cfg.bytes_per_second();
        self.bytes_fed += audio.len() as u64;

        Ok(SpeechResult {
            text: String::new(),
            confidence: 0.0,
            is_final: false,
            timestamp: self.bytes_fed as f64 / bytes_per_second as f64,
        })
    }

    fn is_recognizing(&self) -> bool {
        self.state == EngineState::Recognizing
    }
}
