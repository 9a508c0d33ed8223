use thiserror::Error;
use tracing::{debug, warn};

use millet_core::voice::{Intent, classify, reply};
use millet_types::Language;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("speech recognition is not available")]
    Unavailable,

    #[error("speech recognition failed: {0}")]
    Recognition(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

/// Platform speech-to-text. Resolves with one final transcript.
#[allow(async_fn_in_trait)]
pub trait SpeechRecognizer {
    async fn listen(&mut self, locale: &str) -> Result<String, VoiceError>;
}

/// Platform text-to-speech. Resolves once speaking has finished.
#[allow(async_fn_in_trait)]
pub trait SpeechSynthesizer {
    async fn speak(&mut self, utterance: &Utterance) -> Result<(), VoiceError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            locale: language.speech_locale(),
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

/// One question and its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceTurn {
    pub transcript: String,
    pub intent: Intent,
    pub reply: &'static str,
    /// False when there was no synthesizer or it failed.
    pub spoken: bool,
}

/// Listen, classify, answer. Both speech capabilities are optional; every
/// method takes `&mut self`, so a session never listens while it speaks.
pub struct VoiceAssistant<R, S> {
    recognizer: Option<R>,
    synthesizer: Option<S>,
    language: Language,
}

impl<R: SpeechRecognizer, S: SpeechSynthesizer> VoiceAssistant<R, S> {
    pub fn new(recognizer: Option<R>, synthesizer: Option<S>, language: Language) -> Self {
        Self {
            recognizer,
            synthesizer,
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn can_listen(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Take one spoken command and answer it.
    pub async fn listen(&mut self) -> Result<VoiceTurn, VoiceError> {
        let recognizer = self.recognizer.as_mut().ok_or(VoiceError::Unavailable)?;
        let transcript = recognizer.listen(self.language.speech_locale()).await?;
        debug!("Heard '{}'", transcript);
        Ok(self.answer(&transcript).await)
    }

    /// Answer a command that is already text.
    pub async fn answer(&mut self, transcript: &str) -> VoiceTurn {
        let intent = classify(transcript);
        let text = reply(intent, self.language);

        let spoken = match self.synthesizer.as_mut() {
            Some(synth) => match synth.speak(&Utterance::new(text, self.language)).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Could not speak reply: {}", e);
                    false
                }
            },
            None => false,
        };

        VoiceTurn {
            transcript: transcript.to_string(),
            intent,
            reply: text,
            spoken,
        }
    }
}
