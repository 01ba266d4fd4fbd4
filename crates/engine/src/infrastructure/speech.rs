//! Speech synthesis for child dialogue (OpenAI-compatible `/audio/speech`).
//!
//! Synthesised clips are not played server-side; the most recent one is kept
//! in a [`VoiceClipStore`] for the presentation layer to fetch and play.

use async_trait::async_trait;
use growtogether_domain::{Age, ChildGender, LifeStage};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{VoiceError, VoiceLine, VoicePort};

pub const DEFAULT_TTS_MODEL: &str = "tts-1";

const SPEECH_TIMEOUT_SECS: u64 = 30;

/// A synthesised utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceClip {
    pub text: String,
    pub content_type: String,
    pub audio: Vec<u8>,
}

/// Holds the latest synthesised clip.
#[derive(Debug, Default)]
pub struct VoiceClipStore {
    latest: RwLock<Option<VoiceClip>>,
}

impl VoiceClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn store(&self, clip: VoiceClip) {
        *self.latest.write().await = Some(clip);
    }

    pub async fn latest(&self) -> Option<VoiceClip> {
        self.latest.read().await.clone()
    }
}

/// Pick a synthesis voice that roughly matches the child.
pub fn voice_for(age: Age, gender: ChildGender) -> &'static str {
    match (age.stage(), gender) {
        (LifeStage::Infant | LifeStage::Toddler | LifeStage::Preschool, _) => "shimmer",
        (LifeStage::Elementary, ChildGender::Girl) => "nova",
        (LifeStage::Elementary, ChildGender::Boy) => "fable",
        (LifeStage::Teen | LifeStage::Adult, ChildGender::Girl) => "alloy",
        (LifeStage::Teen | LifeStage::Adult, ChildGender::Boy) => "echo",
    }
}

/// Client for an OpenAI-compatible speech endpoint.
pub struct SpeechClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    clips: Arc<VoiceClipStore>,
}

impl SpeechClient {
    pub fn new(base_url: &str, model: &str, clips: Arc<VoiceClipStore>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(SPEECH_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            clips,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }
}

#[async_trait]
impl VoicePort for SpeechClient {
    async fn speak(&self, line: VoiceLine) -> Result<(), VoiceError> {
        let body = build_request(&self.model, &line);

        let mut builder = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                VoiceError::Unavailable
            } else {
                VoiceError::SynthesisFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VoiceError::SynthesisFailed(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();
        let audio = response
            .bytes()
            .await
            .map_err(|e| VoiceError::SynthesisFailed(e.to_string()))?;

        tracing::debug!(voice = body.voice, bytes = audio.len(), "Synthesised child line");

        self.clips
            .store(VoiceClip {
                text: line.text,
                content_type,
                audio: audio.to_vec(),
            })
            .await;
        Ok(())
    }
}

/// Voice port that says nothing. Used when no speech endpoint is configured.
pub struct SilentVoice;

#[async_trait]
impl VoicePort for SilentVoice {
    async fn speak(&self, line: VoiceLine) -> Result<(), VoiceError> {
        tracing::trace!(text = %line.text, "Voice disabled, skipping line");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest {
    model: String,
    input: String,
    voice: &'static str,
    response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
}

fn build_request(model: &str, line: &VoiceLine) -> SpeechRequest {
    SpeechRequest {
        model: model.to_string(),
        input: line.text.clone(),
        voice: voice_for(line.age, line.gender),
        response_format: "mp3",
        instructions: line.emotion.as_ref().map(|emotion| {
            format!(
                "Speak as a {}-year-old child. Emotion: {}.",
                line.age.years(),
                emotion
            )
        }),
    }
}
