//! Application configuration

use std::env;
use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

use crate::infrastructure::chat_completions::{
    DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS,
};
use crate::infrastructure::speech::DEFAULT_TTS_MODEL;

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Chat completions base URL (OpenAI-compatible, including the version prefix)
    pub llm_base_url: String,
    /// Model used for scenario generation and evaluation
    pub llm_model: String,
    /// Bearer key for hosted endpoints
    pub llm_api_key: Option<String>,
    pub llm_timeout_secs: u64,

    /// Speech synthesis. `None` disables voice playback.
    pub speech: Option<SpeechConfig>,

    pub server_host: String,
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any)
    pub cors_allowed_origins: Option<String>,
}

/// Speech synthesis endpoint configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let llm_api_key = var("LLM_API_KEY");

        let speech = var("TTS_BASE_URL").map(|base_url| SpeechConfig {
            base_url,
            model: var("TTS_MODEL").unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string()),
            api_key: var("TTS_API_KEY").or_else(|| llm_api_key.clone()),
        });

        Ok(Self {
            llm_base_url: var("LLM_BASE_URL")
                .or_else(|| var("OLLAMA_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_model: var("LLM_MODEL")
                .or_else(|| var("OLLAMA_MODEL"))
                .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_api_key,
            llm_timeout_secs: match var("LLM_TIMEOUT_SECS") {
                Some(v) => v
                    .parse()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
                None => DEFAULT_LLM_TIMEOUT_SECS,
            },

            speech,

            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: var("SERVER_PORT")
                .or_else(|| var("PORT"))
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        })
    }

    /// Socket address to listen on. IPv6 hosts may be given with or without brackets.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let host = self.server_host.trim_start_matches('[').trim_end_matches(']');
        let ip: IpAddr = host
            .parse()
            .with_context(|| format!("SERVER_HOST is not an IP address: {}", self.server_host))?;
        Ok(SocketAddr::new(ip, self.server_port))
    }
}
