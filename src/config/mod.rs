//! Typed configuration from environment variables.
//!
//! Everything has a workable local default except the OpenAI key, which is
//! simply absent unless provided. Sensitive values are wrapped in
//! secrecy::SecretString to prevent log leaks.

use crate::error::{Error, Result};
use secrecy::SecretString;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    /// Provider key used when a request names an unknown provider.
    pub default_provider: String,
    /// Base URL of the local Ollama server.
    pub ollama_url: String,
    /// Model served by Ollama.
    pub ollama_model: String,
    /// OpenAI API key. The OpenAI provider is only registered when set.
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    /// Upper bound on one outbound completion call. No retry on elapse.
    pub completion_timeout: Duration,
    /// Optional OTLP endpoint (e.g. "http://localhost:4317").
    /// When `None`, telemetry uses a simple fmt layer for local dev.
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            default_provider: var_or("TELLER_DEFAULT_PROVIDER", "ollama"),
            ollama_url: var_or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: var_or("OLLAMA_MODEL", "llama3.2"),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().map(SecretString::from),
            openai_model: var_or("OPENAI_MODEL", "gpt-4"),
            completion_timeout: Duration::from_secs(parse_secs(
                "TELLER_COMPLETION_TIMEOUT_SECS",
                30,
            )?),
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok(),
            log_level: var_or("LOG_LEVEL", "info"),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_secs(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{name} must be an integer, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}
