use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::prompts::ChatMessage;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;
const CREDENTIALS_FILE: &str = ".config/sentiq/credentials.toml";

/// Resolve the API key: env var first, then the credentials file.
pub fn resolve_api_key(api_key_env: &str) -> Result<String> {
    if let Ok(key) = std::env::var(api_key_env)
        && !key.is_empty()
    {
        return Ok(key);
    }

    if let Some(home) = std::env::var_os("HOME") {
        let creds_path = std::path::Path::new(&home).join(CREDENTIALS_FILE);
        if let Ok(contents) = std::fs::read_to_string(&creds_path)
            && let Ok(table) = contents.parse::<toml::Table>()
            && let Some(key) = table.get("api_key").and_then(|v| v.as_str())
        {
            debug!("using API key from {}", creds_path.display());
            return Ok(key.to_string());
        }
    }

    Err(Error::ConfigValidation(format!(
        "API key not found in ${api_key_env} or ~/{CREDENTIALS_FILE}"
    )))
}

// ---------------------------------------------------------------------------
// Client abstraction (for testability)
// ---------------------------------------------------------------------------

pub trait ChatClient {
    /// Send one chat-completion request and return the reply text.
    fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String>;
}

impl<C: ChatClient> ChatClient for &C {
    fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        (**self).complete(messages, temperature)
    }
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpChatClient {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl HttpChatClient {
    pub fn new(config: &Config, api_key: String) -> Self {
        Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

impl ChatClient for HttpChatClient {
    fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
        });

        let mut backoff_ms = INITIAL_BACKOFF_MS;
        for attempt in 1..=MAX_RETRIES {
            match ureq::post(&url)
                .set("Authorization", &format!("Bearer {}", self.api_key))
                .set("Content-Type", "application/json")
                .timeout(self.timeout)
                .send_json(&body)
            {
                Ok(response) => {
                    let parsed: CompletionResponse = response.into_json().map_err(|e| {
                        Error::Api(format!("failed to parse completion response: {e}"))
                    })?;
                    return parsed
                        .choices
                        .into_iter()
                        .next()
                        .map(|choice| choice.message.content)
                        .ok_or_else(|| Error::Api("completion response has no choices".to_string()));
                }
                Err(ref e) if attempt < MAX_RETRIES && is_retryable(e) => {
                    warn!(
                        attempt,
                        error = %e,
                        backoff_ms,
                        "retrying chat completion after transient error"
                    );
                    thread::sleep(Duration::from_millis(backoff_ms));
                    backoff_ms *= 2;
                }
                Err(e) => {
                    return Err(Error::Api(format!("chat completion request failed: {e}")));
                }
            }
        }
        unreachable!()
    }
}

/// Only retry rate-limits (429), server errors (5xx), and transport errors.
fn is_retryable(err: &ureq::Error) -> bool {
    match err {
        ureq::Error::Status(code, _) => *code == 429 || *code >= 500,
        ureq::Error::Transport(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const TEST_ENV: &str = "SENTIQ_TEST_API_KEY";

    #[test]
    #[serial]
    fn test_resolve_key_from_env() {
        unsafe { std::env::set_var(TEST_ENV, "sk-test") };
        assert_eq!(resolve_api_key(TEST_ENV).unwrap(), "sk-test");
        unsafe { std::env::remove_var(TEST_ENV) };
    }

    #[test]
    #[serial]
    fn test_resolve_key_empty_env_falls_through() {
        let home = tempfile::TempDir::new().unwrap();
        unsafe {
            std::env::set_var(TEST_ENV, "");
            std::env::set_var("HOME", home.path());
        }
        let err = resolve_api_key(TEST_ENV).unwrap_err();
        assert!(err.to_string().contains("API key not found"));
        unsafe { std::env::remove_var(TEST_ENV) };
    }

    #[test]
    #[serial]
    fn test_resolve_key_from_credentials_file() {
        let home = tempfile::TempDir::new().unwrap();
        let creds_dir = home.path().join(".config/sentiq");
        std::fs::create_dir_all(&creds_dir).unwrap();
        std::fs::write(creds_dir.join("credentials.toml"), "api_key = \"sk-file\"\n").unwrap();

        unsafe {
            std::env::remove_var(TEST_ENV);
            std::env::set_var("HOME", home.path());
        }
        assert_eq!(resolve_api_key(TEST_ENV).unwrap(), "sk-file");
    }

    #[test]
    #[serial]
    fn test_resolve_key_missing_everywhere() {
        let home = tempfile::TempDir::new().unwrap();
        unsafe {
            std::env::remove_var(TEST_ENV);
            std::env::set_var("HOME", home.path());
        }
        let err = resolve_api_key(TEST_ENV).unwrap_err();
        assert!(err.to_string().contains(TEST_ENV));
    }
}
