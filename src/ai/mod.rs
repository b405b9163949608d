mod claude;
pub mod extractor;
pub mod fallback;
mod gemini;
mod generator;
pub mod prompts;
#[cfg(test)]
pub(crate) mod testing;
pub mod validator;

use std::sync::Arc;

use async_trait::async_trait;

pub use claude::ClaudeClient;
pub use gemini::GeminiClient;
pub use generator::PostGenerator;

use crate::config::Config;
use crate::error::Result;

/// A hosted text-generation endpoint. Output is free-form and untrusted.
#[async_trait]
pub trait CompletionService: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, model: &str, prompt: &str) -> Result<String>;
}

/// Picks Gemini when its key is configured, then Anthropic. Returns `None` without credentials.
pub fn completion_from_config(
    config: &Config,
) -> Result<Option<(Arc<dyn CompletionService>, String)>> {
    let timeout = config.completion_timeout();

    if let Some(key) = &config.gemini_api_key {
        let client = GeminiClient::new(key.clone(), timeout)?;
        return Ok(Some((Arc::new(client), config.gemini_model.clone())));
    }

    if let Some(key) = &config.anthropic_api_key {
        let client = ClaudeClient::new(key.clone(), timeout)?;
        return Ok(Some((Arc::new(client), config.anthropic_model.clone())));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_is_preferred_over_anthropic() {
        let config = Config {
            gemini_api_key: Some("g".to_string()),
            anthropic_api_key: Some("a".to_string()),
            ..Config::default()
        };
        let (service, model) = completion_from_config(&config).unwrap().unwrap();
        assert_eq!(service.name(), "Gemini");
        assert_eq!(model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn anthropic_is_used_when_alone() {
        let config = Config {
            anthropic_api_key: Some("a".to_string()),
            ..Config::default()
        };
        let (service, model) = completion_from_config(&config).unwrap().unwrap();
        assert_eq!(service.name(), "Anthropic");
        assert_eq!(model, "claude-3-5-haiku-20241022");
    }

    #[test]
    fn no_credentials_means_no_service() {
        assert!(completion_from_config(&Config::default()).unwrap().is_none());
    }
}
