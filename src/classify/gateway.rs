//! Classification gateway
//!
//! Stateless adapter to the external text-classification provider. Sends
//! raw content plus the two closed label lists, and re-validates the reply
//! against those lists before handing it to the caller: the provider is not
//! trusted to stay inside its schema. Never touches the record store.

use crate::classify::types::{
    GenerateContentRequest, GenerateContentResponse, RawSuggestion, Suggestion,
};
use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Capability interface for (sentiment, topic) suggestions.
///
/// The concrete provider is injected at the presentation boundary so tests
/// run against a local double.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Suggest labels for a piece of content
    async fn suggest(&self, content: &str) -> Result<Suggestion>;
}

/// Gemini-backed classifier
pub struct GeminiClassifier {
    config: ClassifierConfig,
    client: reqwest::Client,
}

impl GeminiClassifier {
    /// Create a classifier from provider configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Resolve the API key from the configured environment variable
    fn resolve_credential(&self) -> Result<String> {
        std::env::var(&self.config.api_key_env).map_err(|_| {
            Error::Config(format!(
                "{} environment variable not set",
                self.config.api_key_env
            ))
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Classifier for GeminiClassifier {
    async fn suggest(&self, content: &str) -> Result<Suggestion> {
        let api_key = self.resolve_credential()?;
        let request = GenerateContentRequest::for_content(content);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Classification(format!("Provider unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Classification(format!(
                "Provider returned {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Classification(format!("Malformed provider response: {}", e)))?;

        let text = body
            .first_text()
            .ok_or_else(|| Error::Classification("Empty provider response".to_string()))?;

        let suggestion = parse_suggestion(text)?;
        tracing::debug!(sentiment = %suggestion.sentiment, topic = %suggestion.topic, "suggestion received");
        Ok(suggestion)
    }
}

/// Parse and validate the provider's JSON payload.
///
/// Both values must be members of their enumeration; anything else fails
/// rather than being coerced to a default label.
pub fn parse_suggestion(text: &str) -> Result<Suggestion> {
    let raw: RawSuggestion = serde_json::from_str(text.trim())
        .map_err(|e| Error::Classification(format!("Unparseable suggestion: {}", e)))?;

    let sentiment = raw
        .sentiment
        .parse()
        .map_err(|_| Error::Classification(format!("Invalid sentiment received: {}", raw.sentiment)))?;
    let topic = raw
        .topic
        .parse()
        .map_err(|_| Error::Classification(format!("Invalid topic received: {}", raw.topic)))?;

    Ok(Suggestion { sentiment, topic })
}
