//! Classification provider wire types
//!
//! Request/response shapes for the Gemini `generateContent` endpoint. The
//! provider is asked for `application/json` output constrained by a response
//! schema, and replies with a JSON document embedded in the first candidate
//! part.

use crate::insights::types::{Sentiment, Topic};
use serde::{Deserialize, Serialize};

/// A validated (sentiment, topic) suggestion for a piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub sentiment: Sentiment,
    pub topic: Topic,
}

/// Provider reply before local validation
#[derive(Debug, Deserialize)]
pub struct RawSuggestion {
    pub sentiment: String,
    pub topic: String,
}

/// `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

/// One content block of the request
#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<TextPart>,
}

/// A plain text part
#[derive(Debug, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

/// Structured-output settings for the request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

/// `generateContent` response body (only the fields we consume)
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

/// Content block of a candidate
#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A response part; non-text parts deserialize with an empty text
#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

impl GenerateContentRequest {
    /// Build the classification request for a piece of content: the prompt
    /// plus a response schema restricting each field to its closed label
    /// list.
    pub fn for_content(content: &str) -> Self {
        let sentiments: Vec<&str> = Sentiment::ALL.iter().map(|s| s.as_str()).collect();
        let topics: Vec<&str> = Topic::ALL.iter().map(|t| t.as_str()).collect();

        let prompt = format!(
            "Analyze the following content and determine its sentiment and topic.\n\
             Content: \"{}\"\n\n\
             Instructions:\n\
             1. Classify the sentiment as one of: {}.\n\
             2. Classify the topic as one of: {}.\n\
             3. Provide the output in JSON format according to the specified schema.",
            content,
            sentiments.join(", "),
            topics.join(", "),
        );

        let schema = serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "sentiment": {
                    "type": "STRING",
                    "enum": sentiments,
                    "description": "The sentiment of the content."
                },
                "topic": {
                    "type": "STRING",
                    "enum": topics,
                    "description": "The main topic of the content."
                },
            },
            "required": ["sentiment", "topic"],
        });

        Self {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate part, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
    }
}
