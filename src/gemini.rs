//! Client for Google's Generative Language API (`generateContent`).
//!
//! Owns the request/response wire types and maps the API's three
//! non-transport outcomes (a reply, generation stopped early, prompt
//! blocked before generation) into [`GenerateOutcome`] so callers can
//! decide what to keep in conversation history.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Outbound request timeout. Completions can take a while on long prompts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A single message part. The API supports multi-part content; the bot only
/// ever sends and reads one text part per turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// The text payload of this part.
    pub text: String,
}

/// Who authored a turn in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The Discord user.
    User,
    /// The model.
    Model,
}

/// One conversation turn in the API's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Author of the turn.
    pub role: Role,
    /// Message parts; always exactly one for this bot.
    pub parts: Vec<Part>,
}

impl Content {
    /// Builds a user turn with a single text part.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Builds a model turn with a single text part.
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Text of the first part, or the empty string if there is none.
    #[must_use]
    pub fn text(&self) -> &str {
        self.parts.first().map_or("", |part| part.text.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: &'a [Content],
    generation_config: GenerationConfig,
    safety_settings: &'a [SafetySetting],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

const SAFETY_SETTINGS: [SafetySetting; 4] = [
    SafetySetting {
        category: "HARM_CATEGORY_HARASSMENT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_HATE_SPEECH",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_DANGEROUS_CONTENT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Result of a successful HTTP round trip to `generateContent`.
///
/// Transport failures and non-2xx statuses surface as [`Error`] instead;
/// these three variants all describe well-formed API responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The model produced a completion.
    Reply(String),
    /// Generation started but stopped before completing (safety, length, ...).
    Stopped {
        /// The API's `finishReason` value.
        reason: String,
    },
    /// The prompt was rejected before any generation happened.
    Blocked {
        /// The API's `blockReason` value.
        reason: String,
    },
}

/// HTTP client for the `generateContent` endpoint.
///
/// Holds the API key for the lifetime of the process; the key is sent as a
/// query parameter and must never be logged.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client against the production API endpoint.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_base_url(
            api_key,
            model,
            "https://generativelanguage.googleapis.com".to_string(),
        )
    }

    /// Creates a client against an arbitrary base URL (used by tests).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
            model,
        })
    }

    /// Sends one completion request and classifies the response.
    ///
    /// `contents` is the conversation so far, oldest turn first, ending with
    /// the user turn being answered. `system_instruction`, when present, is
    /// attached as the API's `systemInstruction` field.
    pub async fn generate(
        &self,
        contents: &[Content],
        system_instruction: Option<&str>,
    ) -> Result<GenerateOutcome> {
        let request = GenerateRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_p: 1.0,
                top_k: 1,
            },
            safety_settings: &SAFETY_SETTINGS,
            system_instruction: system_instruction.map(|text| SystemInstruction {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(model = %self.model, turns = contents.len(), "sending generateContent request");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error)
                .map_or_else(
                    || "no specific error message".to_string(),
                    |body| body.message,
                );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        classify(body)
    }
}

/// Maps a decoded 200 response onto an outcome, in the same precedence order
/// the API documents: candidates first, then prompt feedback.
fn classify(body: GenerateResponse) -> Result<GenerateOutcome> {
    if let Some(candidate) = body.candidates.into_iter().next() {
        if let Some(content) = candidate.content {
            if !content.text().is_empty() {
                return Ok(GenerateOutcome::Reply(content.text().to_string()));
            }
        }
        if let Some(reason) = candidate.finish_reason {
            if reason != "STOP" {
                return Ok(GenerateOutcome::Stopped { reason });
            }
        }
        return Err(Error::MalformedResponse);
    }

    if let Some(feedback) = body.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            return Ok(GenerateOutcome::Blocked { reason });
        }
    }

    Err(Error::MalformedResponse)
}
