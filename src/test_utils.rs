//! Shared test utilities for `GemBot`.
//!
//! Provides canned Gemini API response bodies and a client factory pointed
//! at a mock server, so individual tests stay short.

use crate::gemini::GeminiClient;

/// Model name used by all test clients.
pub const TEST_MODEL: &str = "test-model";

/// API key used by all test clients.
pub const TEST_KEY: &str = "test-key";

/// Creates a client aimed at a `mockito` server URL.
///
/// # Panics
/// Panics if the underlying HTTP client cannot be built, which never
/// happens with the default TLS stack.
#[must_use]
pub fn test_client(base_url: &str) -> GeminiClient {
    #[allow(clippy::unwrap_used)]
    GeminiClient::with_base_url(
        TEST_KEY.to_string(),
        TEST_MODEL.to_string(),
        base_url.to_string(),
    )
    .unwrap()
}

/// A 200 body carrying a normal completion.
#[must_use]
pub fn reply_json(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}],
            },
            "finishReason": "STOP",
        }]
    })
    .to_string()
}

/// A 200 body where generation stopped before completing.
#[must_use]
pub fn stopped_json(reason: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "finishReason": reason,
            "safetyRatings": [],
        }]
    })
    .to_string()
}

/// A 200 body where the prompt was blocked before generation.
#[must_use]
pub fn blocked_json(reason: &str) -> String {
    serde_json::json!({
        "promptFeedback": {
            "blockReason": reason,
            "safetyRatings": [],
        }
    })
    .to_string()
}
