//! The relay operation: one inbound message in, one completion request out.
//!
//! [`Relay`] couples the Gemini client with the conversation store and owns
//! the history bookkeeping around each call: a reply is committed, a stopped
//! generation keeps the question for context, and a blocked prompt or failed
//! call rolls the question back so the next message starts clean.

use crate::core::conversation::{ConversationStore, Forgotten, UserId};
use crate::errors::Result;
use crate::gemini::{GeminiClient, GenerateOutcome};
use tokio::sync::Mutex;

/// Shared relay state: the API client plus all per-user conversations.
#[derive(Debug)]
pub struct Relay {
    client: GeminiClient,
    store: Mutex<ConversationStore>,
}

impl Relay {
    /// Creates a relay with an empty conversation store.
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            store: Mutex::new(ConversationStore::new()),
        }
    }

    /// Relays one message: records the user turn, issues exactly one
    /// completion request, and returns the text to post back.
    ///
    /// The store lock is never held across the network call. On transport
    /// or API errors the user turn is rolled back and the error propagated;
    /// the relay stays usable for the next message.
    pub async fn respond(&self, user: UserId, text: &str) -> Result<String> {
        let snapshot = self.store.lock().await.begin_turn(user, text);

        let outcome = self
            .client
            .generate(&snapshot.contents, snapshot.instruction.as_deref())
            .await;

        match outcome {
            Ok(GenerateOutcome::Reply(reply)) => {
                self.store.lock().await.commit_reply(user, &reply);
                Ok(reply)
            }
            Ok(GenerateOutcome::Stopped { reason }) => {
                // The question stays in history so a rephrased follow-up has context.
                Ok(format!(
                    "Response generation was stopped early (reason: `{reason}`). \
                     Please rephrase your message; it was kept in the history for context."
                ))
            }
            Ok(GenerateOutcome::Blocked { reason }) => {
                self.store.lock().await.rollback_turn(user);
                Ok(format!(
                    "Your prompt was blocked before generation (reason: `{reason}`). \
                     Please rephrase; it was not added to the history."
                ))
            }
            Err(err) => {
                self.store.lock().await.rollback_turn(user);
                Err(err)
            }
        }
    }

    /// Clears the user's history. Returns whether any existed.
    pub async fn reset_history(&self, user: UserId) -> bool {
        self.store.lock().await.reset(user)
    }

    /// Removes the user's most recent exchange.
    pub async fn forget_last(&self, user: UserId) -> Forgotten {
        self.store.lock().await.forget_last(user)
    }

    /// Sets the user's system instruction (length-checked).
    pub async fn set_instruction(&self, user: UserId, instruction: &str) -> Result<()> {
        self.store.lock().await.set_instruction(user, instruction)
    }

    /// Clears the user's system instruction. Returns whether one was set.
    pub async fn clear_instruction(&self, user: UserId) -> bool {
        self.store.lock().await.clear_instruction(user)
    }

    /// Readable transcript of the user's history, if any.
    pub async fn render_history(&self, user: UserId) -> Option<String> {
        self.store.lock().await.render_history(user)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{blocked_json, reply_json, test_client};
    use mockito::Matcher;

    const USER: UserId = 7;

    fn prompt_matcher(text: &str) -> Matcher {
        Matcher::PartialJson(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": text}]}]
        }))
    }

    #[tokio::test]
    async fn test_one_message_issues_exactly_one_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(prompt_matcher("hello"))
            .with_status(200)
            .with_body(reply_json("hi there"))
            .expect(1)
            .create_async()
            .await;

        let relay = Relay::new(test_client(&server.url()));
        let reply = relay.respond(USER, "hello").await.unwrap();

        assert_eq!(reply, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reply_is_committed_to_history() {
        let mut server = mockito::Server::new_async().await;
        let _first = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(prompt_matcher("hello"))
            .with_status(200)
            .with_body(reply_json("hi there"))
            .create_async()
            .await;
        // The second request must carry the full exchange.
        let second = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hello"}]},
                    {"role": "model", "parts": [{"text": "hi there"}]},
                    {"role": "user", "parts": [{"text": "and again"}]},
                ]
            })))
            .with_status(200)
            .with_body(reply_json("still here"))
            .expect(1)
            .create_async()
            .await;

        let relay = Relay::new(test_client(&server.url()));
        relay.respond(USER, "hello").await.unwrap();
        let reply = relay.respond(USER, "and again").await.unwrap();

        assert_eq!(reply, "still here");
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_failure_rolls_back_and_relay_stays_usable() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(prompt_matcher("boom"))
            .with_status(500)
            .with_body(r#"{"error": {"message": "internal"}}"#)
            .expect(1)
            .create_async()
            .await;
        // After rollback the next request must start from an empty history.
        let next = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(prompt_matcher("next message"))
            .with_status(200)
            .with_body(reply_json("recovered"))
            .expect(1)
            .create_async()
            .await;

        let relay = Relay::new(test_client(&server.url()));
        assert!(relay.respond(USER, "boom").await.is_err());

        let reply = relay.respond(USER, "next message").await.unwrap();
        assert_eq!(reply, "recovered");

        failing.assert_async().await;
        next.assert_async().await;
    }

    #[tokio::test]
    async fn test_blocked_prompt_not_kept_in_history() {
        let mut server = mockito::Server::new_async().await;
        let _blocked = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(prompt_matcher("rude question"))
            .with_status(200)
            .with_body(blocked_json("SAFETY"))
            .create_async()
            .await;
        let follow_up = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(prompt_matcher("polite question"))
            .with_status(200)
            .with_body(reply_json("sure"))
            .expect(1)
            .create_async()
            .await;

        let relay = Relay::new(test_client(&server.url()));
        let notice = relay.respond(USER, "rude question").await.unwrap();
        assert!(notice.contains("SAFETY"));

        relay.respond(USER, "polite question").await.unwrap();
        follow_up.assert_async().await;
    }

    #[tokio::test]
    async fn test_instruction_attached_to_requests() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/test-model:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "answer in haiku"}]}
            })))
            .with_status(200)
            .with_body(reply_json("ok"))
            .expect(1)
            .create_async()
            .await;

        let relay = Relay::new(test_client(&server.url()));
        relay.set_instruction(USER, "answer in haiku").await.unwrap();
        relay.respond(USER, "hello").await.unwrap();

        mock.assert_async().await;
    }
}
