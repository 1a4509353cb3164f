//! Conversation responder — one chat turn.
//!
//! Extraction runs first, then the reply comes from the LLM when a provider
//! is configured, with a deterministic scripted reply as the fallback. LLM
//! failure is a silent degrade: the caller always gets a non-empty reply.

use std::sync::Arc;

use crate::intake::extract::extract;
use crate::intake::profile::{Profile, ProfileField};
use crate::intake::prompts::chat_system_prompt;
use crate::llm::{ChatMessage, LlmProvider, Role};

/// Most recent messages forwarded to the LLM, bounding context size.
const HISTORY_LIMIT: usize = 12;

/// Result of one chat turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub profile: Profile,
    pub ready_for_email: bool,
}

/// Produces the next assistant reply for a conversation.
pub struct Responder {
    llm: Option<Arc<dyn LlmProvider>>,
}

impl Responder {
    pub fn new(llm: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { llm }
    }

    /// Run one turn: extract from the latest user message, recompute the
    /// missing fields, and produce a reply.
    pub async fn respond(&self, messages: &[ChatMessage], profile: Profile) -> ChatOutcome {
        let latest_user = messages.iter().rev().find(|m| m.role == Role::User);
        let profile = match latest_user {
            Some(message) => extract(&profile, &message.content),
            None => profile,
        };

        let missing = profile.missing_fields();
        let ready_for_email = missing.is_empty();
        let fallback = scripted_reply(&profile, &missing);

        let reply = match &self.llm {
            Some(llm) => match self.model_reply(llm.as_ref(), messages, &profile, &missing).await {
                Some(text) => text,
                None => fallback,
            },
            None => fallback,
        };

        ChatOutcome {
            reply,
            profile,
            ready_for_email,
        }
    }

    /// Ask the LLM for a richer reply. `None` means "use the fallback" —
    /// failures and empty responses are logged, never surfaced.
    async fn model_reply(
        &self,
        llm: &dyn LlmProvider,
        messages: &[ChatMessage],
        profile: &Profile,
        missing: &[ProfileField],
    ) -> Option<String> {
        let mut request = vec![ChatMessage::system(chat_system_prompt(profile, missing))];
        let tail_start = messages.len().saturating_sub(HISTORY_LIMIT);
        request.extend_from_slice(&messages[tail_start..]);

        match llm.complete(request).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                tracing::warn!("LLM returned empty chat reply, using scripted fallback");
                None
            }
            Err(e) => {
                tracing::warn!("LLM chat call failed, using scripted fallback: {e}");
                None
            }
        }
    }
}

/// Deterministic reply: a completion summary once everything is known,
/// otherwise the fixed question for the first missing field.
fn scripted_reply(profile: &Profile, missing: &[ProfileField]) -> String {
    match missing.first() {
        None => format!(
            "Thanks — I have what I need. You're preparing for {} in {}, with a focus on {}. \
             If you'd like, I can email you a personalized preparedness guide — \
             what's the best email address?",
            profile.preparing_for, profile.region, profile.concern
        ),
        Some(field) => format!("Thanks for sharing. {}", field.question()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use async_trait::async_trait;

    struct StubLlm {
        reply: Result<String, ()>,
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        fn model_name(&self) -> &str {
            "stub"
        }
        async fn complete(&self, _messages: Vec<ChatMessage>) -> Result<String, LlmError> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::RequestFailed {
                    provider: "stub".to_string(),
                    reason: "down".to_string(),
                }),
            }
        }
    }

    fn complete_profile() -> Profile {
        Profile {
            preparing_for: "Myself".into(),
            region: "Chicago".into(),
            concern: "Severe winter".into(),
            household_size: "2".into(),
            experience: "Beginner".into(),
        }
    }

    #[tokio::test]
    async fn without_provider_asks_first_missing_question() {
        let responder = Responder::new(None);
        let messages = vec![ChatMessage::user("hello")];
        let outcome = responder.respond(&messages, Profile::default()).await;
        assert!(!outcome.ready_for_email);
        assert_eq!(
            outcome.reply,
            format!("Thanks for sharing. {}", ProfileField::PreparingFor.question())
        );
    }

    #[tokio::test]
    async fn without_provider_is_deterministic() {
        let responder = Responder::new(None);
        let messages = vec![ChatMessage::user("I'm in Ohio")];
        let a = responder.respond(&messages, Profile::default()).await;
        let b = responder.respond(&messages, Profile::default()).await;
        assert_eq!(a.reply, b.reply);
        assert_eq!(a.profile, b.profile);
    }

    #[tokio::test]
    async fn extraction_feeds_the_next_question() {
        let responder = Responder::new(None);
        let messages = vec![ChatMessage::user("just me, I'm in Ohio")];
        let outcome = responder.respond(&messages, Profile::default()).await;
        assert_eq!(outcome.profile.preparing_for, "Myself");
        assert_eq!(outcome.profile.region, "Ohio");
        // preparingFor and region are now set, so concern is next.
        assert_eq!(
            outcome.reply,
            format!("Thanks for sharing. {}", ProfileField::Concern.question())
        );
    }

    #[tokio::test]
    async fn complete_profile_summarizes_and_asks_for_email() {
        let responder = Responder::new(None);
        let outcome = responder.respond(&[], complete_profile()).await;
        assert!(outcome.ready_for_email);
        assert!(outcome.reply.contains("Myself"));
        assert!(outcome.reply.contains("Chicago"));
        assert!(outcome.reply.contains("Severe winter"));
        assert!(outcome.reply.contains("email"));
    }

    #[tokio::test]
    async fn readiness_reflects_extraction_in_the_same_turn() {
        let responder = Responder::new(None);
        let profile = Profile {
            preparing_for: "Myself".into(),
            ..Default::default()
        };
        let messages = vec![ChatMessage::user(
            "I'm near Chicago, worried about winter storms, household of 2, I'm a beginner",
        )];
        let outcome = responder.respond(&messages, profile).await;
        assert!(outcome.ready_for_email);
        assert!(outcome.profile.is_complete());
    }

    #[tokio::test]
    async fn provider_reply_replaces_fallback() {
        let llm = Arc::new(StubLlm {
            reply: Ok("Got it — tell me about your region?".to_string()),
        });
        let responder = Responder::new(Some(llm));
        let messages = vec![ChatMessage::user("hello")];
        let outcome = responder.respond(&messages, Profile::default()).await;
        assert_eq!(outcome.reply, "Got it — tell me about your region?");
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_fallback() {
        let llm = Arc::new(StubLlm { reply: Err(()) });
        let responder = Responder::new(Some(llm));
        let messages = vec![ChatMessage::user("hello")];
        let outcome = responder.respond(&messages, Profile::default()).await;
        assert_eq!(
            outcome.reply,
            format!("Thanks for sharing. {}", ProfileField::PreparingFor.question())
        );
    }

    #[tokio::test]
    async fn provider_empty_reply_degrades_to_fallback() {
        let llm = Arc::new(StubLlm {
            reply: Ok("   ".to_string()),
        });
        let responder = Responder::new(Some(llm));
        let messages = vec![ChatMessage::user("hello")];
        let outcome = responder.respond(&messages, Profile::default()).await;
        assert!(outcome.reply.starts_with("Thanks for sharing."));
    }

    #[tokio::test]
    async fn assistant_only_history_skips_extraction() {
        let responder = Responder::new(None);
        let messages = vec![ChatMessage::assistant("Who are you preparing for?")];
        let outcome = responder.respond(&messages, Profile::default()).await;
        assert_eq!(outcome.profile, Profile::default());
        assert!(!outcome.ready_for_email);
    }
}
