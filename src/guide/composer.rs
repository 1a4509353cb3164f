//! Guide prose composition.
//!
//! One LLM call when a provider is configured; a deterministic three-section
//! template otherwise, so the delivery pipeline never stalls on a missing or
//! failing external service. Completeness of the profile is the caller's
//! responsibility — the delivery endpoint gates on readiness.

use std::sync::Arc;

use crate::intake::Profile;
use crate::intake::prompts::{guide_system_prompt, guide_user_message};
use crate::llm::{ChatMessage, LlmProvider};

/// Composes guide prose for a completed profile.
pub struct Composer {
    llm: Option<Arc<dyn LlmProvider>>,
}

impl Composer {
    pub fn new(llm: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { llm }
    }

    /// Produce the guide text. Infallible: LLM failure degrades to the
    /// template.
    pub async fn compose(&self, profile: &Profile) -> String {
        if let Some(llm) = &self.llm {
            let messages = vec![
                ChatMessage::system(guide_system_prompt()),
                ChatMessage::user(guide_user_message(profile)),
            ];
            match llm.complete(messages).await {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => {
                    tracing::warn!("LLM returned empty guide text, using template");
                }
                Err(e) => {
                    tracing::warn!("LLM guide call failed, using template: {e}");
                }
            }
        }
        template_guide(profile)
    }
}

/// Deterministic guide template: overview, four checklist steps, next steps.
pub fn template_guide(profile: &Profile) -> String {
    format!(
        "Overview\n\
         You are preparing for {subject} in {region}. Your main focus is {concern}.\n\
         \n\
         Checklist\n\
         - Store water and shelf-stable food for {size} people\n\
         - Prepare lighting and backup power\n\
         - Establish a household communication plan\n\
         - Review local alerts and emergency contacts\n\
         \n\
         Next Steps\n\
         Start with the essentials above and expand gradually. Revisit the checklist \
         once a season and adjust it for your household.",
        subject = profile.preparing_for,
        region = profile.region,
        concern = profile.concern,
        size = profile.household_size,
    )
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
            preparing_for: "Family or household".into(),
            region: "Ohio".into(),
            concern: "Flooding".into(),
            household_size: "4".into(),
            experience: "Intermediate".into(),
        }
    }

    #[test]
    fn template_has_three_sections_and_profile_values() {
        let text = template_guide(&complete_profile());
        assert!(text.contains("Overview"));
        assert!(text.contains("Checklist"));
        assert!(text.contains("Next Steps"));
        assert!(text.contains("Family or household"));
        assert!(text.contains("Ohio"));
        assert!(text.contains("Flooding"));
        assert!(text.contains("for 4 people"));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 4);
    }

    #[tokio::test]
    async fn without_provider_returns_template() {
        let composer = Composer::new(None);
        let profile = complete_profile();
        assert_eq!(composer.compose(&profile).await, template_guide(&profile));
    }

    #[tokio::test]
    async fn provider_text_is_trimmed_and_used() {
        let llm = Arc::new(StubLlm {
            reply: Ok("  A calm overview.\n\n- one step  ".to_string()),
        });
        let composer = Composer::new(Some(llm));
        let text = composer.compose(&complete_profile()).await;
        assert_eq!(text, "A calm overview.\n\n- one step");
    }

    #[tokio::test]
    async fn provider_failure_returns_template() {
        let llm = Arc::new(StubLlm { reply: Err(()) });
        let composer = Composer::new(Some(llm));
        let profile = complete_profile();
        assert_eq!(composer.compose(&profile).await, template_guide(&profile));
    }

    #[tokio::test]
    async fn provider_blank_text_returns_template() {
        let llm = Arc::new(StubLlm {
            reply: Ok("\n \n".to_string()),
        });
        let composer = Composer::new(Some(llm));
        let profile = complete_profile();
        assert_eq!(composer.compose(&profile).await, template_guide(&profile));
    }
}
