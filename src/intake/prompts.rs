//! System prompts for the chat responder and the guide composer.

use super::profile::{Profile, ProfileField};

/// Scripted behavior for the chat assistant.
const CHAT_PROMPT: &str = "\
You are a calm, knowledgeable preparedness expert. \
Speak clearly and practically. Ask one question at a time. \
Avoid fear-based language. \
Align guidance with the site context provided. Do not quote or reproduce site text verbatim; paraphrase. \
Gather the following information naturally: preparingFor, region, concern, householdSize, experience. \
When complete, summarize briefly and ask for an email to send a personalized PDF guide.";

/// Tone and structure instructions for guide composition.
const GUIDE_PROMPT: &str = "\
You are a calm preparedness expert. \
Write a personalized emergency preparedness guide.

Structure:
- Short overview paragraph
- Checklist with bullet points
- Practical, low-stress next steps

Tone: calm, practical, non-alarmist.
Align guidance with the site context provided. Do not quote or reproduce site text verbatim; paraphrase.";

/// Site positioning blurb shared by both prompts.
const SITE_CONTEXT: &str = "\
The Ready Network focuses on protecting families, equipping households, and empowering people \
with practical skills. It emphasizes preparedness training (e.g., go-bag basics, gardening for \
resilience, and general readiness), responsible self-protection, and confidence through clear, \
structured guidance. The tone is supportive and capability-building, not alarmist.";

/// Render the known profile as `name: value` lines for prompt injection.
fn profile_lines(profile: &Profile) -> String {
    ProfileField::ORDER
        .iter()
        .map(|&f| format!("{}: {}", f.wire_name(), profile.get(f)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// System prompt for one chat turn: scripted behavior, site context, the
/// known profile, and the fields still missing (in ask order).
pub fn chat_system_prompt(profile: &Profile, missing: &[ProfileField]) -> String {
    let missing_names: Vec<&str> = missing.iter().map(|f| f.wire_name()).collect();
    format!(
        "{CHAT_PROMPT}\n\nSite context:\n{SITE_CONTEXT}\n\n\
         Known profile:\n{}\n\nMissing fields (ask in this order, one at a time): {}",
        profile_lines(profile),
        if missing_names.is_empty() {
            "none".to_string()
        } else {
            missing_names.join(", ")
        }
    )
}

/// System prompt for the one-shot guide composition call.
pub fn guide_system_prompt() -> String {
    format!("{GUIDE_PROMPT}\n\nSite context:\n{SITE_CONTEXT}")
}

/// User message for guide composition: the five profile values.
pub fn guide_user_message(profile: &Profile) -> String {
    profile_lines(profile)
}
