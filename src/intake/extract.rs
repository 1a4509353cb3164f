//! Best-effort profile extraction from a free-text utterance.
//!
//! Every heuristic only fills a field that is still empty; nothing here ever
//! overwrites or clears. The keyword tables are first-match-wins and their
//! order is load-bearing: reordering changes how ambiguous utterances (e.g.
//! "winter storms") classify, so keep the tables as they are.

use std::sync::LazyLock;

use regex::Regex;

use super::profile::{Profile, ProfileField};

static FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(family|kids|children|household|partner|spouse)\b").unwrap()
});

static SOLO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(myself|yourself|self|just me|solo|single|only me|for me|me)\b").unwrap()
});

static ADVANCED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(advanced|advance|expert|experienced)\b").unwrap());

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,2})\b").unwrap());

static REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:in|from|near)\s+([A-Za-z\s]{2,40})").unwrap());

/// Ordered (keyword, canonical label) pairs for the concern field. The first
/// keyword found as a substring of the lowercased utterance wins, so "winter"
/// must stay ahead of "storm" ("winter storms" → Severe winter).
const CONCERN_TABLE: [(&str, &str); 10] = [
    ("hurricane", "Hurricanes"),
    ("winter", "Severe winter"),
    ("storm", "Storms"),
    ("power outage", "Power outages"),
    ("blackout", "Power outages"),
    ("wildfire", "Wildfires"),
    ("flood", "Flooding"),
    ("water", "Water shortage"),
    ("civil", "Civil unrest"),
    ("earthquake", "Earthquakes"),
];

/// Common-region aliases matched against a bare-region utterance
/// (the entire message, normalized to lowercase letters and spaces).
const REGION_ALIASES: [(&str, &str); 8] = [
    ("us", "United States"),
    ("usa", "United States"),
    ("united states", "United States"),
    ("united states of america", "United States"),
    ("uk", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("canada", "Canada"),
    ("australia", "Australia"),
];

/// Fill empty profile fields from an utterance. Pure: the input profile is
/// untouched and a match failure is a no-op, not an error.
pub fn extract(profile: &Profile, utterance: &str) -> Profile {
    let mut updated = profile.clone();
    if utterance.is_empty() {
        return updated;
    }

    let lower = utterance.to_lowercase();

    if !updated.is_set(ProfileField::PreparingFor) {
        if FAMILY_RE.is_match(&lower) {
            updated.preparing_for = "Family or household".to_string();
        } else if SOLO_RE.is_match(&lower) {
            updated.preparing_for = "Myself".to_string();
        }
    }

    if !updated.is_set(ProfileField::Experience) {
        if lower.contains("beginner") {
            updated.experience = "Beginner".to_string();
        } else if lower.contains("intermediate") {
            updated.experience = "Intermediate".to_string();
        } else if ADVANCED_RE.is_match(&lower) {
            updated.experience = "Advanced".to_string();
        }
    }

    if !updated.is_set(ProfileField::Concern) {
        for (keyword, label) in CONCERN_TABLE {
            if lower.contains(keyword) {
                updated.concern = label.to_string();
                break;
            }
        }
    }

    if !updated.is_set(ProfileField::HouseholdSize)
        && let Some(captures) = SIZE_RE.captures(utterance)
    {
        updated.household_size = captures[1].to_string();
    }

    if !updated.is_set(ProfileField::Region) {
        if let Some(captures) = REGION_RE.captures(utterance) {
            updated.region = captures[1].trim().to_string();
        } else if let Some(region) = match_region_alias(&lower) {
            updated.region = region.to_string();
        }
    }

    updated
}

/// Match the whole (normalized) utterance against known region aliases.
fn match_region_alias(lower: &str) -> Option<&'static str> {
    let normalized: String = lower
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    let normalized = normalized.trim();
    REGION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| *canonical)
}
