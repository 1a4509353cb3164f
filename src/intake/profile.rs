//! Visitor profile model.
//!
//! Five string fields, each empty (unset) or populated. The profile travels
//! whole in every request and response; nothing is persisted server-side.

use serde::{Deserialize, Serialize};

/// The five-field preparedness profile being filled during the chat.
///
/// Wire field names are camelCase to match the site's JSON contract. Unknown
/// or missing fields default to empty, so a caller may submit a partial
/// object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub preparing_for: String,
    pub region: String,
    pub concern: String,
    pub household_size: String,
    pub experience: String,
}

impl Profile {
    /// Field value for a given field tag.
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::PreparingFor => &self.preparing_for,
            ProfileField::Region => &self.region,
            ProfileField::Concern => &self.concern,
            ProfileField::HouseholdSize => &self.household_size,
            ProfileField::Experience => &self.experience,
        }
    }

    /// Whether a field holds a trimmed non-blank value.
    pub fn is_set(&self, field: ProfileField) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// The still-unset fields, in canonical order.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ORDER
            .iter()
            .copied()
            .filter(|&f| !self.is_set(f))
            .collect()
    }

    /// Ready for delivery iff all five fields are non-blank.
    pub fn is_complete(&self) -> bool {
        ProfileField::ORDER.iter().all(|&f| self.is_set(f))
    }
}

/// Tag for one of the five profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    PreparingFor,
    Region,
    Concern,
    HouseholdSize,
    Experience,
}

impl ProfileField {
    /// Canonical ask order. Missing-field computation and the scripted
    /// fallback both follow this order, one field per turn.
    pub const ORDER: [ProfileField; 5] = [
        ProfileField::PreparingFor,
        ProfileField::Region,
        ProfileField::Concern,
        ProfileField::HouseholdSize,
        ProfileField::Experience,
    ];

    /// Wire name, as it appears in JSON payloads and LLM hints.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::PreparingFor => "preparingFor",
            Self::Region => "region",
            Self::Concern => "concern",
            Self::HouseholdSize => "householdSize",
            Self::Experience => "experience",
        }
    }

    /// Human label for the PDF summary block.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PreparingFor => "Preparing for",
            Self::Region => "Region",
            Self::Concern => "Primary concern",
            Self::HouseholdSize => "Household size",
            Self::Experience => "Experience level",
        }
    }

    /// The scripted question asked when this field is the first one missing.
    pub fn question(&self) -> &'static str {
        match self {
            Self::PreparingFor => {
                "Who are you preparing for — yourself or a household/family?"
            }
            Self::Region => "What general region are you in?",
            Self::Concern => "What situation are you most concerned about?",
            Self::HouseholdSize => "How many people are in your household?",
            Self::Experience => {
                "Would you describe your experience as beginner, intermediate, or advanced?"
            }
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
