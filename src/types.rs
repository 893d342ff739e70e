use serde::{Deserialize, Serialize};

/// The kind of note a context entry records.
///
/// The store has historically emitted category strings outside this set, so
/// deserialization falls back to `Unknown` rather than failing the whole
/// collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Education,
    Experience,
    Achievement,
    Project,
    Skill,
    Preference,
    #[serde(other)]
    Unknown,
}

impl Category {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Achievement => "achievement",
            Self::Project => "project",
            Self::Skill => "skill",
            Self::Preference => "preference",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for Category {
    /// The first selectable category, used as the entry form default.
    fn default() -> Self {
        Self::Education
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A categorized free-text note about the user.
///
/// Identity and ordering are implicit in the entry's position in the
/// collection returned by the store; entries are never mutated, only
/// appended. `confidence` is attached by the store to inferred entries and
/// is never produced by this client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextEntry {
    pub text: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Body of a creation request sent to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddContextRequest {
    pub text: String,
    pub category: Category,
}
