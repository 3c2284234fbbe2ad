//! Generation model catalog.
//!
//! Single source of truth for the supported Gemini models and their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output-token ceiling applied to every request regardless of what the
/// caller asks for. The free-tier Flash endpoint truncates beyond this.
pub const OUTPUT_TOKEN_CAP: u32 = 2000;

/// Supported generation models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// Fast free-tier model, the default for every section request
    #[default]
    Flash,
    /// Standard model, slower but steadier on long-form prose
    Pro,
}

impl Model {
    /// All available models, fast first
    pub const ALL: &'static [Model] = &[Model::Flash, Model::Pro];

    /// Model identifier as sent to the generation endpoint
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Flash => "gemini-1.5-flash",
            Self::Pro => "gemini-pro",
        }
    }

    /// Human-readable label, as shown in the model picker
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Flash => "Gemini Flash (Fast & Free)",
            Self::Pro => "Gemini Pro (Standard)",
        }
    }

}

impl FromStr for Model {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .find(|m| m.id() == lower || lower == format!("{m}"))
            .copied()
            .ok_or_else(|| ModelError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flash => "flash",
            Self::Pro => "pro",
        };
        write!(f, "{name}")
    }
}

/// Errors from model name parsing
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown model: {0} (available: gemini-1.5-flash, gemini-pro)")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_short_names() {
        assert_eq!("gemini-1.5-flash".parse::<Model>().ok(), Some(Model::Flash));
        assert_eq!("flash".parse::<Model>().ok(), Some(Model::Flash));
        assert_eq!("PRO".parse::<Model>().ok(), Some(Model::Pro));
        assert!("gpt-4".parse::<Model>().is_err());
    }

    #[test]
    fn default_is_the_fast_model() {
        assert_eq!(Model::default(), Model::Flash);
        assert_eq!(Model::default().id(), "gemini-1.5-flash");
    }
}
