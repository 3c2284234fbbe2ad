//! Input validation and filename sanitization.

use crate::error::GenerationError;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder words that mark a topic as non-serious. Matched as
/// case-insensitive substrings of the whole topic.
const PLACEHOLDER_WORDS: &[&str] = &["test", "testing", "hello", "example"];

const MIN_TOPIC_CHARS: usize = 10;
const MAX_TOPIC_CHARS: usize = 200;

/// Maximum length of a sanitized filename stem
const MAX_FILENAME_CHARS: usize = 50;

static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("invalid filename charset regex"));
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Validate a research topic, returning the trimmed topic on success.
///
/// A valid topic is 10-200 characters after trimming and contains none of
/// the placeholder words.
pub fn validate_topic(topic: &str) -> Result<String, GenerationError> {
    let trimmed = topic.trim();

    if trimmed.is_empty() {
        return Err(GenerationError::InvalidInput(
            "Topic cannot be empty".to_string(),
        ));
    }

    let char_count = trimmed.chars().count();
    if char_count < MIN_TOPIC_CHARS {
        return Err(GenerationError::InvalidInput(format!(
            "Topic should be at least {MIN_TOPIC_CHARS} characters long"
        )));
    }
    if char_count > MAX_TOPIC_CHARS {
        return Err(GenerationError::InvalidInput(format!(
            "Topic should be less than {MAX_TOPIC_CHARS} characters"
        )));
    }

    let lower = trimmed.to_lowercase();
    if PLACEHOLDER_WORDS.iter().any(|word| lower.contains(word)) {
        return Err(GenerationError::InvalidInput(
            "Please provide a serious academic topic".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

/// Validate the caller-supplied API credential. The credential is opaque;
/// only non-emptiness is checked before passing it through.
pub fn validate_api_key(api_key: &str) -> Result<(), GenerationError> {
    if api_key.trim().is_empty() {
        return Err(GenerationError::InvalidInput(
            "API key cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Sanitize a string for use as a download filename stem.
///
/// Strips path-unsafe characters, collapses whitespace runs to single
/// underscores, and truncates to 50 characters. Idempotent: sanitizing an
/// already-sanitized string yields the same string.
pub fn sanitize_filename(filename: &str) -> String {
    let stripped = INVALID_FILENAME_CHARS.replace_all(filename, "");
    let underscored = WHITESPACE_RUNS.replace_all(&stripped, "_");
    underscored.chars().take(MAX_FILENAME_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_and_collapses() {
        assert_eq!(
            sanitize_filename("impact of  solar/wind: a study?"),
            "impact_of_solarwind_a_study"
        );
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_filename("Renewable   energy <grids> | 2024");
        assert_eq!(sanitize_filename(&once), once);
    }
}
