//! Prompt domain types and validation.
//!
//! Defines the closed [`PromptMetadata`] record, input validation for
//! prompt create/update calls, and `{placeholder}` extraction from
//! prompt content.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a prompt title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for serialized prompt content in characters.
pub const MAX_CONTENT_LENGTH: usize = 100_000;

/// Maximum number of tags in prompt metadata.
pub const MAX_TAGS_COUNT: usize = 20;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 100;

/// Regex pattern matching `{placeholder}` tokens in prompt content.
pub const PLACEHOLDER_PATTERN: &str = r"\{[a-zA-Z_][a-zA-Z0-9_.]*\}";

/// Compiled regex for `{placeholder}` extraction. Compiled once, reused forever.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Structured prompt metadata.
///
/// The field set is closed and finite. Every field is independently
/// mutable; absent fields deserialize to empty string / empty list, never
/// null, so a round-trip through storage always yields a fully-populated
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptMetadata {
    /// Free-form tags, order preserved.
    pub tags: Vec<String>,
    /// Identifier of the model this prompt targets (e.g. `"gpt-4"`).
    pub model_used: String,
    /// Expected output type (e.g. `"text"`, `"code"`, `"image"`).
    pub output_type: String,
    /// Free-text purpose / use-case description.
    pub purpose: String,
    /// Free-text generation parameters (stored verbatim, may be JSON).
    pub parameters: String,
    /// Placeholder names referenced by the content.
    pub placeholders: Vec<String>,
    /// Free-text description of the expected output format.
    pub expected_output: String,
    /// Free-text source or attribution reference.
    pub source_reference: String,
}

impl PromptMetadata {
    /// Trim surrounding whitespace from every string field, dropping tags
    /// that trim to empty.
    pub fn normalized(mut self) -> Self {
        self.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.model_used = self.model_used.trim().to_string();
        self.output_type = self.output_type.trim().to_string();
        self.purpose = self.purpose.trim().to_string();
        self.parameters = self.parameters.trim().to_string();
        self.placeholders = self
            .placeholders
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self.expected_output = self.expected_output.trim().to_string();
        self.source_reference = self.source_reference.trim().to_string();
        self
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a prompt title: must be non-empty (after trimming) and within
/// the length limit.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Prompt title must not be empty".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt title exceeds maximum length of {MAX_TITLE_LENGTH} characters (got {})",
            title.len()
        )));
    }
    Ok(())
}

/// Validate prompt content: length check only (empty content is allowed,
/// a prompt may start as a titled stub).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.len() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt content exceeds maximum length of {MAX_CONTENT_LENGTH} characters (got {})",
            content.len()
        )));
    }
    Ok(())
}

/// Validate prompt metadata: tag count and per-tag length limits.
pub fn validate_metadata(metadata: &PromptMetadata) -> Result<(), CoreError> {
    if metadata.tags.len() > MAX_TAGS_COUNT {
        return Err(CoreError::Validation(format!(
            "Tag count exceeds maximum of {MAX_TAGS_COUNT} (got {})",
            metadata.tags.len()
        )));
    }
    for tag in &metadata.tags {
        if tag.len() > MAX_TAG_LENGTH {
            return Err(CoreError::Validation(format!(
                "Tag exceeds maximum length of {MAX_TAG_LENGTH} characters (got {})",
                tag.len()
            )));
        }
    }
    Ok(())
}

/// Validate a revert target version number: versions start at 1.
pub fn validate_target_version(version: i32) -> Result<(), CoreError> {
    if version < 1 {
        return Err(CoreError::Validation(format!(
            "Target version must be >= 1 (got {version})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Placeholder extraction
// ---------------------------------------------------------------------------

/// Extract all `{placeholder}` tokens from prompt content.
///
/// Returns a de-duplicated, sorted list of placeholder names (without braces).
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut placeholders: Vec<String> = PLACEHOLDER_RE
        .find_iter(content)
        .map(|m| {
            let s = m.as_str();
            // Strip surrounding braces.
            s[1..s.len() - 1].to_string()
        })
        .collect();
    placeholders.sort();
    placeholders.dedup();
    placeholders
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- validate_title --

    #[test]
    fn valid_title_passes() {
        assert!(validate_title("Customer support triage").is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let err = validate_title("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn whitespace_only_title_rejected() {
        let err = validate_title("   ").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn too_long_title_rejected() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        let err = validate_title(&long).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    #[test]
    fn boundary_title_length_passes() {
        let exact = "x".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&exact).is_ok());
    }

    // -- validate_content --

    #[test]
    fn empty_content_passes() {
        assert!(validate_content("").is_ok());
    }

    #[test]
    fn too_long_content_rejected() {
        let long = "x".repeat(MAX_CONTENT_LENGTH + 1);
        let err = validate_content(&long).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    // -- validate_metadata --

    #[test]
    fn default_metadata_passes() {
        assert!(validate_metadata(&PromptMetadata::default()).is_ok());
    }

    #[test]
    fn too_many_tags_rejected() {
        let metadata = PromptMetadata {
            tags: (0..MAX_TAGS_COUNT + 1).map(|i| format!("tag{i}")).collect(),
            ..Default::default()
        };
        let err = validate_metadata(&metadata).unwrap_err();
        assert!(err.to_string().contains("Tag count exceeds"));
    }

    #[test]
    fn too_long_tag_rejected() {
        let metadata = PromptMetadata {
            tags: vec!["y".repeat(MAX_TAG_LENGTH + 1)],
            ..Default::default()
        };
        let err = validate_metadata(&metadata).unwrap_err();
        assert!(err.to_string().contains("Tag exceeds"));
    }

    // -- validate_target_version --

    #[test]
    fn version_one_is_valid_target() {
        assert!(validate_target_version(1).is_ok());
    }

    #[test]
    fn zero_and_negative_targets_rejected() {
        assert!(validate_target_version(0).is_err());
        assert!(validate_target_version(-3).is_err());
    }

    // -- metadata defaults / serde --

    #[test]
    fn metadata_deserializes_missing_fields_to_empty() {
        let metadata: PromptMetadata = serde_json::from_str("{}").unwrap();
        assert!(metadata.tags.is_empty());
        assert_eq!(metadata.model_used, "");
        assert_eq!(metadata.expected_output, "");
    }

    #[test]
    fn metadata_ignores_null_free_round_trip() {
        let metadata = PromptMetadata {
            tags: vec!["support".into(), "triage".into()],
            model_used: "gpt-4".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(!json.contains("null"));
        let back: PromptMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn normalized_trims_and_drops_empty_tags() {
        let metadata = PromptMetadata {
            tags: vec![" support ".into(), "  ".into()],
            model_used: " gpt-4 ".into(),
            ..Default::default()
        };
        let normalized = metadata.normalized();
        assert_eq!(normalized.tags, vec!["support"]);
        assert_eq!(normalized.model_used, "gpt-4");
    }

    // -- extract_placeholders --

    #[test]
    fn extracts_simple_placeholders() {
        let result = extract_placeholders("Summarize {document} for {audience}");
        assert_eq!(result, vec!["audience", "document"]);
    }

    #[test]
    fn deduplicates_placeholders() {
        let result = extract_placeholders("{topic} intro, {topic} outro");
        assert_eq!(result, vec!["topic"]);
    }

    #[test]
    fn no_placeholders_returns_empty() {
        let result = extract_placeholders("A plain prompt with no tokens");
        assert!(result.is_empty());
    }

    #[test]
    fn ignores_invalid_placeholders() {
        // Placeholder must start with letter or underscore.
        let result = extract_placeholders("Value is {123invalid}");
        assert!(result.is_empty());
    }
}
