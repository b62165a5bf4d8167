//! Turning a model's free-text reply into a binary verdict.

/// Canonical closing phrase the model is told to use for clickbait.
pub const CLICKBAIT_PHRASE: &str = "is clickbait";
/// Canonical closing phrase for the negative verdict.
pub const NOT_CLICKBAIT_PHRASE: &str = "is not clickbait";

const NOT_CLICKBAIT_MARKER: &str = "IS NOT CLICKBAIT";

/// Derives the verdict from the reply text. Only an explicit occurrence of
/// the negative phrase clears a headline; a reply carrying neither canonical
/// phrase, or an otherwise ambiguous one, counts as clickbait.
pub fn is_clickbait(analysis: &str) -> bool {
    !analysis.to_uppercase().contains(NOT_CLICKBAIT_MARKER)
}
