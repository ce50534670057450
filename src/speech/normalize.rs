//! Text normalization for the speech engine
//!
//! Turns pasted or typed text into a single plain-text argument: markup is
//! stripped, whitespace collapsed, and punctuation outside a small allowed
//! set removed.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?'-]").expect("valid regex"));

/// Collapse whitespace runs to a single space and trim both ends
fn collapse_whitespace(text: &str) -> String {
    SPACES_RE.replace_all(text.trim(), " ").into_owned()
}

/// Remove all `<...>` tag spans and collapse whitespace
pub fn strip_markup(markup_text: &str) -> String {
    let text = TAG_RE.replace_all(markup_text, "");
    collapse_whitespace(&text)
}

/// Normalize text so it can be handed to the engine as one argument
///
/// Keeps word characters, whitespace and `.,!?'-`. An empty result means
/// there is nothing to speak.
pub fn normalize(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let filtered = DISALLOWED_RE.replace_all(&collapsed, "");
    // Dropping a symbol between two spaces leaves a double space behind
    collapse_whitespace(&filtered)
}

/// Whether the text still has something to say after normalization
pub fn is_speakable(text: &str) -> bool {
    !normalize(text).is_empty()
}

/// Whether clipboard text contains at least one tag span
pub fn looks_like_markup(text: &str) -> bool {
    TAG_RE.is_match(text)
}
