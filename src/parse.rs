//! Best-effort parsing of raw AI replies into structured lists.
//!
//! The generative backend's output format is advisory, not contractual.
//! Parsing degrades to an empty result on mismatch instead of failing, and
//! callers treat "empty" as "no usable suggestions".

/// Extract bullet-list items from a raw AI reply.
///
/// A line counts as an item when it starts with `-`, `*`, `•`, or a numbered
/// marker like `1.` / `2)`. Returns the trimmed text of each item in document
/// order; an empty vec when no bullet lines are found.
pub fn extract_list_items(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(strip_bullet)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("• "))
    {
        return Some(rest.trim());
    }
    // Numbered markers: "1. Foo" or "2) Foo"
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Some(rest);
            }
        }
    }
    None
}

/// Split a comma-separated AI reply into lowercase tokens.
///
/// Trims whitespace around each token, lowercases it, and drops tokens that
/// are empty after trimming. Order is preserved; duplicates are kept (callers
/// that need set semantics deduplicate themselves).
pub fn extract_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}
