use regex::Regex;
use tracing::warn;

/// Typed failure for theme-list reconciliation. Callers decide whether to
/// retry the request or degrade to "themes unavailable".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("no JSON array found in model reply")]
    NoArray,

    #[error("array span is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("parsed JSON is not an array of strings")]
    NotStringArray,
}

/// Reduce a sentiment reply to its label: trim and return verbatim.
///
/// Total function. The result is NOT validated against
/// Positive/Neutral/Negative — callers must treat it as free text.
pub fn reconcile_label(raw: &str) -> String {
    raw.trim().to_string()
}

/// Extract a JSON array of strings from a model reply that may wrap it in
/// markdown code fences and may leave a trailing comma before the closing
/// bracket.
///
/// The array span runs from the first `[` to the last `]` of the cleaned
/// text. Bracket characters in surrounding prose therefore corrupt the
/// span; see `test_prose_brackets_corrupt_span`.
pub fn reconcile_theme_list(raw: &str, expected_count: usize) -> Result<Vec<String>, ReconcileError> {
    let cleaned = strip_code_fences(raw);
    let cleaned = repair_trailing_commas(&cleaned);

    let start = cleaned.find('[').ok_or(ReconcileError::NoArray)?;
    let end = cleaned.rfind(']').ok_or(ReconcileError::NoArray)?;
    if end < start {
        return Err(ReconcileError::NoArray);
    }
    let span = &cleaned[start..=end];

    let value: serde_json::Value =
        serde_json::from_str(span).map_err(|e| ReconcileError::InvalidJson(e.to_string()))?;

    let items = value.as_array().ok_or(ReconcileError::NotStringArray)?;
    let themes = items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or(ReconcileError::NotStringArray)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if themes.len() != expected_count {
        warn!(
            expected = expected_count,
            got = themes.len(),
            "theme count differs from requested"
        );
    }

    Ok(themes)
}

/// Remove a leading ` ```json `/` ``` ` fence and a trailing ` ``` ` fence.
/// Patterns are anchored; fences in the middle of the text are untouched.
fn strip_code_fences(input: &str) -> String {
    let open = Regex::new(r"^```(?:json)?\s*").unwrap();
    let close = Regex::new(r"\s*```$").unwrap();

    let trimmed = input.trim();
    let without_open = open.replace(trimmed, "");
    close.replace(&without_open, "").into_owned()
}

/// Drop a comma sitting directly before a closing bracket (`,  ]` -> `]`),
/// the one class of malformed JSON the model produces often enough to repair.
fn repair_trailing_commas(input: &str) -> String {
    let re = Regex::new(r",\s*\]").unwrap();
    re.replace_all(input, "]").into_owned()
}
