use crate::markup::ParseError;

/// Builds the single user-facing message for a set of parse errors.
///
/// Each error contributes its [`ParseError::summary`]; repeated summaries
/// are listed once, in first-seen order, joined with `", "`.
pub fn format_errors(errors: &[ParseError]) -> String {
    let mut summaries: Vec<String> = Vec::new();
    for error in errors {
        let summary = error.summary();
        if !summaries.contains(&summary) {
            summaries.push(summary);
        }
    }
    summaries.join(", ")
}

/// Appends `errors` to `into`, skipping messages that are already present.
pub(crate) fn merge_unique(into: &mut Vec<ParseError>, errors: Vec<ParseError>) {
    for error in errors {
        let raw = error.to_string();
        if !into.iter().any(|seen| seen.to_string() == raw) {
            into.push(error);
        }
    }
}
