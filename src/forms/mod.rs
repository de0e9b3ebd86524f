use validator::ValidationErrors;

pub mod auth;
pub mod cart;
pub mod categories;
pub mod contact;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reviews;

/// Collapse runs of whitespace into a single space and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let visible: String = input
        .chars()
        .filter(|ch| ch.is_whitespace() || !ch.is_control())
        .collect();

    visible.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize each line, trim blank lines at both ends and keep at most one
/// blank line between paragraphs.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);

    let mut result: Vec<&str> = Vec::with_capacity(last - first + 1);
    for line in &lines[first..=last] {
        if line.is_empty() && result.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        result.push(line);
    }

    result.join("\n")
}

/// Sanitized value or `None` when nothing is left.
pub(crate) fn non_empty(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

/// Comma separated, sorted list of the fields that failed validation.
pub(crate) fn invalid_fields(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|key| key.to_string())
        .collect();
    fields.sort_unstable();
    fields.join(", ")
}
