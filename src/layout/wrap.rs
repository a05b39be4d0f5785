//! Greedy word wrapping against a measured width budget.

/// Break `value` into lines.
///
/// The first line sits after the field label and gets `first_budget`; every
/// later line starts at the label's x-origin and gets `rest_budget`. Words are
/// separated by single spaces regardless of the input whitespace. The first
/// word always starts beside the label, and a word that is wider than its
/// line still occupies that line alone.
///
/// Always returns at least one line; an empty value yields `[""]`.
pub fn wrap_value<F>(value: &str, first_budget: f32, rest_budget: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in value.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let budget = if lines.is_empty() {
            first_budget
        } else {
            rest_budget
        };
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= budget {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Collapse whitespace runs to single spaces.
pub fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
