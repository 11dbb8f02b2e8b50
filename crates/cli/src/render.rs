//! Plain-text list rendering for shell output.

use std::fmt::Display;

/// One item per line, or `empty` when there is nothing to show.
pub fn lines_or<I>(items: I, empty: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let lines: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

/// Like [`lines_or`], with each line prefixed by its 1-based position.
pub fn numbered_or<I>(items: I, empty: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    lines_or(
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item)),
        empty,
    )
}
