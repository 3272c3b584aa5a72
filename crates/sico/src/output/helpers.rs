//! Common helper functions for output formatting.

/// Placeholder shown for empty cells.
pub const EMPTY_CELL: &str = "-";

/// Truncates a string to at most `max_len` characters, ending in `...` when cut.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Returns the trimmed value, or `-` when it is missing or blank.
pub fn or_dash(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => EMPTY_CELL,
    }
}

/// Formats a yes/no flag.
pub fn format_flag(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Left-aligns `s` in a cell of `width` characters, truncating as needed.
pub fn cell(s: &str, width: usize) -> String {
    let truncated = truncate_str(s, width);
    let pad = width.saturating_sub(truncated.chars().count());
    format!("{}{}", truncated, " ".repeat(pad))
}
