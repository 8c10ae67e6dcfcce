//! Pure text-injection functions. The file plumbing lives in
//! [`crate::file`]; everything here is testable without I/O.

#[must_use]
pub fn begin_marker(marker: &str) -> String {
    format!("# >>> {marker} >>>")
}

#[must_use]
pub fn end_marker(marker: &str) -> String {
    format!("# <<< {marker} <<<")
}

/// Append `content` wrapped in marker lines, unless the marker is already
/// present. Returns `None` when the text is unchanged. Presence is decided
/// by the marker alone; an existing block is never re-synced.
#[must_use]
pub fn inject_block(old: &str, marker: &str, content: &str) -> Option<String> {
    let begin = begin_marker(marker);
    if old.contains(&begin) {
        return None;
    }

    let mut out = String::with_capacity(old.len() + content.len() + 64);
    out.push_str(old);
    if !old.is_empty() && !old.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&begin);
    out.push('\n');
    out.push_str(content);
    if !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&end_marker(marker));
    out.push('\n');
    Some(out)
}

/// Append every line not already present verbatim, preserving existing
/// content and order. Returns `None` when all lines are present.
#[must_use]
pub fn inject_lines(old: &str, lines: &[&str]) -> Option<String> {
    let existing: Vec<&str> = old.lines().collect();
    let missing: Vec<&str> = lines
        .iter()
        .filter(|line| !existing.contains(*line))
        .copied()
        .collect();

    if missing.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(old.len() + 64);
    out.push_str(old);
    if !old.is_empty() && !old.ends_with('\n') {
        out.push('\n');
    }
    for line in missing {
        out.push_str(line);
        out.push('\n');
    }
    Some(out)
}
