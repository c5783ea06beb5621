//! Undo RFC 8792 single-backslash line wrapping.
//!
//! Wrapped artwork starts with a fixed header line followed by a blank
//! line:
//!
//! ```text
//! NOTE: '\' line wrapping per RFC 8792
//!
//! Example-Field: some-long-value-that-\
//!   continues-here
//! ```

/// Marker announcing RFC 8792 single-backslash wrapping.
pub const RFC8792_SENTINEL: &str = "NOTE: '\\' line wrapping per RFC 8792";

/// Return `true` if `lines` start with the RFC 8792 header line.
pub fn is_wrapped(lines: &[String]) -> bool {
    lines
        .first()
        .is_some_and(|first| first.contains(RFC8792_SENTINEL))
}

/// Rejoin lines wrapped with RFC 8792 notation.
///
/// Without the header line the input is returned unchanged. With it, the
/// header and the line after it are dropped, and every line ending in `\`
/// is joined to the next line with that line's leading whitespace removed.
pub fn unwrap_lines(lines: Vec<String>) -> Vec<String> {
    if !is_wrapped(&lines) {
        return lines;
    }

    let mut output: Vec<String> = Vec::with_capacity(lines.len());
    let mut continuation = false;
    for line in lines.into_iter().skip(2) {
        let prev_continuation = continuation;
        let content = match line.strip_suffix('\\') {
            Some(stripped) => {
                continuation = true;
                stripped
            }
            None => {
                continuation = false;
                line.as_str()
            }
        };
        match output.last_mut() {
            Some(last) if prev_continuation => last.push_str(content.trim_start()),
            _ => output.push(content.to_string()),
        }
    }
    output
}
