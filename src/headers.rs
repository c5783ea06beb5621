use crate::error::HeaderError;
use crate::types::HeaderSet;

// ---------------------------------------------------------------------------
// Line outcome
// ---------------------------------------------------------------------------

/// What a single line contributed to the header set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A new field line (or a repeat of an earlier name).
    Field,
    /// An obs-fold line continued the previous field.
    Folded,
    /// A field line with whitespace between its name and the colon.
    /// The field is still recorded under the trimmed name.
    WhitespaceBeforeColon(String),
    /// A field line whose name contains whitespace, as in `Foo Bar: x`.
    /// The field is still recorded under the trimmed name.
    WhitespaceInName(String),
    /// The blank line that separates the body; fields end here.
    BodyStarted,
    /// A line inside the body, ignored.
    Body,
}

// ---------------------------------------------------------------------------
// Reconstructor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fields,
    Body,
}

/// Rebuilds logical fields from physical lines, one line at a time.
///
/// Repeated names are combined with `", "`; obs-fold lines continue the
/// previous field's value after a single space.
///
/// ```rust
/// use rfc_http_validate::HeaderReconstructor;
///
/// let mut headers = HeaderReconstructor::new();
/// for line in ["Accept: a", "  b", "Accept: c"] {
///     headers.feed_line(line).unwrap();
/// }
/// let set = headers.finish();
/// assert_eq!(set.get("accept"), Some("a b, c"));
/// ```
#[derive(Debug, Clone)]
pub struct HeaderReconstructor {
    state: State,
    fields: HeaderSet,
    prev_name: Option<String>,
}

impl HeaderReconstructor {
    pub fn new() -> Self {
        Self {
            state: State::Fields,
            fields: HeaderSet::new(),
            prev_name: None,
        }
    }

    /// Feed the next physical line (a trailing CR is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError`] when the line cannot be part of a field
    /// section. The message should not be processed any further.
    pub fn feed_line(&mut self, line: &str) -> Result<LineOutcome, HeaderError> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if self.state == State::Body {
            return Ok(LineOutcome::Body);
        }

        if line.trim().is_empty() {
            if self.fields.is_empty() {
                return Err(HeaderError::BodyWithoutHeaders);
            }
            self.state = State::Body;
            return Ok(LineOutcome::BodyStarted);
        }

        if line.starts_with(char::is_whitespace) {
            let folded = match &self.prev_name {
                Some(name) => self.fields.fold(name, line.trim()),
                None => false,
            };
            return if folded {
                Ok(LineOutcome::Folded)
            } else {
                Err(HeaderError::FoldWithoutField(line.to_string()))
            };
        }

        let Some((raw_name, value)) = line.split_once(':') else {
            return Err(HeaderError::NonFieldLine(line.to_string()));
        };

        let name = raw_name.trim_end();
        let outcome = if name.contains(char::is_whitespace) {
            LineOutcome::WhitespaceInName(name.to_string())
        } else if name.len() != raw_name.len() {
            LineOutcome::WhitespaceBeforeColon(name.to_string())
        } else {
            LineOutcome::Field
        };

        self.fields.append(name, value.trim());
        self.prev_name = Some(name.to_ascii_lowercase());
        Ok(outcome)
    }

    /// Returns `true` once the body separator has been seen.
    pub fn in_body(&self) -> bool {
        self.state == State::Body
    }

    /// Consume the reconstructor and return the fields collected so far.
    pub fn finish(self) -> HeaderSet {
        self.fields
    }
}

impl Default for HeaderReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconstruct the fields of `lines`, ignoring any body.
///
/// Recoverable per-line findings are dropped; use [`HeaderReconstructor`]
/// directly to observe them.
///
/// # Errors
///
/// Returns the first structural [`HeaderError`].
pub fn reconstruct_headers<I, S>(lines: I) -> Result<HeaderSet, HeaderError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers = HeaderReconstructor::new();
    for line in lines {
        headers.feed_line(line.as_ref())?;
    }
    Ok(headers.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_field_lines_are_combined() {
        let set = reconstruct_headers(["X: a", "X: b"]).unwrap();
        assert_eq!(set.get("x"), Some("a, b"));
    }

    #[test]
    fn folded_line_joins_with_one_space() {
        let set = reconstruct_headers(["X: a", "  b"]).unwrap();
        assert_eq!(set.get("x"), Some("a b"));
    }

    #[test]
    fn folding_at_any_depth() {
        for depth in 1..6 {
            let mut lines = vec!["X: v0".to_string()];
            let mut expected = "v0".to_string();
            for i in 1..=depth {
                lines.push(format!("   \tv{i}   "));
                expected.push_str(&format!(" v{i}"));
            }
            let set = reconstruct_headers(&lines).unwrap();
            assert_eq!(set.get("x"), Some(expected.as_str()), "depth {depth}");
        }
    }

    #[test]
    fn fold_continues_most_recent_field() {
        let set = reconstruct_headers(["A: 1", "B: 2", "A: 3", " 4"]).unwrap();
        assert_eq!(set.get("a"), Some("1, 3 4"));
        assert_eq!(set.get("b"), Some("2"));
    }

    #[test]
    fn names_are_lowercased_and_values_trimmed() {
        let set = reconstruct_headers(["Content-TYPE:   text/plain  "]).unwrap();
        let field = set.iter().next().unwrap();
        assert_eq!(field.name, "content-type");
        assert_eq!(field.value, "text/plain");
    }

    #[test]
    fn value_may_contain_colons() {
        let set = reconstruct_headers(["Host: example.com:8080"]).unwrap();
        assert_eq!(set.get("host"), Some("example.com:8080"));
    }

    #[test]
    fn blank_line_before_fields_is_an_error() {
        assert_eq!(
            reconstruct_headers(["", "X: a"]),
            Err(HeaderError::BodyWithoutHeaders)
        );
        assert_eq!(
            reconstruct_headers(["   "]),
            Err(HeaderError::BodyWithoutHeaders)
        );
    }

    #[test]
    fn body_is_ignored() {
        let mut headers = HeaderReconstructor::new();
        assert_eq!(headers.feed_line("X: a"), Ok(LineOutcome::Field));
        assert_eq!(headers.feed_line(""), Ok(LineOutcome::BodyStarted));
        assert!(headers.in_body());
        assert_eq!(headers.feed_line("not a field"), Ok(LineOutcome::Body));
        assert_eq!(headers.feed_line(""), Ok(LineOutcome::Body));
        assert_eq!(headers.feed_line("Y: b"), Ok(LineOutcome::Body));
        let set = headers.finish();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn fold_before_any_field_is_an_error() {
        assert_eq!(
            reconstruct_headers(["  a"]),
            Err(HeaderError::FoldWithoutField("  a".into()))
        );
    }

    #[test]
    fn line_without_colon_is_an_error() {
        assert_eq!(
            reconstruct_headers(["X: a", "garbage"]),
            Err(HeaderError::NonFieldLine("garbage".into()))
        );
    }

    #[test]
    fn whitespace_before_colon_is_recoverable() {
        let mut headers = HeaderReconstructor::new();
        assert_eq!(
            headers.feed_line("Accept : a"),
            Ok(LineOutcome::WhitespaceBeforeColon("Accept".into()))
        );
        assert_eq!(headers.feed_line(" b"), Ok(LineOutcome::Folded));
        assert_eq!(headers.finish().get("accept"), Some("a b"));
    }

    #[test]
    fn whitespace_inside_name_is_recoverable() {
        let mut headers = HeaderReconstructor::new();
        assert_eq!(
            headers.feed_line("Foo Bar: x"),
            Ok(LineOutcome::WhitespaceInName("Foo Bar".into()))
        );
        assert_eq!(
            headers.feed_line("Foo\tBar : y"),
            Ok(LineOutcome::WhitespaceInName("Foo\tBar".into()))
        );
        assert_eq!(headers.feed_line("Baz: z"), Ok(LineOutcome::Field));
        let set = headers.finish();
        assert_eq!(set.get("foo bar"), Some("x"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let set = reconstruct_headers(["X: a\r", "\r", "body\r"]).unwrap();
        assert_eq!(set.get("x"), Some("a"));
    }
}
