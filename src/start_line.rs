use crate::error::StartLineError;
use crate::types::{HTTP_11, StartLine, is_registered_method};

/// Result of checking the first line of a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartLineCheck {
    /// Lines to skip before field lines begin (0 or 1).
    pub consumed: usize,
    /// The start line, if it could be tokenised.
    pub start_line: Option<StartLine>,
    /// Every problem found, in the order checked.
    pub problems: Vec<StartLineError>,
}

impl StartLineCheck {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    fn header_line() -> Self {
        Self::default()
    }

    fn consumed(start_line: Option<StartLine>, problems: Vec<StartLineError>) -> Self {
        Self {
            consumed: 1,
            start_line,
            problems,
        }
    }
}

/// Classify and check the first logical line of a message.
///
/// A line whose first token ends in `:` is taken as the first field line
/// and nothing is consumed. An indented line is reported and also left in
/// place so the field stage sees it. Anything else is consumed: a first
/// token containing `http` (any case) is checked as a status line,
/// otherwise as a request line.
///
/// ```rust
/// use rfc_http_validate::check_start_line;
///
/// let check = check_start_line("HTTP/1.1 200 OK");
/// assert_eq!(check.consumed, 1);
/// assert!(check.is_clean());
/// ```
pub fn check_start_line(line: &str) -> StartLineCheck {
    if line.starts_with(char::is_whitespace) {
        return StartLineCheck {
            problems: vec![StartLineError::LeadingWhitespace(line.to_string())],
            ..StartLineCheck::header_line()
        };
    }

    let parts: Vec<&str> = line.split(' ').collect();
    if parts[0].ends_with(':') {
        return StartLineCheck::header_line();
    }

    if parts[0].to_ascii_lowercase().contains("http") {
        check_status_line(line, &parts)
    } else {
        check_request_line(line, &parts)
    }
}

fn check_status_line(line: &str, parts: &[&str]) -> StartLineCheck {
    if parts[0] != HTTP_11 {
        return StartLineCheck::consumed(None, vec![StartLineError::StatusVersion(line.into())]);
    }
    if parts.len() < 3 {
        return StartLineCheck::consumed(None, vec![StartLineError::StatusShape(line.into())]);
    }

    let code = parts[1];
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return StartLineCheck::consumed(None, vec![StartLineError::NonNumericStatus(code.into())]);
    }
    // All digits, so a parse failure can only be overflow.
    match code.parse::<u16>() {
        Ok(n) if (100..=599).contains(&n) => StartLineCheck::consumed(
            Some(StartLine::Status {
                version: parts[0].to_string(),
                code: n,
                reason: parts[2..].join(" "),
            }),
            Vec::new(),
        ),
        _ => StartLineCheck::consumed(None, vec![StartLineError::StatusOutOfRange(code.into())]),
    }
}

fn check_request_line(line: &str, parts: &[&str]) -> StartLineCheck {
    if parts.len() < 3 {
        return StartLineCheck::consumed(None, vec![StartLineError::RequestShape(line.into())]);
    }

    let mut problems = Vec::new();
    if !is_registered_method(parts[0]) {
        problems.push(StartLineError::UnknownMethod(parts[0].into()));
    }
    if parts[2] != HTTP_11 {
        problems.push(StartLineError::RequestVersion(line.into()));
    }
    if parts.len() > 3 {
        problems.push(StartLineError::ExtraText(line.into()));
    }

    StartLineCheck::consumed(
        Some(StartLine::Request {
            method: parts[0].to_string(),
            target: parts[1].to_string(),
            version: parts[2].to_string(),
        }),
        problems,
    )
}
