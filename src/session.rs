use std::fmt::Display;

use tracing::{debug, debug_span, trace};

use crate::dispatch::{Dispatch, GrammarChecker, SfvChecker, dispatch_field};
use crate::headers::{HeaderReconstructor, LineOutcome};
use crate::normalize::unwrap_lines;
use crate::registry::FieldTypeRegistry;
use crate::report::Reporter;
use crate::start_line::check_start_line;
use crate::types::HeaderSet;

/// Maps an optional pinpoint (a field, a token, a line) to a printable
/// location such as `draft.xml:42 'Accept'`.
///
/// Supplied by whoever found the text; the session never looks inside.
pub type Locate<'l> = &'l dyn Fn(Option<&str>) -> String;

/// Validates messages one at a time and counts the errors reported.
///
/// ```rust
/// use rfc_http_validate::{FieldTypeRegistry, Recorder, Session};
///
/// let registry = FieldTypeRegistry::baseline();
/// let mut recorder = Recorder::new();
/// let mut session = Session::new(&registry, &mut recorder);
///
/// let location = |_: Option<&str>| "example".to_string();
/// session.validate("GET / HTTP/1.1\nHost: example.com\n", &location);
/// assert_eq!(session.error_count(), 0);
/// ```
pub struct Session<'a> {
    registry: &'a FieldTypeRegistry,
    checker: &'a dyn GrammarChecker,
    reporter: &'a mut dyn Reporter,
    errors: usize,
}

impl<'a> Session<'a> {
    /// Session checking values with [`SfvChecker`].
    pub fn new(registry: &'a FieldTypeRegistry, reporter: &'a mut dyn Reporter) -> Self {
        Self::with_checker(registry, &SfvChecker, reporter)
    }

    pub fn with_checker(
        registry: &'a FieldTypeRegistry,
        checker: &'a dyn GrammarChecker,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            registry,
            checker,
            reporter,
            errors: 0,
        }
    }

    /// Errors reported so far across every message.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Validate one HTTP message (start line, fields, optional body).
    ///
    /// Returns the number of errors found in this message. Nothing here
    /// fails outright: every problem becomes an event.
    pub fn validate(&mut self, raw: &str, location: Locate<'_>) -> usize {
        let _span = debug_span!("message", at = %location(None)).entered();
        let before = self.errors;

        let lines = unwrap_lines(message_lines(raw));
        let Some(first) = lines.first() else {
            self.error(location(None), "Empty http-message");
            return self.errors - before;
        };

        let check = check_start_line(first);
        trace!(consumed = check.consumed, start_line = ?check.start_line, "start line");
        for problem in &check.problems {
            self.error(location(problem.pinpoint()), problem);
        }

        if let Some(fields) = self.reconstruct(&lines[check.consumed..], location) {
            self.dispatch(&fields, location);
        }
        self.errors - before
    }

    /// Validate a block holding only field lines.
    ///
    /// No start line is expected and blank lines are ignored.
    pub fn validate_fields(&mut self, raw: &str, location: Locate<'_>) -> usize {
        let _span = debug_span!("fields", at = %location(None)).entered();
        let before = self.errors;

        let lines: Vec<String> = unwrap_lines(message_lines(raw))
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            self.error(location(None), "Empty http-structured-fields");
            return self.errors - before;
        }

        if let Some(fields) = self.reconstruct(&lines, location) {
            self.dispatch(&fields, location);
        }
        self.errors - before
    }

    /// Report a section that is not checked.
    pub fn skip_section(&mut self, section_type: &str, location: Locate<'_>) {
        self.reporter.skip(
            &location(Some(section_type)),
            "section not a 'http-message'",
        );
    }

    /// Forward an unrecoverable condition to the reporter.
    pub fn fatal_error(&mut self, message: &str) {
        self.reporter.fatal_error(message);
    }

    fn reconstruct(&mut self, lines: &[String], location: Locate<'_>) -> Option<HeaderSet> {
        let mut headers = HeaderReconstructor::new();
        for line in lines {
            match headers.feed_line(line) {
                Ok(LineOutcome::WhitespaceBeforeColon(name)) => {
                    self.error(
                        location(Some(&name)),
                        "Whitespace between field name and colon",
                    );
                }
                Ok(LineOutcome::WhitespaceInName(name)) => {
                    self.error(location(Some(&name)), "Whitespace in field name");
                }
                Ok(LineOutcome::BodyStarted) => self.reporter.status("ignoring HTTP message body"),
                Ok(_) => {}
                Err(e) => {
                    self.error(location(None), e);
                    return None;
                }
            }
        }
        Some(headers.finish())
    }

    fn dispatch(&mut self, fields: &HeaderSet, location: Locate<'_>) {
        for field in fields {
            match dispatch_field(self.registry, self.checker, field) {
                Dispatch::Valid(kind) => {
                    trace!(field = %field.name, %kind, "valid");
                    let subject = format!("{}: {}", field.name, field.value);
                    self.reporter.success(&location(Some(&subject)), "valid");
                }
                Dispatch::Invalid(kind, e) => {
                    debug!(field = %field.name, %kind, error = %e, "invalid field value");
                    let subject = format!("{}: {}", field.name, field.value);
                    self.error(location(Some(&subject)), e);
                }
                Dispatch::Untyped => {
                    self.reporter
                        .skip(&location(Some(&field.name)), "no type information");
                }
            }
        }
    }

    fn error(&mut self, subject: String, message: impl Display) {
        self.errors += 1;
        self.reporter.error(&subject, &message.to_string());
    }
}

/// Split raw block text into lines, dropping CRs and blank lines at
/// either end.
fn message_lines(raw: &str) -> Vec<String> {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].iter().map(|l| l.to_string()).collect(),
        _ => Vec::new(),
    }
}
