use serde::Serialize;

/// Receives the events produced while validating.
///
/// Every method defaults to doing nothing, so a sink only implements the
/// events it cares about. Counting errors is the session's job, not the
/// sink's.
pub trait Reporter {
    /// Narration with no effect on the outcome.
    fn status(&mut self, _message: &str) {}

    /// A field value passed its grammar check.
    fn success(&mut self, _subject: &str, _message: &str) {}

    /// Something was deliberately not checked.
    fn skip(&mut self, _subject: &str, _message: &str) {}

    /// A validation error.
    fn error(&mut self, _subject: &str, _message: &str) {}

    /// The run cannot continue. The caller terminates afterwards.
    fn fatal_error(&mut self, _message: &str) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// One reported event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Status { message: String },
    Success { subject: String, message: String },
    Skip { subject: String, message: String },
    Error { subject: String, message: String },
    FatalError { message: String },
}

/// Keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of all `error` events, in order.
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Error { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Subjects of all `success` events, in order.
    pub fn successes(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Success { subject, .. } => Some(subject.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Subjects of all `skip` events, in order.
    pub fn skips(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Skip { subject, .. } => Some(subject.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for Recorder {
    fn status(&mut self, message: &str) {
        self.events.push(Event::Status {
            message: message.into(),
        });
    }

    fn success(&mut self, subject: &str, message: &str) {
        self.events.push(Event::Success {
            subject: subject.into(),
            message: message.into(),
        });
    }

    fn skip(&mut self, subject: &str, message: &str) {
        self.events.push(Event::Skip {
            subject: subject.into(),
            message: message.into(),
        });
    }

    fn error(&mut self, subject: &str, message: &str) {
        self.events.push(Event::Error {
            subject: subject.into(),
            message: message.into(),
        });
    }

    fn fatal_error(&mut self, message: &str) {
        self.events.push(Event::FatalError {
            message: message.into(),
        });
    }
}
