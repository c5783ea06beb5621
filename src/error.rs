use std::io;

use thiserror::Error;

/// Problems found in a message's start line.
///
/// None of these stop validation of the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartLineError {
    /// The first line is indented.
    #[error("Start line starts with whitespace")]
    LeadingWhitespace(String),
    /// A status line whose version token is not exactly `HTTP/1.1`.
    #[error("Status line doesn't start with 'HTTP/1.1'")]
    StatusVersion(String),
    /// A status line with fewer than three tokens.
    #[error("Status line '{0}' isn't 'HTTP/1.1 [status_code] [status_phrase]'")]
    StatusShape(String),
    #[error("Non-numeric status code")]
    NonNumericStatus(String),
    /// Status code outside 100..=599.
    #[error("Status code out of range")]
    StatusOutOfRange(String),
    /// A request line with fewer than three tokens.
    #[error("Request line isn't '[method] [url] HTTP/1.1'")]
    RequestShape(String),
    #[error("Method not recognised")]
    UnknownMethod(String),
    /// A request line whose third token is not exactly `HTTP/1.1`.
    #[error("Request line '{0}' doesn't end with 'HTTP/1.1'")]
    RequestVersion(String),
    #[error("Request line has extra text")]
    ExtraText(String),
}

impl StartLineError {
    /// The text the problem should be pinned to in a location string.
    ///
    /// `None` means the message as a whole.
    pub fn pinpoint(&self) -> Option<&str> {
        match self {
            Self::LeadingWhitespace(s)
            | Self::StatusVersion(s)
            | Self::NonNumericStatus(s)
            | Self::StatusOutOfRange(s)
            | Self::UnknownMethod(s)
            | Self::ExtraText(s) => Some(s),
            Self::StatusShape(_) | Self::RequestShape(_) | Self::RequestVersion(_) => None,
        }
    }
}

/// Structural failures that stop header reconstruction for a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// A blank line came before any field line.
    #[error("Body without headers")]
    BodyWithoutHeaders,
    /// A folded line with no field to continue.
    #[error("First header field line '{0}' starts with whitespace")]
    FoldWithoutField(String),
    /// A line with no colon where a field line was expected.
    #[error("Non-field line '{0}' in content")]
    NonFieldLine(String),
}

/// Reasons a field value fails its Structured Field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValueError {
    /// The value contains a byte outside 7-bit ASCII.
    #[error("non-ASCII byte 0x{byte:02X} at offset {offset}")]
    NonAscii { byte: u8, offset: usize },
    /// The grammar checker rejected the value.
    #[error("{0}")]
    Grammar(String),
}

/// Errors building the field-type registry. All of these are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot load JSON: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot load JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON document is not an object of name → kind.
    #[error("Cannot load field type mapping: expected a JSON object")]
    NotAnObject,
    #[error("Cannot load field type mapping: '{kind}' for field '{field}' is not one of item, list, dict")]
    UnknownKind { field: String, kind: String },
}

/// Errors reading or walking a source document. All of these are fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{file}:{line}: {source}")]
    Xml {
        file: String,
        line: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("Can't determine format of {0}")]
    UnknownFormat(String),
}
