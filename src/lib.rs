//! # rfc-http-validate
//!
//! Checks the HTTP message examples embedded in RFC source documents.
//!
//! Each example goes through the same pipeline:
//!
//! 1. RFC 8792 `\` line wrapping is undone.
//! 2. The start line is classified and checked (request line, status
//!    line, or none when the block starts with a field line).
//! 3. Field lines are merged into one logical value per field name,
//!    following obs-fold continuations and combining repeated names.
//! 4. Every field with a registered type has its value parsed as a
//!    Structured Field Item, List or Dictionary.
//!
//! Findings are reported to a [`Reporter`]; a [`Session`] counts the
//! errors across all messages of a run.
//!
//! ## Quick start
//!
//! ```rust
//! use rfc_http_validate::{RegistryBuilder, Recorder, Session};
//!
//! let registry = RegistryBuilder::new().dictionary("Example-Dict").build();
//! let mut recorder = Recorder::new();
//! let mut session = Session::new(&registry, &mut recorder);
//!
//! let message = "HTTP/1.1 200 OK\nExample-Dict: a=1, b\nCache-Control: max-age=60\n";
//! let location = |pin: Option<&str>| format!("example:1 {}", pin.unwrap_or(""));
//! assert_eq!(session.validate(message, &location), 0);
//! assert_eq!(recorder.successes().len(), 2);
//! ```
//!
//! ## Documents
//!
//! ```rust
//! use rfc_http_validate::{DocumentFormat, FieldTypeRegistry, NullReporter, Session};
//!
//! let doc = r#"<rfc><sourcecode type="http-message">
//! GET / HTTP/1.1
//! Cache-Control: Max-Age=60
//! </sourcecode></rfc>"#;
//!
//! let registry = FieldTypeRegistry::baseline();
//! let mut sink = NullReporter;
//! let mut session = Session::new(&registry, &mut sink);
//! DocumentFormat::Xml.extract(doc, "draft.xml", &mut session).unwrap();
//! assert_eq!(session.error_count(), 1); // dictionary keys are lowercase
//! ```

mod dispatch;
mod error;
mod extract;
mod headers;
mod normalize;
mod output;
mod registry;
mod report;
mod session;
mod start_line;
mod types;

// Re-export public API.
pub use dispatch::{Dispatch, GrammarChecker, SfvChecker, check_field_value, dispatch_field};
pub use error::{ConfigError, ExtractError, FieldValueError, HeaderError, StartLineError};
pub use extract::{
    DocumentFormat, HTTP_MESSAGE, HTTP_STRUCTURED_FIELDS, extract_file, format_location,
};
pub use headers::{HeaderReconstructor, LineOutcome, reconstruct_headers};
pub use normalize::{RFC8792_SENTINEL, is_wrapped, unwrap_lines};
pub use output::{ConsoleReporter, format_json};
pub use registry::{BASELINE_FIELDS, FieldTypeRegistry, RegistryBuilder};
pub use report::{Event, NullReporter, Recorder, Reporter};
pub use session::{Locate, Session};
pub use start_line::{StartLineCheck, check_start_line};
pub use types::{
    Field, FieldKind, HTTP_11, HeaderSet, REGISTERED_METHODS, StartLine, is_registered_method,
};
