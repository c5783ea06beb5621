//! Find HTTP message examples in source documents.
//!
//! Each extractor walks one document format, finds code sections and
//! hands their text to a [`Session`] together with a location resolver.

mod markdown;
mod xml;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ExtractError;
use crate::session::{Locate, Session};

/// Section type holding a complete HTTP message.
pub const HTTP_MESSAGE: &str = "http-message";
/// Section type holding only field lines.
pub const HTTP_STRUCTURED_FIELDS: &str = "http-structured-fields";

/// Source document formats that can be searched for examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// xml2rfc v3: `<sourcecode>` and `<artwork>` with a `type` attribute.
    Xml,
    /// CommonMark: code blocks with an info string.
    Markdown,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "xml" => Some(Self::Xml),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Validate every example found in `source`.
    ///
    /// `file_name` only appears in location strings.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the document itself cannot be parsed.
    pub fn extract(
        self,
        source: &str,
        file_name: &str,
        session: &mut Session<'_>,
    ) -> Result<(), ExtractError> {
        debug!(file = file_name, format = ?self, "extracting");
        match self {
            Self::Xml => xml::extract(source, file_name, session),
            Self::Markdown => {
                markdown::extract(source, file_name, session);
                Ok(())
            }
        }
    }
}

/// Read `path` and validate every example in it.
///
/// # Errors
///
/// Returns [`ExtractError`] if the format is unknown, the file cannot be
/// read, or the document cannot be parsed.
pub fn extract_file(path: &Path, session: &mut Session<'_>) -> Result<(), ExtractError> {
    let display = path.display().to_string();
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ExtractError::UnknownFormat(display.clone()))?;
    let source = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: display.clone(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(display);
    format.extract(&source, &file_name, session)
}

/// Route a section's text by its declared type.
fn dispatch_section(
    session: &mut Session<'_>,
    section_type: &str,
    content: &str,
    location: Locate<'_>,
) {
    match section_type {
        HTTP_MESSAGE => {
            session.validate(content, location);
        }
        HTTP_STRUCTURED_FIELDS => {
            session.validate_fields(content, location);
        }
        other => session.skip_section(other, location),
    }
}

/// `file:line`, followed by ` 'pinpoint'` when there is one.
pub fn format_location(file_name: &str, line: usize, pinpoint: Option<&str>) -> String {
    match pinpoint {
        Some(pin) if !pin.is_empty() => format!("{file_name}:{line} '{pin}'"),
        _ => format!("{file_name}:{line}"),
    }
}

/// 1-based line number of byte `offset` in `source`.
fn line_at(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
