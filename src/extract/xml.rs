use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{dispatch_section, format_location, line_at};
use crate::error::ExtractError;
use crate::session::Session;

/// Elements whose text may be an example.
const CODE_ELEMENTS: [&[u8]; 2] = [b"sourcecode", b"artwork"];

/// An open code element being collected.
struct Section {
    element: Vec<u8>,
    section_type: String,
    content: String,
}

/// Walk an xml2rfc document and validate each typed code section.
///
/// The text of a `<sourcecode>` or `<artwork>` element carrying a `type`
/// attribute is collected, CDATA included, and dispatched when the
/// element closes. Locations point at the closing tag's line.
pub(super) fn extract(
    source: &str,
    file_name: &str,
    session: &mut Session<'_>,
) -> Result<(), ExtractError> {
    let mut reader = Reader::from_str(source);
    let fail = |reader: &Reader<&[u8]>, source_err: quick_xml::Error| ExtractError::Xml {
        file: file_name.to_string(),
        line: line_at(source, reader.buffer_position()),
        source: source_err,
    };

    let mut open: Option<Section> = None;
    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => return Err(fail(&reader, e)),
        };
        match event {
            Event::Start(start) if open.is_none() => {
                open = section_for(&start).map_err(|e| fail(&reader, e))?;
            }
            Event::Empty(start) if open.is_none() => {
                if let Some(section) = section_for(&start).map_err(|e| fail(&reader, e))? {
                    finish(section, source, file_name, reader.buffer_position(), session);
                }
            }
            Event::Text(text) => {
                if let Some(section) = open.as_mut() {
                    let text = text.unescape().map_err(|e| fail(&reader, e))?;
                    section.content.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(section) = open.as_mut() {
                    section.content.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(end) => {
                let closes = open
                    .as_ref()
                    .is_some_and(|section| section.element == end.name().as_ref());
                if closes {
                    if let Some(section) = open.take() {
                        finish(section, source, file_name, reader.buffer_position(), session);
                    }
                }
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
    }
}

/// Start collecting if `start` is a code element with a `type`.
fn section_for(start: &BytesStart<'_>) -> Result<Option<Section>, quick_xml::Error> {
    let name = start.name();
    if !CODE_ELEMENTS.contains(&name.as_ref()) {
        return Ok(None);
    }
    let Some(attr) = start.try_get_attribute("type")? else {
        return Ok(None);
    };
    Ok(Some(Section {
        element: name.as_ref().to_vec(),
        section_type: attr.unescape_value()?.into_owned(),
        content: String::new(),
    }))
}

fn finish(
    section: Section,
    source: &str,
    file_name: &str,
    position: usize,
    session: &mut Session<'_>,
) {
    let line = line_at(source, position);
    let location = |pinpoint: Option<&str>| format_location(file_name, line, pinpoint);
    dispatch_section(session, &section.section_type, &section.content, &location);
}
