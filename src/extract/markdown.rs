use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use super::{dispatch_section, format_location, line_at};
use crate::session::Session;

/// Walk a CommonMark document and validate each code block.
///
/// The first word of a fenced block's info string is its section type;
/// indented blocks have none and are skipped. Locations point at the
/// block's first line.
pub(super) fn extract(source: &str, file_name: &str, session: &mut Session<'_>) {
    let mut open: Option<(String, usize)> = None;
    let mut content = String::new();

    for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let section_type = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                open = Some((section_type, line_at(source, range.start)));
                content.clear();
            }
            Event::Text(text) if open.is_some() => content.push_str(&text),
            Event::End(TagEnd::CodeBlock) => {
                if let Some((section_type, line)) = open.take() {
                    let location =
                        |pinpoint: Option<&str>| format_location(file_name, line, pinpoint);
                    dispatch_section(session, &section_type, &content, &location);
                }
            }
            _ => {}
        }
    }
}
