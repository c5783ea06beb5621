use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::report::{Event, Recorder, Reporter};

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Prints one line per event, coloured when the streams allow it.
///
/// Successes are green, skips yellow and errors red. Fatal errors go to
/// the error stream. In quiet mode only errors are printed.
pub struct ConsoleReporter<W: WriteColor = StandardStream> {
    out: W,
    err: W,
    quiet: bool,
}

impl ConsoleReporter {
    /// Reporter on stdout / stderr.
    pub fn stdio(color: ColorChoice, quiet: bool) -> Self {
        Self::with_writers(
            StandardStream::stdout(color),
            StandardStream::stderr(color),
            quiet,
        )
    }
}

impl<W: WriteColor> ConsoleReporter<W> {
    pub fn with_writers(out: W, err: W, quiet: bool) -> Self {
        Self { out, err, quiet }
    }

    /// Return the (out, err) writers.
    pub fn into_writers(self) -> (W, W) {
        (self.out, self.err)
    }
}

/// Write `prefix` plainly, then `message` in `color`, then a newline.
fn write_line<W: WriteColor>(w: &mut W, prefix: &str, color: Color, message: &str) {
    let _ = write!(w, "{prefix}");
    let _ = w.set_color(ColorSpec::new().set_fg(Some(color)));
    let _ = write!(w, "{message}");
    let _ = w.reset();
    let _ = writeln!(w);
}

impl<W: WriteColor> Reporter for ConsoleReporter<W> {
    fn status(&mut self, message: &str) {
        if !self.quiet {
            let _ = writeln!(self.out, "{message}");
        }
    }

    fn success(&mut self, subject: &str, message: &str) {
        if !self.quiet {
            write_line(&mut self.out, &format!("{subject} -- "), Color::Green, message);
        }
    }

    fn skip(&mut self, subject: &str, message: &str) {
        if !self.quiet {
            write_line(&mut self.out, &format!("{subject}: "), Color::Yellow, message);
        }
    }

    fn error(&mut self, subject: &str, message: &str) {
        write_line(&mut self.out, &format!("{subject}: "), Color::Red, message);
    }

    fn fatal_error(&mut self, message: &str) {
        let _ = self.out.flush();
        let _ = self.err.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = write!(self.err, "FATAL ERROR:");
        let _ = self.err.reset();
        let _ = writeln!(self.err, " {message}");
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonReport<'a> {
    errors: usize,
    events: &'a [Event],
}

/// Serialize recorded events and the error total to a JSON string.
///
/// When `pretty` is `true` the output is indented for readability.
pub fn format_json(recorder: &Recorder, errors: usize, pretty: bool) -> String {
    let report = JsonReport {
        errors,
        events: &recorder.events,
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
