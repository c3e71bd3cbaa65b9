//! Where diagnostic text (suggestions, help) is written.

use std::io::{self, Write};

/// Receives diagnostic text produced while parsing.
///
/// Text is passed through verbatim; line breaks are part of `text`.
pub trait DiagnosticSink {
    fn write(&mut self, text: &str);
}

/// Writes diagnostics to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn write(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::debug!(%err, "failed to write diagnostics to stdout");
        }
    }
}

/// Collects diagnostics in memory.
impl DiagnosticSink for String {
    fn write(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn write(&mut self, text: &str) {
        (**self).write(text);
    }
}
