//! `tracing` output for the browser console.
//!
//! Each formatted event becomes one console call at the matching severity.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::error::{InteractionError, InteractionResult};

/// Filter installed by the browser entry points
pub const BROWSER_FILTER: &str = "page_interactions=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

fn console_line(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).trim_end().to_string()
}

/// Buffers one formatted event and emits it when dropped
#[derive(Debug)]
pub struct ConsoleWriter {
    severity: Severity,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = console_line(&self.buf);
        if line.is_empty() {
            return;
        }
        let line = JsValue::from_str(&line);
        match self.severity {
            Severity::Error => console::error_1(&line),
            Severity::Warn => console::warn_1(&line),
            Severity::Info => console::info_1(&line),
            Severity::Debug => console::debug_1(&line),
        }
    }
}

/// [`MakeWriter`] producing one [`ConsoleWriter`] per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            severity: Severity::Info,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            severity: Severity::from(*meta.level()),
            buf: Vec::new(),
        }
    }
}

/// Route `tracing` events to the browser console
///
/// Fails if a global subscriber is already installed or the filter does not
/// parse.
pub fn init_console_logging(filter: &str) -> InteractionResult<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| InteractionError::config(format!("invalid log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_ansi(false)
        .with_level(false)
        .try_init()
        .map_err(|e| InteractionError::config(format!("logging already initialized: {e}")))
}
