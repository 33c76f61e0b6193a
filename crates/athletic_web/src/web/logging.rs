//! `tracing` output for the browser console.
//!
//! The fmt layer formats each event into a buffer; dropping the writer hands
//! the finished line to the console method matching the event level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

pub(super) struct ConsoleWriter {
    level: Level,
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
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        let msg = wasm_bindgen::JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&msg),
            Level::WARN => web_sys::console::warn_1(&msg),
            Level::INFO => web_sys::console::info_1(&msg),
            _ => web_sys::console::debug_1(&msg),
        }
    }
}

pub(super) struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

pub(super) fn init() {
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // A second start() (hot reload) finds the subscriber already set.
    let _ = tracing_subscriber::fmt()
        .with_writer(Console)
        .with_max_level(max_level)
        .with_ansi(false)
        .without_time()
        .try_init();
}

pub(super) fn banner() {
    web_sys::console::log_2(
        &"%c🏋️ Athletic Gym Website".into(),
        &"font-size: 20px; font-weight: bold; color: #667eea;".into(),
    );
    web_sys::console::log_2(
        &"%cTransformando vidas desde 2014".into(),
        &"font-size: 14px; color: #764ba2;".into(),
    );
}
