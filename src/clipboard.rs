// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Clipboard sink for copying the tempo or marking out of the UI.
//!
//! The production implementation emits an OSC 52 escape sequence, which
//! terminals that support it translate into a system clipboard write. That
//! keeps the copy path inside the terminal the UI already owns; no display
//! server connection is needed.

use std::io::{self, Write};

use data_encoding::BASE64;

/// Accepts strings for copying. Failures are the caller's to report (a
/// status-bar message), never to propagate.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// OSC 52 clipboard: writes `ESC ] 52 ; c ; <base64> BEL` to the terminal
pub struct Osc52Clipboard<W: Write> {
    writer: W,
}

impl Osc52Clipboard<io::Stdout> {
    /// Clipboard writing to stdout (the terminal the UI runs in)
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for Osc52Clipboard<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// Clipboard writing to an arbitrary writer
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the clipboard, returning the writer
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        let encoded = BASE64.encode(text.as_bytes());
        write!(self.writer, "\x1b]52;c;{}\x07", encoded)?;
        self.writer.flush()
    }
}

/// Clipboard that discards everything (for terminals without OSC 52)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClipboard;

impl ClipboardSink for NullClipboard {
    fn copy(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}
