//! Line sinks for rendered trees. Both indent two spaces per depth level.

use std::io::Write;

use stereoscope_core::{
    application::{ApplicationError, ports::LineSink},
    error::StereoResult,
};

const INDENT: &str = "  ";

fn indented(depth: usize, text: &str) -> String {
    format!("{}{}", INDENT.repeat(depth), text)
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with newlines.
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LineSink for BufferSink {
    fn write_line(&mut self, depth: usize, text: &str) -> StereoResult<()> {
        self.lines.push(indented(depth, text));
        Ok(())
    }
}

/// Streams lines to any [`Write`] (stdout, a file).
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, depth: usize, text: &str) -> StereoResult<()> {
        writeln!(self.writer, "{}", indented(depth, text)).map_err(|e| {
            ApplicationError::Sink {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
