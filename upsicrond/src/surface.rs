//! Terminal rendering surface

use console_lines::{Frame, RenderSurface};
use std::io::Write;

/// How frames are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Visible text, one frame per block
    #[default]
    Text,
    /// One JSON object per frame, one per line
    Json,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Writes every replacement frame to a writer
///
/// Styles are not turned into escape codes; the JSON format carries them.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    writer: W,
    format: OutputFormat,
    frames: usize,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            frames: 0,
        }
    }

    /// Number of frames written
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.writer, "----- frame {} -----", self.frames)?;
                for line in frame.plain_lines() {
                    writeln!(self.writer, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, frame)?;
                writeln!(self.writer)?;
            }
        }
        self.writer.flush()
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn replace(&mut self, frame: &Frame) {
        self.frames += 1;
        if let Err(err) = self.write_frame(frame) {
            tracing::warn!(target: "host.surface", error = %err, "frame_write_failed");
        }
    }
}
