//! Rendered frames and the surfaces they are written to

use crate::flags::{parse_line, StyleDecl};
use serde::Serialize;

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    /// Line text as stored in the buffer, flags included
    pub original: String,
    /// Visible text with flags stripped
    pub text: String,
    pub styles: Vec<StyleDecl>,
    pub markers: Vec<String>,
}

impl RenderedLine {
    /// Renders a line of buffer text
    pub fn from_text(original: &str) -> Self {
        let parsed = parse_line(original);
        Self {
            original: original.to_string(),
            text: parsed.visible,
            styles: parsed.styles,
            markers: parsed.markers,
        }
    }

    /// Adds a behavior marker unless it is already present
    pub fn add_marker(&mut self, marker: &str) {
        if !self.markers.iter().any(|m| m == marker) {
            self.markers.push(marker.to_string());
        }
    }

    /// Returns true if the line carries the given marker
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    /// Joined style attribute (`color:red;font-weight:bold`)
    pub fn style_attr(&self) -> String {
        self.styles
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Markup for this line
    pub fn to_markup(&self) -> String {
        let mut attributes = format!("data-original=\"{}\"", escape(&self.original));
        if !self.styles.is_empty() {
            attributes.push_str(&format!(" style='{}'", escape(&self.style_attr())));
        }
        for marker in &self.markers {
            attributes.push(' ');
            attributes.push_str(&escape(marker));
        }
        format!("<p {}>{}</p>", attributes, escape(&self.text))
    }
}

/// A full rendering of the display buffer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Frame {
    pub lines: Vec<RenderedLine>,
}

impl Frame {
    /// Number of lines in the frame
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Visible text of each line
    pub fn plain_lines(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// Full replacement markup, one `<p>` per line
    pub fn to_markup(&self) -> String {
        self.lines
            .iter()
            .map(RenderedLine::to_markup)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Receives full frame replacements
pub trait RenderSurface {
    /// Replaces everything shown with `frame`
    fn replace(&mut self, frame: &Frame);
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn replace(&mut self, frame: &Frame) {
        (**self).replace(frame)
    }
}

/// Surface that keeps the current markup
#[derive(Debug, Default)]
pub struct MarkupSurface {
    markup: String,
    writes: usize,
}

impl MarkupSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Number of replacements received
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl RenderSurface for MarkupSurface {
    fn replace(&mut self, frame: &Frame) {
        self.markup = frame.to_markup();
        self.writes += 1;
    }
}

/// Surface that records every frame it receives
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of replacements received
    pub fn writes(&self) -> usize {
        self.frames.len()
    }

    /// Most recent frame
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl RenderSurface for FrameRecorder {
    fn replace(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}
