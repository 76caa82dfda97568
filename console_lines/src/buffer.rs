//! Display buffer
//!
//! A fixed-length set of lines sized from the viewport height. Writes mark
//! the buffer dirty; `flush` renders dirty content and hands the frame to a
//! surface only when it differs from the last frame written.

use crate::surface::{Frame, RenderSurface, RenderedLine};

/// Behavior marker for lines that survive `clear`
pub const NOCLEAR: &str = "noclear";

/// Inline form of the `noclear` marker
const NOCLEAR_FLAG: &str = "$@noclear$";

/// One slot in the display buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub preserve_on_clear: bool,
}

impl Line {
    /// Returns true if `clear` must leave this line alone
    pub fn survives_clear(&self) -> bool {
        self.preserve_on_clear || self.text.contains(NOCLEAR_FLAG)
    }
}

/// Number of lines that fit in `height`
pub fn capacity_for_height(height: u32, line_height: u32, margin: usize) -> usize {
    if line_height == 0 {
        return 0;
    }
    ((height / line_height) as usize).saturating_sub(margin)
}

/// The shell's line buffer
#[derive(Debug)]
pub struct DisplayBuffer {
    lines: Vec<Line>,
    line_height: u32,
    margin: usize,
    sized: bool,
    dirty: bool,
    last_frame: Option<Frame>,
}

impl DisplayBuffer {
    /// Creates an empty buffer; call `update_capacity` to size it
    pub fn new(line_height: u32, margin: usize) -> Self {
        Self {
            lines: Vec::new(),
            line_height,
            margin,
            sized: false,
            dirty: true,
            last_frame: None,
        }
    }

    /// Creates a buffer with a fixed number of lines
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: vec![Line::default(); capacity],
            line_height: 1,
            margin: 0,
            sized: true,
            dirty: true,
            last_frame: None,
        }
    }

    /// Recomputes capacity from the viewport height
    ///
    /// Returns true if the capacity changed. A change reallocates every line.
    pub fn update_capacity(&mut self, height: u32) -> bool {
        let capacity = capacity_for_height(height, self.line_height, self.margin);
        if self.sized && capacity == self.lines.len() {
            return false;
        }

        tracing::debug!(
            target: "console.buffer",
            old = self.lines.len(),
            new = capacity,
            height,
            "capacity_changed"
        );
        self.sized = true;
        self.lines = vec![Line::default(); capacity];
        self.dirty = true;
        true
    }

    /// Number of lines
    pub fn capacity(&self) -> usize {
        self.lines.len()
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Text of a line, empty when out of range
    pub fn text(&self, index: usize) -> &str {
        self.lines.get(index).map(|l| l.text.as_str()).unwrap_or("")
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes a line; out-of-range indices are ignored
    pub fn set_line(&mut self, index: usize, text: impl Into<String>, preserve: bool) {
        if let Some(line) = self.lines.get_mut(index) {
            line.text = text.into();
            line.preserve_on_clear = preserve;
            self.dirty = true;
        }
    }

    /// Empties every line not marked to survive a clear
    pub fn clear(&mut self) {
        for line in self.lines.iter_mut().filter(|l| !l.survives_clear()) {
            line.text.clear();
        }
        self.dirty = true;
    }

    /// Empties every line
    pub fn hard_clear(&mut self) {
        for line in &mut self.lines {
            *line = Line::default();
        }
        self.dirty = true;
    }

    /// Renders the current content
    pub fn render_frame(&self) -> Frame {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let mut rendered = RenderedLine::from_text(&line.text);
                if line.preserve_on_clear {
                    rendered.add_marker(NOCLEAR);
                }
                rendered
            })
            .collect();
        Frame { lines }
    }

    /// Writes to `surface` if the buffer is dirty and the frame changed
    ///
    /// Returns true if the surface received a write.
    pub fn flush<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        let frame = self.render_frame();
        if self.last_frame.as_ref() == Some(&frame) {
            return false;
        }

        surface.replace(&frame);
        self.last_frame = Some(frame);
        true
    }

    /// Last frame written to a surface
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new(24, 2)
    }
}
