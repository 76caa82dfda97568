//! # Console Lines
//!
//! The fixed-length line buffer that backs the UpsicronOS text shell.
//!
//! ## Philosophy
//!
//! - **Lines, not cells**: The screen is an ordered set of text lines
//! - **Inline styling**: Lines carry `$@name$` / `$@name=value$` flags that the
//!   renderer resolves and strips
//! - **One write per change**: A render compares the whole frame against the
//!   last one and writes at most once
//!
//! ## Design
//!
//! - `flags`: flag table and the flag parser
//! - `buffer`: `DisplayBuffer` with dirty tracking and capacity management
//! - `surface`: rendered `Frame`s and the `RenderSurface` they are written to

pub mod buffer;
pub mod flags;
pub mod surface;

pub use buffer::{capacity_for_height, DisplayBuffer, Line};
pub use flags::{
    lookup_flag, parse_line, strip_flags, FlagDef, FlagKind, ParsedLine, StyleDecl, FLAG_TABLE,
};
pub use surface::{Frame, FrameRecorder, MarkupSurface, RenderSurface, RenderedLine};
