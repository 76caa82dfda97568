#![no_std]

//! # Line Editor
//!
//! Cursor-addressed multi-line text buffer used by the Notepad app.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Always valid**: Every operation leaves the cursor on an existing line
//!   and within that line's length
//! - **Characters, not bytes**: Columns count `char`s
//!
//! ## Design
//!
//! - `Cursor`: line/column position
//! - `LineEditor`: the buffer and its editing operations

extern crate alloc;

pub mod editor;

pub use editor::{Cursor, LineEditor};
