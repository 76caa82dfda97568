#![no_std]

//! # Key Types
//!
//! Key event types delivered to the UpsicronOS shell.
//!
//! ## Philosophy
//!
//! - **Named keys, not scan codes**: Keys arrive as identifiers (`Enter`, `ArrowUp`, `a`)
//! - **One modifier question**: Apps only ask whether the command key is held
//! - **Host shortcuts stay with the host**: Reserved chords are never forwarded
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A keyboard layout or IME layer
//! - Key release / repeat tracking
//! - A complete input subsystem (just the types)

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Characters that, combined with the command modifier, belong to the host
/// (copy, paste, cut, undo, reload, inspect).
pub const RESERVED_SHORTCUTS: [char; 6] = ['c', 'v', 'x', 'z', 'r', 'i'];

/// A key identifier
///
/// Printable keys carry their character. Keys the shell does not know about
/// keep their original name so they can still be logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A single printable character
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any other named key (`Shift`, `F5`, ...)
    Other(String),
}

impl Key {
    /// Parses a key identifier as delivered by the input source
    ///
    /// A single character is always a printable key; multi-character names
    /// are matched against the known named keys.
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }

        match name {
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => Key::Other(other.to_string()),
        }
    }

    /// Returns the identifier name of this key
    pub fn name(&self) -> String {
        match self {
            Key::Char(c) => {
                let mut s = String::new();
                s.push(*c);
                s
            }
            Key::Other(name) => name.clone(),
            named => String::from(named.static_name()),
        }
    }

    fn static_name(&self) -> &'static str {
        match self {
            Key::Enter => "Enter",
            Key::Escape => "Escape",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Char(_) | Key::Other(_) => "",
        }
    }

    /// Returns the character for printable keys
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns true if this key produces a printable character
    pub fn is_printable(&self) -> bool {
        matches!(self, Key::Char(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Other(name) => f.write_str(name),
            named => f.write_str(named.static_name()),
        }
    }
}

/// Modifier key state
///
/// Bitflags for modifier keys held while a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers(u8);

impl Modifiers {
    /// Control key
    pub const CTRL: Self = Self(1 << 0);
    /// Alt/Option key
    pub const ALT: Self = Self(1 << 1);
    /// Shift key
    pub const SHIFT: Self = Self(1 << 2);
    /// Meta/Command/Windows key
    pub const META: Self = Self(1 << 3);

    /// No modifiers pressed
    pub const fn none() -> Self {
        Self(0)
    }

    /// Returns true if the given modifier is pressed
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }

    /// Adds a modifier
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if no modifiers are pressed
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the command modifier (Ctrl or Meta) is held
    pub const fn is_command(&self) -> bool {
        self.contains(Self::CTRL) || self.contains(Self::META)
    }
}

/// A single key press with the modifiers held at the time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a new key event
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Creates a key event with no modifiers
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::none())
    }

    /// Creates a key event from an identifier name
    pub fn from_name(name: &str, modifiers: Modifiers) -> Self {
        Self::new(Key::from_name(name), modifiers)
    }

    /// Returns true if this chord belongs to the host and must not reach the shell
    pub fn is_reserved_shortcut(&self) -> bool {
        if !self.modifiers.is_command() {
            return false;
        }
        match self.key {
            Key::Char(c) => RESERVED_SHORTCUTS.contains(&c.to_ascii_lowercase()),
            _ => false,
        }
    }
}
