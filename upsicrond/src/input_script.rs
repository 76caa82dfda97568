//! # Input Script Parser
//!
//! Provides a simple scripted input format for deterministic runs and demos.
//!
//! ## Format
//!
//! Scripts are line-based, with each line representing one input action:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Delete`, `Tab`, `Space`
//! - Arrow keys: `Up`, `Down`, `Left`, `Right` (or `ArrowUp`, ...)
//! - Single characters: `a`, `A`, `7`, `+`
//! - Modifiers: `Ctrl+s`, `Meta+n`, `Ctrl++`
//! - Text strings: `"Hello World"` (expanded to individual key presses)
//! - Comments: `# This is a comment`
//! - Idle ticks: `wait 30`
//! - Viewport changes: `resize 600` (pixels, `px` suffix optional)
//!
//! ## Example
//!
//! ```text
//! # Open the calculator and add two numbers
//! Enter
//! "2+2"
//! Enter
//! wait 10
//! Escape
//! ```

use key_types::{Key, KeyEvent, Modifiers};
use std::collections::VecDeque;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,

    #[error("Invalid tick count: {0}")]
    InvalidWait(String),

    #[error("Invalid viewport height: {0}")]
    InvalidHeight(String),
}

/// A single scripted input action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    /// A single key press
    Key(KeyEvent),
    /// Run this many ticks without input
    Wait(u32),
    /// Change the viewport height (pixels)
    Resize(u32),
}

/// Input script
///
/// A queue of scripted actions consumed one per host step.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    inputs: VecDeque<ScriptedInput>,
}

impl InputScript {
    /// Creates a new empty input script
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut script = Self::new();

        for (line_num, line) in text.lines().enumerate() {
            script.inputs.extend(Self::parse_line(line, line_num + 1)?);
        }

        if script.inputs.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(script)
    }

    /// Parses a single line of script
    ///
    /// Blank lines and comments yield no inputs.
    pub fn parse_line(line: &str, line_num: usize) -> Result<Vec<ScriptedInput>, InputScriptError> {
        let line = line.trim();
        let at_line = |e: InputScriptError| InputScriptError::ParseError {
            line: line_num,
            message: e.to_string(),
        };

        if line.is_empty() || line.starts_with('#') {
            return Ok(Vec::new());
        }

        if let Some(count) = line.strip_prefix("wait ") {
            let ticks = Self::parse_ticks(count).map_err(at_line)?;
            return Ok(vec![ScriptedInput::Wait(ticks)]);
        }

        if let Some(height) = line.strip_prefix("resize ") {
            let height = Self::parse_height(height).map_err(at_line)?;
            return Ok(vec![ScriptedInput::Resize(height)]);
        }

        if let Some(text) = line.strip_prefix('"').and_then(|l| l.strip_suffix('"')) {
            return Ok(text
                .chars()
                .map(|c| ScriptedInput::Key(KeyEvent::plain(Key::Char(c))))
                .collect());
        }

        let (modifiers, key_name) = Self::parse_modifiers(line)?;
        let key = Self::parse_key(key_name).map_err(at_line)?;

        Ok(vec![ScriptedInput::Key(KeyEvent::new(key, modifiers))])
    }

    /// Splits leading modifiers off a chord (`Ctrl+s` → (CTRL, "s"))
    ///
    /// A lone `+`, or a `+` after the last modifier, is the key itself.
    fn parse_modifiers(input: &str) -> Result<(Modifiers, &str), InputScriptError> {
        let mut modifiers = Modifiers::none();
        let mut rest = input;

        while let Some((head, tail)) = rest.split_once('+') {
            if head.is_empty() || tail.is_empty() {
                break;
            }
            modifiers = match head.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.with(Modifiers::CTRL),
                "alt" => modifiers.with(Modifiers::ALT),
                "shift" => modifiers.with(Modifiers::SHIFT),
                "super" | "meta" | "cmd" => modifiers.with(Modifiers::META),
                other => return Err(InputScriptError::InvalidModifier(other.to_string())),
            };
            rest = tail;
        }

        Ok((modifiers, rest.trim()))
    }

    /// Parses a key name
    fn parse_key(name: &str) -> Result<Key, InputScriptError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }

        match name.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "backspace" | "back" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "tab" => Ok(Key::Tab),
            "space" => Ok(Key::Char(' ')),

            "up" | "arrowup" => Ok(Key::ArrowUp),
            "down" | "arrowdown" => Ok(Key::ArrowDown),
            "left" | "arrowleft" => Ok(Key::ArrowLeft),
            "right" | "arrowright" => Ok(Key::ArrowRight),

            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            "pageup" => Ok(Key::PageUp),
            "pagedown" => Ok(Key::PageDown),

            _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
        }
    }

    fn parse_ticks(s: &str) -> Result<u32, InputScriptError> {
        match s.trim().parse::<u32>() {
            Ok(ticks) if ticks > 0 => Ok(ticks),
            _ => Err(InputScriptError::InvalidWait(s.trim().to_string())),
        }
    }

    fn parse_height(s: &str) -> Result<u32, InputScriptError> {
        let s = s.trim().to_lowercase();
        let digits = s.strip_suffix("px").unwrap_or(&s).trim();
        digits
            .parse::<u32>()
            .map_err(|_| InputScriptError::InvalidHeight(s.to_string()))
    }

    /// Appends inputs to the end of the queue
    pub fn extend(&mut self, inputs: impl IntoIterator<Item = ScriptedInput>) {
        self.inputs.extend(inputs);
    }

    /// Returns the next input, if any
    pub fn next_input(&mut self) -> Option<ScriptedInput> {
        self.inputs.pop_front()
    }

    /// Returns true if the script has more inputs
    pub fn has_more(&self) -> bool {
        !self.inputs.is_empty()
    }

    /// Returns the number of remaining inputs
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> ScriptedInput {
        ScriptedInput::Key(KeyEvent::plain(Key::Char(c)))
    }

    #[test]
    fn test_parse_single_key() {
        let mut script = InputScript::from_text("a").unwrap();
        assert_eq!(script.remaining(), 1);
        assert_eq!(script.next_input().unwrap(), key('a'));
    }

    #[test]
    fn test_single_characters_keep_case() {
        let mut script = InputScript::from_text("A\n+\n7").unwrap();
        assert_eq!(script.next_input().unwrap(), key('A'));
        assert_eq!(script.next_input().unwrap(), key('+'));
        assert_eq!(script.next_input().unwrap(), key('7'));
    }

    #[test]
    fn test_parse_special_keys() {
        let mut script = InputScript::from_text("Enter\nesc\nBackspace\nDown\nArrowLeft").unwrap();
        let keys: Vec<Key> = std::iter::from_fn(|| script.next_input())
            .map(|input| match input {
                ScriptedInput::Key(event) => event.key,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                Key::Enter,
                Key::Escape,
                Key::Backspace,
                Key::ArrowDown,
                Key::ArrowLeft
            ]
        );
    }

    #[test]
    fn test_parse_modifiers() {
        let mut script = InputScript::from_text("Ctrl+s\nMeta+n\nCtrl++").unwrap();
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::new(Key::Char('s'), Modifiers::CTRL))
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::new(Key::Char('n'), Modifiers::META))
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::new(Key::Char('+'), Modifiers::CTRL))
        );
    }

    #[test]
    fn test_parse_quoted_string() {
        let mut script = InputScript::from_text(r#""2 + 2""#).unwrap();
        assert_eq!(script.remaining(), 5);
        assert_eq!(script.next_input().unwrap(), key('2'));
        assert_eq!(script.next_input().unwrap(), key(' '));
    }

    #[test]
    fn test_lone_quote_is_a_key() {
        let mut script = InputScript::from_text("\"").unwrap();
        assert_eq!(script.next_input().unwrap(), key('"'));
    }

    #[test]
    fn test_parse_wait_and_resize() {
        let mut script = InputScript::from_text("wait 30\nresize 600px\nresize 240").unwrap();
        assert_eq!(script.next_input().unwrap(), ScriptedInput::Wait(30));
        assert_eq!(script.next_input().unwrap(), ScriptedInput::Resize(600));
        assert_eq!(script.next_input().unwrap(), ScriptedInput::Resize(240));
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let script = InputScript::from_text("# Comment\na\n\n# Another\nb\n\n").unwrap();
        assert_eq!(script.remaining(), 2);
    }

    #[test]
    fn test_empty_script_error() {
        assert_eq!(
            InputScript::from_text("").unwrap_err(),
            InputScriptError::EmptyScript
        );
        assert_eq!(
            InputScript::from_text("# Just comments").unwrap_err(),
            InputScriptError::EmptyScript
        );
    }

    #[test]
    fn test_invalid_key_name() {
        let err = InputScript::from_text("a\nInvalidKeyName").unwrap_err();
        assert_eq!(
            err,
            InputScriptError::ParseError {
                line: 2,
                message: "Invalid key name: InvalidKeyName".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_modifier() {
        let result = InputScript::from_text("Hyper+a");
        assert!(matches!(result, Err(InputScriptError::InvalidModifier(_))));
    }

    #[test]
    fn test_invalid_wait() {
        for text in ["wait abc", "wait 0", "wait -3"] {
            let result = InputScript::from_text(text);
            assert!(matches!(result, Err(InputScriptError::ParseError { .. })), "{}", text);
        }
    }

    #[test]
    fn test_extend_appends() {
        let mut script = InputScript::new();
        assert!(!script.has_more());
        script.extend(InputScript::parse_line("\"ab\"", 1).unwrap());
        assert_eq!(script.remaining(), 2);
    }
}
