//! Flag table and parser
//!
//! A flag is an inline directive delimited by `$@` and the next `$`:
//!
//! ```text
//! Result: 4 $@color=green$ $@bold$
//! ```
//!
//! Style flags resolve to a presentation property; behavior flags pass
//! through as markers. Unknown flags are stripped and otherwise ignored.

use serde::Serialize;
use std::fmt;

/// Opening delimiter of a flag
pub const FLAG_OPEN: &str = "$@";
/// Closing delimiter of a flag
pub const FLAG_CLOSE: char = '$';
/// Placeholder substituted by the flag's `=value` suffix
pub const VALUE_PLACEHOLDER: &str = "#value";

/// Kind of a flag table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Maps to a presentation property
    Style {
        property: &'static str,
        /// Value template; `#value` is replaced when `parameterized`
        template: &'static str,
        parameterized: bool,
    },
    /// Passed through to the rendered line as a marker
    Behavior,
}

/// A flag table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDef {
    pub name: &'static str,
    pub kind: FlagKind,
}

const fn style(
    name: &'static str,
    property: &'static str,
    template: &'static str,
    parameterized: bool,
) -> FlagDef {
    FlagDef {
        name,
        kind: FlagKind::Style {
            property,
            template,
            parameterized,
        },
    }
}

const fn behavior(name: &'static str) -> FlagDef {
    FlagDef {
        name,
        kind: FlagKind::Behavior,
    }
}

/// The static flag table
pub const FLAG_TABLE: &[FlagDef] = &[
    style("color", "color", "#value", true),
    style("background", "background-color", "#value", true),
    style("size", "font-size", "#valuepx", true),
    style("bold", "font-weight", "bold", false),
    style("italic", "font-style", "italic", false),
    style("underline", "text-decoration", "underline", false),
    style("strike", "text-decoration", "line-through", false),
    behavior("noclear"),
    behavior("blink"),
];

/// Looks up a flag by name
pub fn lookup_flag(name: &str) -> Option<&'static FlagDef> {
    FLAG_TABLE.iter().find(|def| def.name == name)
}

/// A resolved presentation property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDecl {
    pub property: String,
    pub value: String,
}

impl StyleDecl {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for StyleDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.property, self.value)
    }
}

/// Result of parsing one line of text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    /// Text with every flag removed
    pub visible: String,
    /// Resolved style flags in order of appearance
    pub styles: Vec<StyleDecl>,
    /// Behavior flag bodies in order of appearance
    pub markers: Vec<String>,
}

/// Parses the flags in `text`
///
/// A flag runs from `$@` to the next `$`. An opening `$@` with no closing
/// `$` is ordinary text. Flags never nest.
pub fn parse_line(text: &str) -> ParsedLine {
    let mut parsed = ParsedLine::default();
    let mut rest = text;

    while let Some(start) = rest.find(FLAG_OPEN) {
        let body_start = start + FLAG_OPEN.len();
        let Some(body_len) = rest[body_start..].find(FLAG_CLOSE) else {
            break;
        };

        parsed.visible.push_str(&rest[..start]);
        apply_flag(&rest[body_start..body_start + body_len], &mut parsed);
        rest = &rest[body_start + body_len + FLAG_CLOSE.len_utf8()..];
    }

    parsed.visible.push_str(rest);
    parsed
}

fn apply_flag(body: &str, parsed: &mut ParsedLine) {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let Some(def) = lookup_flag(name) else {
        tracing::trace!(target: "console.flags", flag = body, "unknown_flag_dropped");
        return;
    };

    match def.kind {
        FlagKind::Style {
            property,
            template,
            parameterized,
        } => {
            let value = if parameterized {
                template.replace(VALUE_PLACEHOLDER, value.unwrap_or(""))
            } else {
                template.to_string()
            };
            parsed.styles.push(StyleDecl::new(property, value));
        }
        FlagKind::Behavior => parsed.markers.push(body.to_string()),
    }
}

/// Returns `text` with every flag removed
pub fn strip_flags(text: &str) -> String {
    parse_line(text).visible
}
