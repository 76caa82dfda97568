//! ColorText app
//!
//! Number and letter keys toggle styles; Enter writes the typed text
//! followed by the matching flags, so the display renders it styled.

use key_types::Key;
use shell_core::{paint_header, App, ShellContext};

/// Line receiving the styled output
pub const OUTPUT_LINE: usize = 6;
/// Line receiving style-change notifications
pub const NOTICE_LINE: usize = 7;

/// Styles typed text with display flags
#[derive(Debug, Default)]
pub struct ColorText {
    color: Option<&'static str>,
    background: Option<&'static str>,
    bold: bool,
    italic: bool,
    underline: bool,
}

fn on_off(enabled: bool, flag: &str) -> String {
    if enabled {
        format!("ON {}", flag)
    } else {
        "OFF".to_string()
    }
}

impl ColorText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for the current style, in a fixed order
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(color) = self.color {
            flags.push(format!("$@color={}$", color));
        }
        if let Some(background) = self.background {
            flags.push(format!("$@background={}$", background));
        }
        if self.bold {
            flags.push("$@bold$".to_string());
        }
        if self.italic {
            flags.push("$@italic$".to_string());
        }
        if self.underline {
            flags.push("$@underline$".to_string());
        }
        flags
    }

    fn set_color(&mut self, ctx: &mut ShellContext, name: &'static str, label: &str) {
        self.color = Some(name);
        notify(ctx, format!("Color: {} $@color={}$", label, name));
    }

    fn emit(&mut self, ctx: &mut ShellContext) {
        let text = format!("{} {}", ctx.input(), self.flags().join(" "));
        ctx.display.set_line(OUTPUT_LINE, text, true);
        ctx.input_mut().clear();
    }
}

fn notify(ctx: &mut ShellContext, message: String) {
    ctx.display.set_line(NOTICE_LINE, message, true);
}

impl App for ColorText {
    fn title(&self) -> &str {
        "Color Text"
    }

    fn id(&self) -> &str {
        "colortext"
    }

    fn render(&mut self, ctx: &mut ShellContext) {
        paint_header(ctx, self.title());
        ctx.display
            .set_line(1, "Type text and press ENTER to style it:", false);
        let input = format!("Input: {}", ctx.input());
        ctx.display.set_line(2, input, false);
        ctx.display.set_line(3, "", false);
        ctx.display.set_line(4, "Style Options:", false);
        ctx.display.set_line(
            5,
            "1-4: Colors | 5-6: Background | B: Bold | I: Italic | U: Underline",
            false,
        );
        ctx.display.set_line(8, "", false);
        ctx.display.set_line(9, "Press ESC to return to menu", false);
    }

    fn handle_input(&mut self, key: &Key, ctx: &mut ShellContext) {
        let c = match key {
            Key::Escape => return ctx.return_to_idle(),
            Key::Enter => return self.emit(ctx),
            Key::Backspace => {
                ctx.input_mut().pop();
                return;
            }
            Key::Char(c) => *c,
            _ => return,
        };

        match c {
            '1' => self.set_color(ctx, "red", "Red"),
            '2' => self.set_color(ctx, "green", "Green"),
            '3' => self.set_color(ctx, "blue", "Blue"),
            '4' => self.set_color(ctx, "yellow", "Yellow"),
            '5' => {
                self.background = Some("black");
                notify(ctx, "Background: Black $@background=black$".to_string());
            }
            '6' => {
                self.background = None;
                notify(ctx, "Background: Transparent".to_string());
            }
            'b' | 'B' => {
                self.bold = !self.bold;
                notify(ctx, format!("Bold: {}", on_off(self.bold, "$@bold$")));
            }
            'i' | 'I' => {
                self.italic = !self.italic;
                notify(ctx, format!("Italic: {}", on_off(self.italic, "$@italic$")));
            }
            'u' | 'U' => {
                self.underline = !self.underline;
                notify(
                    ctx,
                    format!("Underline: {}", on_off(self.underline, "$@underline$")),
                );
            }
            other => ctx.input_mut().push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_lines::StyleDecl;
    use shell_core::{ShellConfig, Vfs};

    fn context() -> ShellContext {
        let mut ctx = ShellContext::new(&ShellConfig::default(), Vfs::default());
        ctx.display.update_capacity(480);
        ctx
    }

    fn press_all(app: &mut ColorText, ctx: &mut ShellContext, text: &str) {
        for c in text.chars() {
            app.handle_input(&Key::Char(c), ctx);
        }
    }

    #[test]
    fn test_styled_output_renders_styles() {
        let mut app = ColorText::new();
        let mut ctx = context();
        press_all(&mut app, &mut ctx, "15");
        app.handle_input(&Key::Char('B'), &mut ctx);
        press_all(&mut app, &mut ctx, "hey");
        app.handle_input(&Key::Enter, &mut ctx);

        assert_eq!(
            ctx.display.text(OUTPUT_LINE),
            "hey $@color=red$ $@background=black$ $@bold$"
        );
        assert_eq!(ctx.input(), "");

        let frame = ctx.display.render_frame();
        let line = &frame.lines[OUTPUT_LINE];
        assert_eq!(line.text, "hey   ");
        assert_eq!(
            line.styles,
            vec![
                StyleDecl::new("color", "red"),
                StyleDecl::new("background-color", "black"),
                StyleDecl::new("font-weight", "bold"),
            ]
        );
    }

    #[test]
    fn test_toggle_notifications() {
        let mut app = ColorText::new();
        let mut ctx = context();
        app.handle_input(&Key::Char('u'), &mut ctx);
        assert_eq!(ctx.display.text(NOTICE_LINE), "Underline: ON $@underline$");
        app.handle_input(&Key::Char('U'), &mut ctx);
        assert_eq!(ctx.display.text(NOTICE_LINE), "Underline: OFF");
        app.handle_input(&Key::Char('6'), &mut ctx);
        assert_eq!(ctx.display.text(NOTICE_LINE), "Background: Transparent");
    }

    #[test]
    fn test_output_survives_render() {
        let mut app = ColorText::new();
        let mut ctx = context();
        press_all(&mut app, &mut ctx, "ok");
        app.handle_input(&Key::Enter, &mut ctx);
        app.render(&mut ctx);
        assert_eq!(ctx.display.text(OUTPUT_LINE), "ok ");
        assert_eq!(ctx.display.text(0), "=== Color Text ===");
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut app = ColorText::new();
        let mut ctx = context();
        press_all(&mut app, &mut ctx, "xyz");
        app.handle_input(&Key::Backspace, &mut ctx);
        assert_eq!(ctx.input(), "xy");
    }
}
