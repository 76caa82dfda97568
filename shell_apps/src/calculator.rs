//! Calculator app

use crate::expr::{evaluate, format_number};
use key_types::Key;
use shell_core::{paint_header, App, ShellContext};

/// Characters the calculator accepts into its input
pub const ACCEPTED_CHARS: &str = "0123456789+-*/().";

/// Line holding the last result or error
pub const RESULT_LINE: usize = 2;

pub const ERROR_TEXT: &str = "Error: Invalid expression $@color=red$ $@bold$";

/// Evaluates typed expressions
///
/// The expression lives in the shared input buffer, so it survives a
/// restart along with the rest of the session.
#[derive(Debug, Default)]
pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    fn evaluate_input(&self, ctx: &mut ShellContext) {
        match evaluate(ctx.input()) {
            Ok(value) => {
                let text = format!("Result: {} $@color=green$", format_number(value));
                ctx.display.set_line(RESULT_LINE, text, true);
                ctx.input_mut().clear();
            }
            Err(err) => {
                tracing::debug!(target: "apps.calc", input = ctx.input(), error = %err, "evaluation_failed");
                ctx.display.set_line(RESULT_LINE, ERROR_TEXT, true);
            }
        }
    }
}

impl App for Calculator {
    fn title(&self) -> &str {
        "Calculator"
    }

    fn id(&self) -> &str {
        "calc"
    }

    fn render(&mut self, ctx: &mut ShellContext) {
        paint_header(ctx, self.title());
        let input = format!("Input: {}", ctx.input());
        ctx.display.set_line(1, input, false);
        ctx.display
            .set_line(3, "Type an expression (e.g., 2+2) and press ENTER", false);
        ctx.display
            .set_line(4, "Press ESC to return to main menu", false);
    }

    fn handle_input(&mut self, key: &Key, ctx: &mut ShellContext) {
        match key {
            Key::Escape => ctx.return_to_idle(),
            Key::Enter => self.evaluate_input(ctx),
            Key::Backspace => {
                ctx.input_mut().pop();
            }
            Key::Char(c) if ACCEPTED_CHARS.contains(*c) => ctx.input_mut().push(*c),
            _ => {}
        }
    }
}
