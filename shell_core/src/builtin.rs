//! Built-in boot and idle states

use crate::context::ShellContext;
use crate::session::IDLE_STATE;
use key_types::Key;

pub const BOOT_MESSAGE: &str = "Please wait.";
pub const BOOT_DETAIL: &str = "We need a second to make sure everything works.";
pub const WELCOME: &str = "Welcome to UpsicronOS!";
pub const MENU_PROMPT: &str = "Please select from the following apps:";
pub const MENU_HINT: &str = "Use UP/DOWN arrows to select, ENTER to choose";

/// One idle-menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Target state (`app.<id>`)
    pub state: String,
    pub title: String,
}

/// Title for an id with no registered descriptor
pub fn fallback_title(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Paints the boot screen and counts down
///
/// Each tick decrements a positive countdown; the tick that finds it at
/// zero moves to `idle`.
pub fn boot_step(ctx: &mut ShellContext) {
    ctx.display.set_line(0, BOOT_MESSAGE, false);
    ctx.display
        .set_line(1, format!("({})", ctx.countdown), false);
    ctx.display.set_line(3, BOOT_DETAIL, false);

    if ctx.countdown > 0 {
        ctx.countdown -= 1;
    } else {
        tracing::info!(target: "shell.tick", "boot_complete");
        ctx.request_state(IDLE_STATE);
    }
}

/// Paints the numbered app menu
pub fn render_idle_menu(ctx: &mut ShellContext, menu: &[MenuEntry]) {
    ctx.display.set_line(0, WELCOME, false);
    ctx.display.set_line(1, MENU_PROMPT, false);

    clamp_selection(ctx, menu.len());
    let selected = ctx.session.selected_menu_index;
    for (i, entry) in menu.iter().enumerate() {
        let marker = if i == selected { "> " } else { "  " };
        ctx.display
            .set_line(2 + i, format!("{}{}. {}", marker, i + 1, entry.title), false);
    }

    ctx.display.set_line(menu.len() + 3, MENU_HINT, false);
}

/// Keeps the selection within `[0, len - 1]`, or 0 for an empty menu
fn clamp_selection(ctx: &mut ShellContext, len: usize) {
    let last = len.saturating_sub(1);
    if ctx.session.selected_menu_index > last {
        tracing::debug!(
            target: "shell.input",
            selected = ctx.session.selected_menu_index,
            last,
            "menu_selection_clamped"
        );
        ctx.session.selected_menu_index = last;
    }
}

/// Moves the menu selection or opens the selected app
pub fn handle_idle_input(ctx: &mut ShellContext, key: &Key, menu: &[MenuEntry]) {
    let last = menu.len().saturating_sub(1);
    match key {
        Key::ArrowUp => {
            ctx.session.selected_menu_index =
                ctx.session.selected_menu_index.saturating_sub(1).min(last);
        }
        Key::ArrowDown => {
            ctx.session.selected_menu_index = (ctx.session.selected_menu_index + 1).min(last);
        }
        Key::Enter => {
            ctx.session.input_buffer.clear();
            if let Some(entry) = menu.get(ctx.session.selected_menu_index) {
                tracing::info!(target: "shell.input", state = %entry.state, "app_selected");
                ctx.request_state(entry.state.clone());
            }
        }
        _ => {}
    }
}
