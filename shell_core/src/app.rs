//! Application contract

use crate::context::ShellContext;
use crate::log::{LogEntry, LogLevel};
use crate::session::APP_STATE_PREFIX;
use key_types::Key;

/// A pluggable shell application
///
/// `render` runs once per tick while the app's state is active;
/// `handle_input` runs for each key routed to it. An app leaves by calling
/// `ShellContext::return_to_idle`, which the dispatcher notices and answers
/// with a hard clear.
pub trait App {
    /// Title shown in the menu and the header
    fn title(&self) -> &str;

    /// Identifier; the app's state is `app.<id>`
    fn id(&self) -> &str;

    /// Repaints the display for the app's current state
    fn render(&mut self, ctx: &mut ShellContext) {
        paint_header(ctx, self.title());
        ctx.display
            .set_line(1, "Press ESC to return to menu", false);
    }

    /// Handles one key
    fn handle_input(&mut self, key: &Key, ctx: &mut ShellContext) {
        if *key == Key::Escape {
            ctx.return_to_idle();
            return;
        }
        ctx.log.record(
            LogEntry::new(LogLevel::Debug, "Input not handled")
                .with_source(self.id())
                .with_field("key", key),
        );
    }
}

/// `=== Title ===`
pub fn header_text(title: &str) -> String {
    format!("=== {} ===", title)
}

/// Soft-clears the display and writes the header line
pub fn paint_header(ctx: &mut ShellContext, title: &str) {
    ctx.display.clear();
    ctx.display.set_line(0, header_text(title), false);
}

/// State name of an app
pub fn app_state_name(id: &str) -> String {
    format!("{}{}", APP_STATE_PREFIX, id)
}
