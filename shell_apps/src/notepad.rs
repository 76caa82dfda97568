//! Notepad app
//!
//! A multi-line editor backed by `LineEditor`. The command modifier opens
//! the save dialog (`s`) or starts a new document (`n`); saving writes into
//! the shared file tree.

use crate::files::SEPARATOR;
use key_types::Key;
use line_editor::LineEditor;
use shell_core::{header_text, App, ShellContext};
use vfs_tree::{display_path, UNTITLED};

/// Lines reserved around the editing window
pub const EDITOR_CHROME: usize = 6;

const SOURCE: &str = "notepad";

/// Text editor
#[derive(Debug)]
pub struct Notepad {
    editor: LineEditor,
    initialized: bool,
    file_name: String,
    /// Directory the document was last saved to, root first
    current_path: Vec<String>,
    save_mode: bool,
    path_input: String,
    status: Option<String>,
}

impl Notepad {
    pub fn new() -> Self {
        Self {
            editor: LineEditor::new(),
            initialized: false,
            file_name: UNTITLED.to_string(),
            current_path: vec!["root".to_string(), "documents".to_string()],
            save_mode: false,
            path_input: String::new(),
            status: None,
        }
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    pub fn is_saving(&self) -> bool {
        self.save_mode
    }

    /// Path typed into the save dialog
    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Starts an empty untitled document
    pub fn new_document(&mut self) {
        self.editor.reset();
        self.file_name = UNTITLED.to_string();
        self.status = None;
    }

    /// Opens the save dialog prefilled with the current location
    pub fn open_save_dialog(&mut self) {
        let directory = self.current_path.get(1..).unwrap_or(&[]).join("/");
        self.path_input = format!("{}/{}", directory, self.file_name);
        self.save_mode = true;
        self.status = None;
    }

    /// Writes the document to the typed path
    ///
    /// On failure the dialog stays open and the error goes to the status
    /// line.
    fn save(&mut self, ctx: &mut ShellContext) {
        let content = self.editor.content();
        match ctx.vfs.write_file(&self.path_input, &content) {
            Ok(written) => {
                let message = format!("File saved: {}", written.display());
                ctx.log.info(SOURCE, message.as_str());
                self.file_name = written.file_name;
                self.current_path = written.directory;
                self.save_mode = false;
                self.path_input.clear();
                self.status = Some(message);
            }
            Err(err) => {
                ctx.log.warn(SOURCE, format!("Save failed: {}", err));
                self.status = Some(format!("Error: {}", err));
            }
        }
    }

    /// Returns true if the key was a save or new-document shortcut
    fn handle_shortcut(&mut self, key: &Key) -> bool {
        match key.as_char().map(|c| c.to_ascii_lowercase()) {
            Some('s') => self.open_save_dialog(),
            Some('n') => self.new_document(),
            _ => return false,
        }
        true
    }

    fn handle_save_key(&mut self, key: &Key, ctx: &mut ShellContext) {
        match key {
            Key::Escape => {
                self.save_mode = false;
                self.path_input.clear();
            }
            Key::Enter => self.save(ctx),
            Key::Backspace => {
                self.path_input.pop();
            }
            Key::Char(c) => self.path_input.push(*c),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: &Key, ctx: &mut ShellContext) {
        match key {
            Key::Escape => {
                self.initialized = false;
                ctx.return_to_idle();
            }
            Key::ArrowUp => self.editor.move_up(),
            Key::ArrowDown => self.editor.move_down(),
            Key::ArrowLeft => self.editor.move_left(),
            Key::ArrowRight => self.editor.move_right(),
            Key::Enter => self.editor.split_line(),
            Key::Backspace => self.editor.backspace(),
            Key::Delete => self.editor.delete(),
            Key::Char(c) => self.editor.insert_char(*c),
            _ => {}
        }
    }

    fn render_editor(&self, ctx: &mut ShellContext) {
        let capacity = ctx.capacity();
        let display = &mut ctx.display;
        let cursor = self.editor.cursor();
        let count = self.editor.line_count();

        display.set_line(
            1,
            format!(
                "File: {} | Line {}/{} | Col {}",
                self.file_name,
                cursor.line + 1,
                count,
                cursor.column + 1
            ),
            false,
        );
        display.set_line(2, SEPARATOR, false);

        let window = capacity.saturating_sub(EDITOR_CHROME);
        let start = cursor.line.saturating_sub(window / 2);
        let end = count.min(start + window);
        for (row, index) in (start..end).enumerate() {
            let prefix = if index == cursor.line { "> " } else { "  " };
            let text = self.editor.line(index).unwrap_or("");
            display.set_line(3 + row, format!("{}{}", prefix, text), false);
        }

        if capacity >= EDITOR_CHROME {
            display.set_line(capacity - 3, self.status.as_deref().unwrap_or(""), false);
            display.set_line(
                capacity - 2,
                "Ctrl+S: Save | Ctrl+N: New | ESC: Exit",
                false,
            );
            display.set_line(
                capacity - 1,
                "Arrow keys: Navigate | Type: Edit text",
                false,
            );
        }
    }

    fn render_save_dialog(&self, ctx: &mut ShellContext) {
        let capacity = ctx.capacity();
        let display = &mut ctx.display;

        display.set_line(2, "Save File", false);
        display.set_line(3, SEPARATOR, false);
        display.set_line(4, "Enter file path (e.g., documents/notes.txt):", false);
        display.set_line(5, format!("> {}_", self.path_input), false);
        display.set_line(7, "Enter: Save | Escape: Cancel", false);
        display.set_line(
            8,
            format!("Current path: {}/", display_path(&self.current_path)),
            false,
        );
        if let (Some(status), Some(line)) = (&self.status, capacity.checked_sub(3)) {
            display.set_line(line, status.as_str(), false);
        }
    }
}

impl Default for Notepad {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Notepad {
    fn title(&self) -> &str {
        "Notepad"
    }

    fn id(&self) -> &str {
        "notepad"
    }

    fn render(&mut self, ctx: &mut ShellContext) {
        ctx.display.hard_clear();
        ctx.display.set_line(0, header_text(self.title()), false);

        if !self.initialized {
            self.new_document();
            self.initialized = true;
        }

        if self.save_mode {
            self.render_save_dialog(ctx);
        } else {
            self.render_editor(ctx);
        }
    }

    fn handle_input(&mut self, key: &Key, ctx: &mut ShellContext) {
        if ctx.command_held && self.handle_shortcut(key) {
            return;
        }

        if self.save_mode {
            self.handle_save_key(key, ctx);
        } else {
            self.handle_edit_key(key, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shell_core::{LogLevel, ShellConfig, Vfs};

    fn context() -> ShellContext {
        let mut ctx = ShellContext::new(&ShellConfig::default(), Vfs::default());
        // 18 lines
        ctx.display.update_capacity(480);
        ctx
    }

    fn type_text(pad: &mut Notepad, ctx: &mut ShellContext, text: &str) {
        for c in text.chars() {
            let key = if c == '\n' { Key::Enter } else { Key::Char(c) };
            pad.handle_input(&key, ctx);
        }
    }

    fn chord(pad: &mut Notepad, ctx: &mut ShellContext, c: char) {
        ctx.command_held = true;
        pad.handle_input(&Key::Char(c), ctx);
        ctx.command_held = false;
    }

    fn opened() -> (Notepad, ShellContext) {
        let mut pad = Notepad::new();
        let mut ctx = context();
        pad.render(&mut ctx);
        (pad, ctx)
    }

    #[test]
    fn test_editor_layout() {
        let (mut pad, mut ctx) = opened();
        type_text(&mut pad, &mut ctx, "ab\ncd");
        pad.render(&mut ctx);

        assert_eq!(ctx.display.text(0), "=== Notepad ===");
        assert_eq!(ctx.display.text(1), "File: untitled.txt | Line 2/2 | Col 3");
        assert_eq!(ctx.display.text(2), SEPARATOR);
        assert_eq!(ctx.display.text(3), "  ab");
        assert_eq!(ctx.display.text(4), "> cd");
        assert_eq!(ctx.display.text(15), "");
        assert_eq!(ctx.display.text(16), "Ctrl+S: Save | Ctrl+N: New | ESC: Exit");
        assert_eq!(ctx.display.text(17), "Arrow keys: Navigate | Type: Edit text");
    }

    #[test]
    fn test_window_follows_cursor() {
        let (mut pad, mut ctx) = opened();
        let text: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        type_text(&mut pad, &mut ctx, &text.join("\n"));
        pad.render(&mut ctx);

        // window of 12 lines centred on line 29
        assert_eq!(ctx.display.text(3), "  23");
        assert_eq!(ctx.display.text(9), "> 29");
        assert_eq!(ctx.display.text(10), "");
    }

    #[test]
    fn test_save_shortcut_prefills_path() {
        let (mut pad, mut ctx) = opened();
        chord(&mut pad, &mut ctx, 's');
        assert!(pad.is_saving());
        assert_eq!(pad.path_input(), "documents/untitled.txt");

        pad.render(&mut ctx);
        assert_eq!(ctx.display.text(2), "Save File");
        assert_eq!(ctx.display.text(5), "> documents/untitled.txt_");
        assert_eq!(ctx.display.text(8), "Current path: root/documents/");
    }

    #[test]
    fn test_save_writes_file() {
        let (mut pad, mut ctx) = opened();
        type_text(&mut pad, &mut ctx, "first\nsecond");
        chord(&mut pad, &mut ctx, 's');
        for _ in 0.."untitled.txt".len() {
            pad.handle_input(&Key::Backspace, &mut ctx);
        }
        type_text(&mut pad, &mut ctx, "notes.txt");
        pad.handle_input(&Key::Enter, &mut ctx);

        assert!(!pad.is_saving());
        assert_eq!(pad.file_name(), "notes.txt");
        assert_eq!(pad.current_path(), ["root", "documents"]);
        assert_eq!(pad.status(), Some("File saved: root/documents/notes.txt"));
        assert_eq!(
            ctx.vfs.read_file(&["root", "documents", "notes.txt"]),
            Ok("first\nsecond")
        );

        pad.render(&mut ctx);
        assert_eq!(ctx.display.text(1), "File: notes.txt | Line 2/2 | Col 7");
        assert_eq!(ctx.display.text(15), "File saved: root/documents/notes.txt");
    }

    #[test]
    fn test_save_error_keeps_dialog_open() {
        let (mut pad, mut ctx) = opened();
        ctx.vfs.write_file("docs/a.txt", "x").unwrap();
        chord(&mut pad, &mut ctx, 's');
        pad.path_input = "docs/a.txt/b.txt".to_string();
        pad.handle_input(&Key::Enter, &mut ctx);

        assert!(pad.is_saving());
        assert_eq!(pad.status(), Some("Error: Not a directory: a.txt"));
        assert_eq!(ctx.log.warnings().count(), 1);

        pad.render(&mut ctx);
        assert_eq!(ctx.display.text(15), "Error: Not a directory: a.txt");

        pad.handle_input(&Key::Escape, &mut ctx);
        assert!(!pad.is_saving());
        assert_eq!(pad.path_input(), "");
    }

    #[test]
    fn test_directory_at_file_name_rejected() {
        let (mut pad, mut ctx) = opened();
        ctx.vfs.write_file("docs/a.txt", "x").unwrap();
        chord(&mut pad, &mut ctx, 's');
        pad.path_input = "root/docs".to_string();
        pad.handle_input(&Key::Enter, &mut ctx);
        assert_eq!(pad.status(), Some("Error: Is a directory: docs"));
    }

    #[test]
    fn test_new_shortcut() {
        let (mut pad, mut ctx) = opened();
        type_text(&mut pad, &mut ctx, "draft");
        chord(&mut pad, &mut ctx, 'n');
        assert_eq!(pad.editor().content(), "");
        assert_eq!(pad.file_name(), UNTITLED);
    }

    #[test]
    fn test_other_chords_reach_the_editor() {
        let (mut pad, mut ctx) = opened();
        ctx.request_state("app.notepad");
        type_text(&mut pad, &mut ctx, "ab");

        ctx.command_held = true;
        pad.handle_input(&Key::ArrowLeft, &mut ctx);
        pad.handle_input(&Key::Backspace, &mut ctx);
        ctx.command_held = false;
        assert_eq!(pad.editor().content(), "b");
        assert!(!pad.is_saving());

        pad.render(&mut ctx);
        assert_eq!(ctx.display.text(3), "> b");

        ctx.command_held = true;
        pad.handle_input(&Key::Escape, &mut ctx);
        ctx.command_held = false;
        assert_eq!(ctx.current_state(), "idle");
        assert!(ctx.log.entries().all(|e| e.level != LogLevel::Warn));
    }

    #[test]
    fn test_chords_in_save_dialog_edit_the_path() {
        let (mut pad, mut ctx) = opened();
        chord(&mut pad, &mut ctx, 's');
        ctx.command_held = true;
        pad.handle_input(&Key::Backspace, &mut ctx);
        ctx.command_held = false;
        assert!(pad.is_saving());
        assert_eq!(pad.path_input(), "documents/untitled.tx");
    }

    #[test]
    fn test_escape_resets_document_on_reentry() {
        let (mut pad, mut ctx) = opened();
        ctx.request_state("app.notepad");
        type_text(&mut pad, &mut ctx, "keep?");
        pad.handle_input(&Key::Escape, &mut ctx);
        assert_eq!(ctx.current_state(), "idle");

        pad.render(&mut ctx);
        assert_eq!(pad.editor().content(), "");
    }

    #[test]
    fn test_editing_keys() {
        let (mut pad, mut ctx) = opened();
        type_text(&mut pad, &mut ctx, "abc");
        pad.handle_input(&Key::ArrowLeft, &mut ctx);
        pad.handle_input(&Key::Backspace, &mut ctx);
        pad.handle_input(&Key::Delete, &mut ctx);
        pad.handle_input(&Key::Tab, &mut ctx);
        assert_eq!(pad.editor().content(), "a");
        assert!(pad.editor().is_valid());
    }
}
