//! Files app
//!
//! Browses the shared file tree. The listing shows the entries of the
//! current directory; Enter descends into a directory or opens a file in a
//! read-only viewer that scrolls one line at a time.

use key_types::Key;
use shell_core::{header_text, App, ShellContext};
use vfs_tree::{DirectoryEntry, Navigator, Vfs};

pub const SEPARATOR: &str = "─────────────────────────────────────";

/// Lines the viewer reserves for its header, separators and footer
pub const VIEWER_CHROME: usize = 6;

/// First line of the listing and of the viewer content
const BODY_START: usize = 4;

/// An open file
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileView {
    name: String,
    lines: Vec<String>,
}

impl FileView {
    fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }
}

/// File browser and viewer
#[derive(Debug)]
pub struct Files {
    navigator: Navigator,
    selected: usize,
    viewing: Option<FileView>,
    scroll: usize,
    initialized: bool,
}

impl Files {
    pub fn new() -> Self {
        Self {
            navigator: Navigator::new("root"),
            selected: 0,
            viewing: None,
            scroll: 0,
            initialized: false,
        }
    }

    /// Current directory segments, root first
    pub fn path(&self) -> &[String] {
        self.navigator.path()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Name of the open file, if any
    pub fn viewing(&self) -> Option<&str> {
        self.viewing.as_ref().map(|v| v.name.as_str())
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn entries<'a>(&mut self, vfs: &'a Vfs) -> &'a [DirectoryEntry] {
        let entries = self.navigator.entries(vfs);
        if self.selected >= entries.len() {
            self.selected = entries.len().saturating_sub(1);
        }
        entries
    }

    fn open_selected(&mut self, ctx: &mut ShellContext) {
        let entries = self.entries(&ctx.vfs);
        let Some(entry) = entries.get(self.selected) else {
            return;
        };

        if entry.is_dir() {
            self.navigator.push(entry.name.as_str());
            self.selected = 0;
            return;
        }

        let content = ctx
            .vfs
            .node(entry.id)
            .and_then(|node| node.content())
            .unwrap_or("");
        tracing::debug!(
            target: "apps.files",
            path = %self.navigator.display(),
            file = %entry.name,
            bytes = content.len(),
            "file_opened"
        );
        self.viewing = Some(FileView::new(&entry.name, content));
        self.scroll = 0;
    }

    fn render_listing(&mut self, ctx: &mut ShellContext) {
        let entries = self.entries(&ctx.vfs);
        let display = &mut ctx.display;

        display.set_line(1, format!("Files - {}", self.navigator.display()), true);
        display.set_line(
            2,
            "Use ↑↓ to navigate, Enter to open, Backspace to go back",
            true,
        );

        let mut line = BODY_START;
        for (index, entry) in entries.iter().enumerate() {
            let prefix = if index == self.selected { "> " } else { "  " };
            display.set_line(
                line,
                format!("{}{} {}", prefix, entry.kind.tag(), entry.name),
                true,
            );
            line += 1;
        }

        display.set_line(line + 1, "", true);
        display.set_line(line + 2, "Press ESC to return to menu", true);
    }

    fn render_viewer(&self, view: &FileView, ctx: &mut ShellContext) {
        let capacity = ctx.capacity();
        let page = capacity.saturating_sub(VIEWER_CHROME);
        let display = &mut ctx.display;

        display.set_line(
            1,
            format!("File: {}/{}", self.navigator.display(), view.name),
            true,
        );
        display.set_line(2, "Use ↑↓ to scroll, ESC to go back", true);
        display.set_line(3, SEPARATOR, true);

        let mut line = BODY_START;
        for text in view.lines.iter().skip(self.scroll).take(page) {
            display.set_line(line, format!("  {}", text), true);
            line += 1;
        }
        display.set_line(line, SEPARATOR, true);

        let total = view.lines.len();
        let last = (self.scroll + page).min(total);
        if let Some(footer) = capacity.checked_sub(1) {
            display.set_line(
                footer,
                format!("Line {}-{} of {}", self.scroll + 1, last, total),
                true,
            );
        }
    }

    fn handle_viewer_key(&mut self, key: &Key) {
        match key {
            Key::Escape => {
                self.viewing = None;
                self.scroll = 0;
            }
            Key::ArrowUp => self.scroll = self.scroll.saturating_sub(1),
            // No upper bound: scrolling past the end shows an empty page
            Key::ArrowDown => self.scroll += 1,
            _ => {}
        }
    }
}

impl Default for Files {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Files {
    fn title(&self) -> &str {
        "Files"
    }

    fn id(&self) -> &str {
        "files"
    }

    fn render(&mut self, ctx: &mut ShellContext) {
        ctx.display.hard_clear();
        ctx.display.set_line(0, header_text(self.title()), false);

        if !self.initialized {
            self.selected = 0;
            self.viewing = None;
            self.scroll = 0;
            self.initialized = true;
        }

        match self.viewing.take() {
            Some(view) => {
                self.render_viewer(&view, ctx);
                self.viewing = Some(view);
            }
            None => self.render_listing(ctx),
        }
    }

    fn handle_input(&mut self, key: &Key, ctx: &mut ShellContext) {
        if self.viewing.is_some() {
            self.handle_viewer_key(key);
            return;
        }

        match key {
            Key::Escape => {
                self.initialized = false;
                ctx.return_to_idle();
            }
            Key::ArrowUp => self.selected = self.selected.saturating_sub(1),
            Key::ArrowDown => {
                let count = self.entries(&ctx.vfs).len();
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            Key::Enter => self.open_selected(ctx),
            Key::Backspace => {
                if self.navigator.pop() {
                    self.selected = 0;
                }
            }
            _ => {}
        }
    }
}
