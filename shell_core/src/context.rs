//! The context handed to every state handler and app

use crate::config::ShellConfig;
use crate::log::OperatorLog;
use crate::session::{SessionState, IDLE_STATE};
use console_lines::DisplayBuffer;
use vfs_tree::Vfs;

/// Everything a handler may read or mutate
#[derive(Debug)]
pub struct ShellContext {
    pub display: DisplayBuffer,
    pub session: SessionState,
    pub vfs: Vfs,
    /// Remaining boot ticks
    pub countdown: u32,
    /// True only while a key with the command modifier is dispatched
    pub command_held: bool,
    pub log: OperatorLog,
}

impl ShellContext {
    pub fn new(config: &ShellConfig, vfs: Vfs) -> Self {
        Self {
            display: DisplayBuffer::new(config.line_height, config.margin_lines),
            session: SessionState::default(),
            vfs,
            countdown: config.boot_countdown,
            command_held: false,
            log: OperatorLog::new(),
        }
    }

    /// Current display capacity in lines
    pub fn capacity(&self) -> usize {
        self.display.capacity()
    }

    pub fn current_state(&self) -> &str {
        &self.session.current_state
    }

    /// Requests a transition; takes effect when the handler returns
    pub fn request_state(&mut self, name: impl Into<String>) {
        self.session.current_state = name.into();
    }

    /// Returns to the menu and drops pending input
    pub fn return_to_idle(&mut self) {
        self.request_state(IDLE_STATE);
        self.session.input_buffer.clear();
    }

    pub fn input(&self) -> &str {
        &self.session.input_buffer
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.session.input_buffer
    }
}
