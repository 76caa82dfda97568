//! Named-state table
//!
//! Maps state names to handlers in insertion order. The idle menu lists
//! the `app.*` entries in this order.

use crate::app::app_state_name;
use crate::context::ShellContext;
use crate::session::{APP_STATE_PREFIX, BOOT_STATE, IDLE_STATE};

/// A custom step function run once per tick
pub type StepFn = fn(&mut ShellContext);

/// What a state does on each tick
#[derive(Debug, Clone)]
pub enum StateHandler {
    /// Boot countdown screen
    Boot,
    /// App menu
    Idle,
    /// Delegates to the registered app with this id
    App(String),
    /// Custom step function
    Step(StepFn),
}

/// The state table
#[derive(Debug, Clone)]
pub struct StateMachine {
    table: Vec<(String, StateHandler)>,
}

impl StateMachine {
    /// Creates a table holding `boot` and `idle`
    pub fn new() -> Self {
        Self {
            table: vec![
                (BOOT_STATE.to_string(), StateHandler::Boot),
                (IDLE_STATE.to_string(), StateHandler::Idle),
            ],
        }
    }

    /// Installs a handler, replacing an existing one in place
    pub fn register(&mut self, name: impl Into<String>, handler: StateHandler) {
        let name = name.into();
        match self.table.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = handler,
            None => self.table.push((name, handler)),
        }
    }

    /// Installs `app.<id>` for a registered app
    pub fn register_app(&mut self, id: &str) {
        self.register(app_state_name(id), StateHandler::App(id.to_string()));
    }

    /// Removes a state; returns true if it existed
    pub fn detach(&mut self, name: &str) -> bool {
        let before = self.table.len();
        self.table.retain(|(n, _)| n != name);
        self.table.len() != before
    }

    pub fn handler(&self, name: &str) -> Option<&StateHandler> {
        self.table.iter().find(|(n, _)| n == name).map(|(_, h)| h)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handler(name).is_some()
    }

    /// All state names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|(n, _)| n.as_str())
    }

    /// `app.*` state names in table order
    pub fn app_states(&self) -> impl Iterator<Item = &str> {
        self.names().filter(|n| n.starts_with(APP_STATE_PREFIX))
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
