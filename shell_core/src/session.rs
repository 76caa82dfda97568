//! Session state and its persistence
//!
//! The session record is stored as `{"state", "selectedApp", "userInput"}`.
//! Loading never fails: a missing record starts a fresh session at `boot`,
//! a corrupt one falls back to the idle defaults.

use crate::log::{LogEntry, LogLevel, OperatorLog};
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BOOT_STATE: &str = "boot";
pub const IDLE_STATE: &str = "idle";
pub const APP_STATE_PREFIX: &str = "app.";

/// Session persistence errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to encode session: {0}")]
    Encode(String),

    #[error("Failed to decode session: {0}")]
    Decode(String),
}

/// Top-level category of a state name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCategory<'a> {
    Boot,
    Idle,
    /// `app.<id>`
    App(&'a str),
    Other(&'a str),
}

impl<'a> StateCategory<'a> {
    /// Classifies a state name by its first `.`-separated segment
    pub fn of(name: &'a str) -> Self {
        let mut parts = name.split('.');
        match parts.next() {
            Some("boot") => StateCategory::Boot,
            Some("idle") => StateCategory::Idle,
            Some("app") => StateCategory::App(parts.next().unwrap_or("")),
            _ => StateCategory::Other(name),
        }
    }
}

/// State shared by the scheduler, the idle menu and the apps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    #[serde(rename = "state")]
    pub current_state: String,
    #[serde(rename = "selectedApp")]
    pub selected_menu_index: usize,
    #[serde(rename = "userInput")]
    pub input_buffer: String,
}

impl SessionState {
    /// Session for a first launch
    pub fn boot() -> Self {
        Self {
            current_state: BOOT_STATE.to_string(),
            ..Self::default()
        }
    }

    pub fn category(&self) -> StateCategory<'_> {
        StateCategory::of(&self.current_state)
    }

    pub fn encode(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Decodes a stored record; an empty state name means `idle`
    pub fn decode(text: &str) -> Result<Self, SessionError> {
        let mut session: Self =
            serde_json::from_str(text).map_err(|e| SessionError::Decode(e.to_string()))?;
        if session.current_state.is_empty() {
            session.current_state = IDLE_STATE.to_string();
        }
        Ok(session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_state: IDLE_STATE.to_string(),
            selected_menu_index: 0,
            input_buffer: String::new(),
        }
    }
}

/// Where a loaded session came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Nothing was stored
    Fresh,
    /// A stored record was decoded
    Restored,
    /// A stored record was unreadable and defaults were used
    Recovered,
}

/// Loads the session, falling back to defaults
pub fn load_session_safe<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    log: &mut OperatorLog,
) -> (SessionState, SessionOrigin) {
    let Some(text) = store.get(key) else {
        return (SessionState::boot(), SessionOrigin::Fresh);
    };

    match SessionState::decode(&text) {
        Ok(session) => {
            tracing::debug!(target: "shell.session", state = %session.current_state, "session_restored");
            (session, SessionOrigin::Restored)
        }
        Err(err) => {
            log.record(
                LogEntry::new(LogLevel::Warn, "Failed to load saved state, using defaults")
                    .with_source("session")
                    .with_field("error", &err),
            );
            (SessionState::default(), SessionOrigin::Recovered)
        }
    }
}
