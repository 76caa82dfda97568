//! # Shell Core
//!
//! The UpsicronOS text shell: a fixed-rate loop that owns one display
//! buffer, routes keys to pluggable apps, and keeps its session across
//! restarts.
//!
//! ## Philosophy
//!
//! - **One context, passed explicitly**: Display, session, file tree and
//!   operator log live in a `ShellContext` handed to every handler
//! - **Named states**: `boot`, `idle` and one `app.<id>` per registered app
//! - **Apps are trait objects**: Each app implements `App`; the registry is
//!   the only way an app becomes reachable
//! - **Fail soft**: Corrupt sessions, unknown states and duplicate apps are
//!   logged and absorbed, never fatal
//!
//! ## Tick order
//!
//! 1. Recompute display capacity (hard clear on change)
//! 2. Run the current state's handler
//! 3. Flush the display if dirty
//! 4. Persist the session
//!
//! Keys are dispatched between ticks and run to completion.

pub mod app;
pub mod builtin;
pub mod config;
pub mod context;
pub mod log;
pub mod registry;
pub mod session;
pub mod shell;
pub mod states;
pub mod store;

pub use app::{app_state_name, header_text, paint_header, App};
pub use builtin::{MenuEntry, BOOT_MESSAGE, WELCOME};
pub use config::{ConfigError, ShellConfig};
pub use context::ShellContext;
pub use log::{LogEntry, LogLevel, OperatorLog};
pub use registry::{AppRegistry, RegistryError};
pub use session::{
    load_session_safe, SessionError, SessionOrigin, SessionState, StateCategory,
    APP_STATE_PREFIX, BOOT_STATE, IDLE_STATE,
};
pub use shell::Shell;
pub use states::{StateHandler, StateMachine, StepFn};
pub use store::{KeyValueStore, MemoryStore, StoreError};

pub use console_lines::{DisplayBuffer, FrameRecorder, MarkupSurface, RenderSurface};
pub use key_types::{Key, KeyEvent, Modifiers};
pub use vfs_tree::Vfs;
