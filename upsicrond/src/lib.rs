//! # UpsicronOS Host Runtime
//!
//! Runs the shell outside a browser: a fixed-rate loop on the host,
//! frames printed to a terminal, the session kept in a JSON file.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: Apps only write lines to the display buffer
//! - **Output is frame replacement**: Each write is a complete screen
//! - **Input is explicit events**: Scripted or read line by line
//! - **Deterministic mode is first-class**: A script plus `--max-steps`
//!   always produces the same frames
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Builds the file tree from the bundled or supplied seed
//! - Restores and persists the session through a file-backed store
//! - Runs the input → tick → render loop
//! - Installs the stock apps

pub mod input_script;
pub mod runtime;
pub mod seed;
pub mod store;
pub mod surface;

pub use input_script::{InputScript, InputScriptError, ScriptedInput};
pub use runtime::{HostMode, HostRuntime, HostRuntimeConfig, HostRuntimeError};
pub use seed::{default_vfs, DEFAULT_SEED};
pub use store::JsonFileStore;
pub use surface::{OutputFormat, TerminalSurface};
