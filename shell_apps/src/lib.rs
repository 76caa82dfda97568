//! # Shell Apps
//!
//! The applications shipped with the UpsicronOS shell.
//!
//! ## Apps
//!
//! - `Calculator`: evaluates arithmetic expressions
//! - `Notepad`: multi-line editor that saves into the file tree
//! - `ColorText`: styles typed text with display flags
//! - `Files`: browses the file tree and views files
//!
//! Every app returns to the menu on Escape.

pub mod calculator;
pub mod colortext;
pub mod expr;
pub mod files;
pub mod notepad;

pub use calculator::Calculator;
pub use colortext::ColorText;
pub use expr::{evaluate, format_number, ExprError};
pub use files::Files;
pub use notepad::Notepad;

use shell_core::{App, KeyValueStore, RegistryError, RenderSurface, Shell};

/// The stock apps in menu order
pub fn default_apps() -> Vec<Box<dyn App>> {
    vec![
        Box::new(Calculator::new()),
        Box::new(Notepad::new()),
        Box::new(ColorText::new()),
        Box::new(Files::new()),
    ]
}

/// Registers the stock apps with a shell
pub fn install_default_apps<St: KeyValueStore, Su: RenderSurface>(
    shell: &mut Shell<St, Su>,
) -> Result<(), RegistryError> {
    for app in default_apps() {
        shell.register_app(app)?;
    }
    Ok(())
}
