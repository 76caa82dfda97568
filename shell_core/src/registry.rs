//! Application registry

use crate::app::App;
use std::collections::HashMap;
use thiserror::Error;

/// Registry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Application already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid application id: {0:?}")]
    InvalidId(String),
}

/// Registered apps by id, in registration order
#[derive(Default)]
pub struct AppRegistry {
    apps: Vec<Box<dyn App>>,
    index: HashMap<String, usize>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an app
    ///
    /// Ids must be non-empty and free of `.`. A duplicate id is rejected and
    /// the first registration kept.
    pub fn register(&mut self, app: Box<dyn App>) -> Result<(), RegistryError> {
        let id = app.id().to_string();
        if id.is_empty() || id.contains('.') || id.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidId(id));
        }
        if self.index.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.index.insert(id, self.apps.len());
        self.apps.push(app);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&dyn App> {
        self.index.get(id).map(|&i| self.apps[i].as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn App + 'static)> {
        match self.index.get(id) {
            Some(&i) => Some(self.apps[i].as_mut()),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Title of a registered app
    pub fn title(&self, id: &str) -> Option<&str> {
        self.get(id).map(|app| app.title())
    }

    /// Ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.apps.iter().map(|app| app.id())
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRegistry")
            .field("apps", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}
