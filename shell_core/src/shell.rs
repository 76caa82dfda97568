//! Tick scheduler and input dispatcher

use crate::app::App;
use crate::builtin::{self, fallback_title, MenuEntry};
use crate::config::ShellConfig;
use crate::context::ShellContext;
use crate::log::{LogEntry, LogLevel};
use crate::registry::{AppRegistry, RegistryError};
use crate::session::{load_session_safe, SessionOrigin, SessionState, StateCategory, IDLE_STATE};
use crate::states::{StateHandler, StateMachine};
use crate::store::KeyValueStore;
use console_lines::RenderSurface;
use key_types::KeyEvent;
use vfs_tree::Vfs;

/// The shell: state table, apps, context and the external collaborators
pub struct Shell<St, Su> {
    config: ShellConfig,
    ctx: ShellContext,
    states: StateMachine,
    apps: AppRegistry,
    store: St,
    surface: Su,
    viewport_height: u32,
    origin: SessionOrigin,
    last_persisted: Option<String>,
    ticks: u64,
}

impl<St: KeyValueStore, Su: RenderSurface> Shell<St, Su> {
    /// Creates a shell and restores the stored session
    pub fn new(config: ShellConfig, vfs: Vfs, store: St, surface: Su, viewport_height: u32) -> Self {
        let mut ctx = ShellContext::new(&config, vfs);
        let (session, origin) = load_session_safe(&store, &config.storage_key, &mut ctx.log);
        ctx.session = session;
        ctx.display.update_capacity(viewport_height);

        tracing::info!(
            target: "shell.session",
            state = %ctx.session.current_state,
            ?origin,
            capacity = ctx.display.capacity(),
            "shell_started"
        );

        Self {
            config,
            ctx,
            states: StateMachine::new(),
            apps: AppRegistry::new(),
            store,
            surface,
            viewport_height,
            origin,
            last_persisted: None,
            ticks: 0,
        }
    }

    /// Registers an app and installs its `app.<id>` state
    ///
    /// A duplicate or malformed id is rejected with a warning on the
    /// operator log; the first registration stays in place.
    pub fn register_app(&mut self, app: Box<dyn App>) -> Result<(), RegistryError> {
        let id = app.id().to_string();
        match self.apps.register(app) {
            Ok(()) => {
                self.states.register_app(&id);
                tracing::debug!(target: "shell.registry", app = %id, "app_registered");
                Ok(())
            }
            Err(err) => {
                self.ctx.log.record(
                    LogEntry::new(LogLevel::Warn, "Application registration rejected")
                        .with_source("registry")
                        .with_field("app", &id)
                        .with_field("error", &err),
                );
                Err(err)
            }
        }
    }

    /// Runs one tick
    ///
    /// Returns true if the surface received a write.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;

        if self.ctx.display.update_capacity(self.viewport_height) {
            tracing::debug!(target: "shell.tick", capacity = self.ctx.display.capacity(), "capacity_recomputed");
        }

        let before = self.ctx.session.current_state.clone();
        self.run_state(&before);

        // A cleared display is left for the next state's first tick to paint
        let wrote = if self.finish_transition(&before) {
            false
        } else {
            self.ctx.display.flush(&mut self.surface)
        };
        self.persist();
        wrote
    }

    fn run_state(&mut self, name: &str) {
        match self.states.handler(name) {
            Some(StateHandler::Boot) => builtin::boot_step(&mut self.ctx),
            Some(StateHandler::Idle) => {
                let menu = menu_entries(&self.states, &self.apps);
                builtin::render_idle_menu(&mut self.ctx, &menu);
            }
            Some(StateHandler::App(id)) => match self.apps.get_mut(id) {
                Some(app) => app.render(&mut self.ctx),
                None => degrade_unknown_state(&mut self.ctx, name),
            },
            Some(StateHandler::Step(step)) => step(&mut self.ctx),
            None => degrade_unknown_state(&mut self.ctx, name),
        }
    }

    /// Hard-clears the display if the state changed since `before`
    ///
    /// Returns true on a state change.
    fn finish_transition(&mut self, before: &str) -> bool {
        let changed = self.ctx.session.current_state != before;
        if changed {
            tracing::debug!(
                target: "shell.tick",
                from = before,
                to = %self.ctx.session.current_state,
                "state_changed"
            );
            self.ctx.display.hard_clear();
        }
        changed
    }

    /// Routes one key event to the active state
    ///
    /// Reserved host shortcuts are dropped. Returns true if the event was
    /// forwarded.
    pub fn dispatch_key(&mut self, event: &KeyEvent) -> bool {
        if event.is_reserved_shortcut() {
            tracing::trace!(target: "shell.input", key = %event.key, "reserved_shortcut_ignored");
            return false;
        }

        let before = self.ctx.session.current_state.clone();
        self.ctx.command_held = event.modifiers.is_command();

        match StateCategory::of(&before) {
            StateCategory::Idle => {
                let menu = menu_entries(&self.states, &self.apps);
                builtin::handle_idle_input(&mut self.ctx, &event.key, &menu);
            }
            StateCategory::App(id) => match self.apps.get_mut(id) {
                Some(app) => app.handle_input(&event.key, &mut self.ctx),
                None => {
                    tracing::debug!(target: "shell.input", state = %before, "no_app_for_state")
                }
            },
            StateCategory::Boot | StateCategory::Other(_) => {}
        }

        self.ctx.command_held = false;
        self.finish_transition(&before);
        self.persist();
        true
    }

    /// Applies a new viewport height immediately
    pub fn resize(&mut self, height: u32) {
        self.viewport_height = height;
        if self.ctx.display.update_capacity(height) {
            tracing::debug!(target: "shell.tick", height, capacity = self.ctx.display.capacity(), "viewport_resized");
        }
    }

    fn persist(&mut self) {
        let encoded = match self.ctx.session.encode() {
            Ok(encoded) => encoded,
            Err(err) => {
                self.ctx.log.warn("session", err.to_string());
                return;
            }
        };
        if self.last_persisted.as_deref() == Some(encoded.as_str()) {
            return;
        }

        match self.store.set(&self.config.storage_key, encoded.clone()) {
            Ok(()) => self.last_persisted = Some(encoded),
            Err(err) => self.ctx.log.record(
                LogEntry::new(LogLevel::Warn, "Failed to save state")
                    .with_source("session")
                    .with_field("error", &err),
            ),
        }
    }

    /// Idle menu entries, derived from the state table
    pub fn menu(&self) -> Vec<MenuEntry> {
        menu_entries(&self.states, &self.apps)
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ShellContext {
        &mut self.ctx
    }

    pub fn session(&self) -> &SessionState {
        &self.ctx.session
    }

    pub fn current_state(&self) -> &str {
        &self.ctx.session.current_state
    }

    pub fn states(&self) -> &StateMachine {
        &self.states
    }

    /// State table, for registering or detaching custom states
    pub fn states_mut(&mut self) -> &mut StateMachine {
        &mut self.states
    }

    pub fn apps(&self) -> &AppRegistry {
        &self.apps
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn surface(&self) -> &Su {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Su {
        &mut self.surface
    }

    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

/// Projects the `app.*` state keys into menu entries
fn menu_entries(states: &StateMachine, apps: &AppRegistry) -> Vec<MenuEntry> {
    states
        .app_states()
        .map(|state| {
            let id = match StateCategory::of(state) {
                StateCategory::App(id) => id,
                _ => "",
            };
            let title = match states.handler(state) {
                Some(StateHandler::App(app_id)) => apps.title(app_id).map(String::from),
                _ => None,
            }
            .unwrap_or_else(|| fallback_title(id));
            MenuEntry {
                state: state.to_string(),
                title,
            }
        })
        .collect()
}

/// An unknown state renders nothing and falls back to `idle`
fn degrade_unknown_state(ctx: &mut ShellContext, name: &str) {
    if name == IDLE_STATE {
        return;
    }
    ctx.log.record(
        LogEntry::new(LogLevel::Warn, "Unknown state, returning to idle")
            .with_source("states")
            .with_field("state", name),
    );
    ctx.request_state(IDLE_STATE);
}
