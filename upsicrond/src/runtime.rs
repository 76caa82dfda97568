//! # Host Runtime
//!
//! The main loop: one input, one tick, one render.

use crate::input_script::{InputScript, InputScriptError, ScriptedInput};
use crate::seed::default_vfs;
use console_lines::RenderSurface;
use shell_apps::install_default_apps;
use shell_core::{ConfigError, KeyValueStore, RegistryError, Shell, ShellConfig};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use thiserror::Error;
use vfs_tree::{SeedError, Vfs};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Where input comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Scripted input; stops when the script runs out
    Scripted,
    /// Script lines arrive while running; stops when the source closes
    Interactive,
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    pub mode: HostMode,
    /// Input script text (scripted mode)
    pub script: Option<String>,
    /// Maximum steps to run (0 = unlimited)
    pub max_steps: usize,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Sleep one tick period between steps
    pub realtime: bool,
    /// Seed JSON; the bundled seed when absent
    pub seed: Option<String>,
    pub shell: ShellConfig,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            mode: HostMode::Scripted,
            script: None,
            max_steps: 0,
            viewport_height: 600,
            realtime: false,
            seed: None,
            shell: ShellConfig::default(),
        }
    }
}

/// Host runtime
pub struct HostRuntime<St, Su> {
    config: HostRuntimeConfig,
    shell: Shell<St, Su>,
    script: InputScript,
    /// Idle ticks left from a `wait`
    pending_wait: u32,
    steps: usize,
}

impl<St: KeyValueStore, Su: RenderSurface> HostRuntime<St, Su> {
    /// Creates a runtime with the stock apps installed
    pub fn new(config: HostRuntimeConfig, store: St, surface: Su) -> Result<Self, HostRuntimeError> {
        config.shell.validate()?;

        let vfs = match &config.seed {
            Some(text) => Vfs::from_seed_json(text)?,
            None => default_vfs()?,
        };

        let script = match &config.script {
            Some(text) => InputScript::from_text(text)?,
            None => InputScript::new(),
        };

        let mut shell = Shell::new(
            config.shell.clone(),
            vfs,
            store,
            surface,
            config.viewport_height,
        );
        install_default_apps(&mut shell)?;

        tracing::info!(
            target: "host.runtime",
            mode = ?config.mode,
            inputs = script.remaining(),
            height = config.viewport_height,
            "runtime_created"
        );

        Ok(Self {
            config,
            shell,
            script,
            pending_wait: 0,
            steps: 0,
        })
    }

    /// Runs until the script is exhausted or max steps are reached
    ///
    /// Without a script this only stops at max steps.
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        loop {
            if self.max_steps_reached() {
                break;
            }

            if self.config.script.is_some() && self.is_exhausted() {
                break;
            }

            self.step();
            self.pace();
        }

        tracing::info!(target: "host.runtime", steps = self.steps, "runtime_stopped");
        Ok(())
    }

    /// Runs while feeding script lines from `lines`
    ///
    /// Lines that fail to parse are skipped with a warning. Stops once the
    /// sender hangs up and every queued input has run, or at max steps.
    pub fn run_interactive(&mut self, lines: Receiver<String>) -> Result<(), HostRuntimeError> {
        let mut line_num = 0;
        let mut connected = true;

        loop {
            while connected {
                match lines.try_recv() {
                    Ok(line) => {
                        line_num += 1;
                        self.feed_line(&line, line_num);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => connected = false,
                }
            }

            if self.max_steps_reached() || (!connected && self.is_exhausted()) {
                break;
            }

            self.step();
            self.pace();
        }

        tracing::info!(target: "host.runtime", steps = self.steps, "runtime_stopped");
        Ok(())
    }

    /// Parses one script line and queues its inputs
    pub fn feed_line(&mut self, line: &str, line_num: usize) {
        match InputScript::parse_line(line, line_num) {
            Ok(inputs) => self.script.extend(inputs),
            Err(err) => {
                tracing::warn!(target: "host.runtime", error = %err, "input_line_skipped")
            }
        }
    }

    /// Executes one step: at most one input, then one tick
    ///
    /// Returns true if the tick wrote a frame.
    pub fn step(&mut self) -> bool {
        if self.pending_wait > 0 {
            self.pending_wait -= 1;
        } else if let Some(input) = self.script.next_input() {
            self.apply(input);
        }

        self.steps += 1;
        self.shell.tick()
    }

    fn apply(&mut self, input: ScriptedInput) {
        match input {
            ScriptedInput::Key(event) => {
                tracing::trace!(target: "host.runtime", key = %event.key, "key_dispatched");
                self.shell.dispatch_key(&event);
            }
            // This step is the first idle tick
            ScriptedInput::Wait(ticks) => self.pending_wait = ticks.saturating_sub(1),
            ScriptedInput::Resize(height) => self.shell.resize(height),
        }
    }

    fn pace(&self) {
        if self.config.realtime {
            thread::sleep(self.config.shell.tick_period());
        }
    }

    fn max_steps_reached(&self) -> bool {
        self.config.max_steps > 0 && self.steps >= self.config.max_steps
    }

    /// True when no input or wait remains
    pub fn is_exhausted(&self) -> bool {
        !self.script.has_more() && self.pending_wait == 0
    }

    /// Returns the step count
    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn config(&self) -> &HostRuntimeConfig {
        &self.config
    }

    /// Returns a reference to the shell (for testing)
    pub fn shell(&self) -> &Shell<St, Su> {
        &self.shell
    }

    /// Returns a mutable reference to the shell (for testing)
    pub fn shell_mut(&mut self) -> &mut Shell<St, Su> {
        &mut self.shell
    }
}
