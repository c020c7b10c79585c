//! Tap dispatch.
//!
//! Injecting a synthetic tap needs elevated privileges, so the stock
//! dispatcher shells out to a privileged helper instead of touching the
//! input stack itself.

use crate::error::{Error, Result};
use crate::frame::Coordinate;
use std::process::Command;

/// Executes the action fired when a sampled color matches a target.
///
/// The monitor loop blocks on `dispatch`, so at most one dispatch is in
/// flight at a time.
pub trait ActionDispatcher: Send {
    fn dispatch(&mut self, coordinate: Coordinate) -> Result<()>;
}

/// Dispatches taps through a privileged shell: `su -c "input tap x y"`.
pub struct ShellTapDispatcher {
    program: String,
}

impl ShellTapDispatcher {
    /// Dispatcher using the stock `su` helper.
    pub fn new() -> Self {
        Self {
            program: "su".to_string(),
        }
    }

    /// Substitute the helper program, mostly for tests.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn tap_command(coordinate: Coordinate) -> String {
        format!("input tap {} {}", coordinate.x, coordinate.y)
    }
}

impl Default for ShellTapDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionDispatcher for ShellTapDispatcher {
    fn dispatch(&mut self, coordinate: Coordinate) -> Result<()> {
        let tap = Self::tap_command(coordinate);
        let command = format!("{} -c {}", self.program, tap);
        log::debug!("running {:?}", command);

        let status = Command::new(&self.program)
            .arg("-c")
            .arg(&tap)
            .status()
            .map_err(|source| Error::DispatchSpawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::DispatchExit { command, status });
        }
        Ok(())
    }
}
