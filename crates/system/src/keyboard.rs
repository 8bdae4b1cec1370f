use crate::command::CommandRunner;
use nerdbar_core::{PanelError, Result, Sensor};

/// Asks an external helper for the active keyboard layout.
#[derive(Debug)]
pub struct KeyboardLayoutSensor<R> {
    runner: R,
    command: Vec<String>,
}

impl<R: CommandRunner> KeyboardLayoutSensor<R> {
    /// `command` is the program followed by its arguments,
    /// e.g. `["xkblayout-state", "print", "%s"]`.
    pub fn new(runner: R, command: Vec<String>) -> Self {
        Self { runner, command }
    }
}

impl<R: CommandRunner> Sensor for KeyboardLayoutSensor<R> {
    /// Layout code as printed by the helper, trimmed.
    type Reading = String;

    fn sense(&mut self) -> Result<String> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| PanelError::Config("keyboard.command is empty".into()))?;
        Ok(self.runner.run(program, args)?.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::fake::FakeRunner;

    fn default_command() -> Vec<String> {
        ["xkblayout-state", "print", "%s"].map(String::from).to_vec()
    }

    #[test]
    fn trims_helper_output() {
        let runner = FakeRunner::default().with("xkblayout-state print %s", "us\n");
        let mut sensor = KeyboardLayoutSensor::new(runner, default_command());
        assert_eq!(sensor.sense().unwrap(), "us");
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut sensor = KeyboardLayoutSensor::new(FakeRunner::default(), Vec::new());
        assert!(matches!(sensor.sense(), Err(PanelError::Config(_))));
    }
}
