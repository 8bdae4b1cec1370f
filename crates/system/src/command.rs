use nerdbar_core::{PanelError, Result};
use std::process::Command;

/// Runs a helper program and returns its stdout.
///
/// Sensors that shell out take a runner so tests can substitute canned output.
pub trait CommandRunner: Send + std::fmt::Debug + 'static {
    fn run(&self, program: &str, args: &[String]) -> Result<String>;
}

/// Runs real processes.  Blocks until the child exits; there is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| PanelError::Command {
                command: program.to_string(),
                reason: e.to_string(),
            })?;

        // Exit status is not checked: `pamixer --get-volume` exits 1 while muted
        // yet still prints the level.
        if output.stdout.is_empty() && !output.status.success() {
            return Err(PanelError::Command {
                command: program.to_string(),
                reason: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;

    /// Answers from a table keyed by `"program arg1 arg2"`.
    #[derive(Debug, Default)]
    pub struct FakeRunner {
        pub replies: HashMap<String, String>,
    }

    impl FakeRunner {
        pub fn with(mut self, command: &str, reply: &str) -> Self {
            self.replies.insert(command.to_string(), reply.to_string());
            self
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[String]) -> Result<String> {
            let key = std::iter::once(program.to_string())
                .chain(args.iter().cloned())
                .collect::<Vec<_>>()
                .join(" ");
            self.replies.get(&key).cloned().ok_or(PanelError::Command {
                command: key,
                reason: "not found".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_a_command_error() {
        let err = SystemRunner.run("nerdbar-definitely-not-installed", &[]).unwrap_err();
        assert!(matches!(err, PanelError::Command { ref command, .. } if command == "nerdbar-definitely-not-installed"));
    }
}
