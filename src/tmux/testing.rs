//! Recording tmux runner for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::TmuxRunner;
use crate::error::TmuxError;

/// Records every command and answers from canned outputs
#[derive(Default)]
pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    attached: Mutex<Vec<Vec<String>>>,
    outputs: HashMap<String, String>,
    failing: Vec<String>,
    server_down: bool,
}

impl RecordingRunner {
    /// Answer `command` (first tmux argument) with `output`
    pub fn with_output(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), output.to_string());
        self
    }

    /// Make `command` fail with a command error
    pub fn failing_on(mut self, command: &str) -> Self {
        self.failing.push(command.to_string());
        self
    }

    /// Behave as if no tmux server is running for `list-sessions`
    pub fn server_down(mut self) -> Self {
        self.server_down = true;
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn attached_calls(&self) -> Vec<Vec<String>> {
        self.attached.lock().unwrap().clone()
    }

    /// Just the subcommand names, in call order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c[0].clone()).collect()
    }

    fn answer(&self, args: &[&str]) -> Result<String, TmuxError> {
        let command = args[0];
        if self.server_down && command == "list-sessions" {
            return Err(TmuxError::ServerNotRunning);
        }
        if self.failing.iter().any(|f| f == command) {
            return Err(TmuxError::CommandFailed {
                command: format!("tmux {}", args.join(" ")),
                stderr: "scripted failure".to_string(),
            });
        }
        Ok(self.outputs.get(command).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl TmuxRunner for RecordingRunner {
    async fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_string()).collect());
        self.answer(args)
    }

    async fn run_attached(&self, args: &[&str]) -> Result<(), TmuxError> {
        self.attached
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_string()).collect());
        self.answer(args).map(|_| ())
    }
}
