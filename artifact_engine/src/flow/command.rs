/// Recorded frame commands

use crate::flow::ParameterSet;
use crate::renderer::{DrawableHandle, ShaderHandle};

/// One recorded action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Activate `target` and push every parameter to it
    BindAndParameterize {
        target: ShaderHandle,
        params: ParameterSet,
    },
    /// Draw `target` with whatever shader/state was bound last
    Submit {
        target: DrawableHandle,
    },
}

/// FIFO command queue for a single frame
///
/// Commands are executed in exactly the order they were pushed. There is no
/// sorting or batching across bind boundaries.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in recorded order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of `Submit` commands
    pub fn submit_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Submit { .. }))
            .count()
    }

    /// Move the recorded commands out, leaving the queue empty
    pub fn drain(&mut self) -> std::vec::IntoIter<Command> {
        std::mem::take(&mut self.commands).into_iter()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
