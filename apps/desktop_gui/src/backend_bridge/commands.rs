//! Backend commands queued from UI to backend worker.

use shared::domain::ControlAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    Control { action: ControlAction },
    Refresh,
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Control { .. } => "control",
            BackendCommand::Refresh => "refresh",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
