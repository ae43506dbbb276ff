use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default mount point of the control panel file system.
pub const DEFAULT_PANEL_DEVICE: &str = "/mnt/lcdfs";

/// Default logical name of the arm node.
pub const DEFAULT_ARM_NODE_NAME: &str = "nros.youpi2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub panel_device: PathBuf,
    pub arm_node_name: String,
    pub log_level: LogLevel,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            panel_device: PathBuf::from(DEFAULT_PANEL_DEVICE),
            arm_node_name: DEFAULT_ARM_NODE_NAME.to_string(),
            log_level: LogLevel::default(),
        }
    }
}

/// Lifecycle phase guarded by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Loop,
}

/// What the application loop wants after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

impl From<bool> for Flow {
    /// `true` means stop, mirroring a loop returning a stop indicator.
    fn from(stop: bool) -> Self {
        if stop {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }
}

/// Outcome of a run, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitStatus {
    #[default]
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Termination signals the runner listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermSignal {
    Interrupt,
    Terminate,
}

impl TermSignal {
    /// Symbolic name, as shown by `kill -l`.
    pub fn name(self) -> &'static str {
        match self {
            TermSignal::Interrupt => "SIGINT",
            TermSignal::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for TermSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
