use std::path::PathBuf;
use thiserror::Error;

use crate::model::Phase;

/// Error raised by one of the two guarded lifecycle phases.
///
/// Both variants are handled the same way by the runner; the variant only
/// decides which application callback is notified.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("setup failed: {0:#}")]
    Setup(#[source] anyhow::Error),
    #[error("loop failed at iteration {iteration}: {source:#}")]
    Loop {
        iteration: u64,
        #[source]
        source: anyhow::Error,
    },
}

impl PhaseError {
    pub fn phase(&self) -> Phase {
        match self {
            PhaseError::Setup(_) => Phase::Setup,
            PhaseError::Loop { .. } => Phase::Loop,
        }
    }

    /// The error returned by the application, without the phase wrapper.
    pub fn cause(&self) -> &anyhow::Error {
        match self {
            PhaseError::Setup(source) => source,
            PhaseError::Loop { source, .. } => source,
        }
    }

    /// Text for the panel, the cause with its context chain.
    pub fn panel_message(&self) -> String {
        format!("{:#}", self.cause())
    }
}

/// Failures that abort a run instead of being turned into an exit code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot open control panel device {}", path.display())]
    PanelUnavailable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("cannot reach arm node {node}")]
    ArmUnavailable {
        node: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("cannot install termination signal handlers")]
    SignalHandlers(#[source] std::io::Error),
    #[error("control panel failure")]
    Panel(#[source] anyhow::Error),
    #[error("application teardown failed")]
    Teardown(#[source] anyhow::Error),
    #[error("cannot set arm in Hi-Z")]
    SafeState(#[source] anyhow::Error),
}

/// Error applications can return for expected failure conditions.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApplicationError {
    message: String,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
