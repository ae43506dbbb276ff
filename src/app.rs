//! The application contract.
//!
//! A concrete application implements [`Application`], overriding only the
//! extension points it needs; every default is a no-op. Options of its own
//! are declared through the `Args` associated type and are parsed next to the
//! common ones (see [`crate::cli::BaseArgs`]).
//!
//! `loop_once` is called repeatedly and must return between iterations: a
//! termination signal is only observed between two calls, so a loop that never
//! returns cannot be stopped gracefully.

use anyhow::Result;
use async_trait::async_trait;

use crate::devices::{self, Arm, Panel};
use crate::error::PhaseError;
use crate::model::{ExitStatus, Flow, RunConfig, TermSignal};
use crate::orchestrator::Termination;

/// Application options for applications without any.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NoArgs {}

#[async_trait]
pub trait Application: Send {
    /// Application options, flattened with the common ones.
    type Args: clap::Args + Clone + std::fmt::Debug + Send + Sync;

    /// Short identifier, used for the log name and the command name.
    const NAME: &'static str = "app";
    /// Displayed on the first panel line.
    const TITLE: &'static str = "Youpi application";
    const VERSION: Option<&'static str> = None;

    /// Called once, before the loop.
    async fn setup(&mut self, _ctx: &mut Context<'_>, _args: &Self::Args) -> Result<()> {
        Ok(())
    }

    /// One iteration of the application loop.
    async fn loop_once(&mut self, _ctx: &mut Context<'_>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// Called once the loop is over, whatever the reason.
    async fn teardown(&mut self, _ctx: &mut Context<'_>, _exit: ExitStatus) -> Result<()> {
        Ok(())
    }

    /// `setup` failed.
    fn on_run_error(&mut self, _error: &PhaseError) {}

    /// `loop_once` failed.
    fn on_unexpected_error(&mut self, _error: &PhaseError) {}

    /// A termination signal was received; the termination flag is already set.
    fn on_terminate(&mut self, _signal: TermSignal) {}
}

/// What the extension points get to work with.
pub struct Context<'a> {
    panel: &'a mut dyn Panel,
    arm: &'a mut dyn Arm,
    config: &'a RunConfig,
    termination: Termination,
    title: &'static str,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        panel: &'a mut dyn Panel,
        arm: &'a mut dyn Arm,
        config: &'a RunConfig,
        termination: Termination,
        title: &'static str,
    ) -> Self {
        Self {
            panel,
            arm,
            config,
            termination,
            title,
        }
    }

    pub fn panel(&mut self) -> &mut dyn Panel {
        &mut *self.panel
    }

    pub fn arm(&mut self) -> &mut dyn Arm {
        &mut *self.arm
    }

    pub fn config(&self) -> &RunConfig {
        self.config
    }

    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_terminated()
    }

    /// Clear the panel and show the application title.
    pub fn clear_screen(&mut self) -> Result<()> {
        devices::clear_screen(&mut *self.panel, self.title)
    }
}
