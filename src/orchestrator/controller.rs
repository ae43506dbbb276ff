//! Run lifecycle controller.
//!
//! Acquires the devices, installs the signal listener and sequences
//! setup, loop and teardown for an [`Application`].

use tracing::{debug, error, info, Instrument};

use crate::app::{Application, Context};
use crate::devices::{clear_screen, Arm, DeviceProvider, Panel};
use crate::error::{PhaseError, RunError};
use crate::logging::LogContext;
use crate::model::{ExitStatus, Flow, RunConfig};
use crate::orchestrator::signals::{self, Termination};

pub struct Runner<A: Application> {
    app: A,
    log: LogContext,
    termination: Termination,
    terminate_notified: bool,
}

impl<A: Application> Runner<A> {
    pub fn new(app: A, log: LogContext) -> Self {
        Self {
            app,
            log,
            termination: Termination::new(),
            terminate_notified: false,
        }
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn into_app(self) -> A {
        self.app
    }

    pub fn log(&self) -> &LogContext {
        &self.log
    }

    /// Handle on the termination flag, shared with the signal listener.
    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_terminated()
    }

    /// Run the application lifecycle with the devices built by `provider`.
    ///
    /// Errors of `setup` and `loop_once` are reported and turned into
    /// [`ExitStatus::Failure`]. Device acquisition, panel, teardown and Hi-Z
    /// failures are returned as [`RunError`].
    ///
    /// The SIGINT / SIGTERM handlers stay registered with tokio for the rest
    /// of the process once the run is over: the listener is stopped, so later
    /// signals are swallowed instead of killing the process. Callers that keep
    /// running afterwards must install their own handling.
    pub async fn run<P>(
        &mut self,
        provider: &P,
        config: &RunConfig,
        args: &A::Args,
    ) -> Result<ExitStatus, RunError>
    where
        P: DeviceProvider + ?Sized,
    {
        let span = self.log.span();
        async move {
            self.log.starting_banner(A::VERSION);
            if let Ok(json) = serde_json::to_string(config) {
                debug!(config = %json, "run configuration");
            }

            info!(path = %config.panel_device.display(), "creating control panel device");
            let mut panel =
                provider
                    .open_panel(&config.panel_device)
                    .map_err(|source| RunError::PanelUnavailable {
                        path: config.panel_device.clone(),
                        source,
                    })?;

            info!(name = %config.arm_node_name, "getting access to the arm node");
            let mut arm =
                provider
                    .connect_arm(&config.arm_node_name)
                    .map_err(|source| RunError::ArmUnavailable {
                        node: config.arm_node_name.clone(),
                        source,
                    })?;

            let listener =
                signals::install(self.termination.clone()).map_err(RunError::SignalHandlers)?;
            let result = self
                .drive(panel.as_mut(), arm.as_mut(), config, args)
                .await;
            listener.abort();
            // Termination requested during teardown.
            self.observe_termination();

            if let Ok(status) = &result {
                info!(exit_code = status.code(), "returning");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &mut self,
        panel: &mut dyn Panel,
        arm: &mut dyn Arm,
        config: &RunConfig,
        args: &A::Args,
    ) -> Result<ExitStatus, RunError> {
        clear_screen(panel, A::TITLE).map_err(RunError::Panel)?;

        let mut ctx = Context::new(panel, arm, config, self.termination.clone(), A::TITLE);
        let mut status = ExitStatus::Success;
        // Panel failure while reporting a phase error; teardown still runs.
        let mut pending = None;

        info!("invoking application setup");
        let setup = self.app.setup(&mut ctx, args).await;
        match setup {
            Ok(()) => {
                info!("starting application loop");
                if let Err(err) = self.run_loop(&mut ctx).await {
                    error!(error = ?err.cause(), "{err}");
                    self.app.on_unexpected_error(&err);
                    pending = display_error(&mut ctx, &err).err();
                    status = ExitStatus::Failure;
                }
            }
            Err(source) => {
                let err = PhaseError::Setup(source);
                error!(error = ?err.cause(), "{err}");
                self.app.on_run_error(&err);
                pending = display_error(&mut ctx, &err).err();
                status = ExitStatus::Failure;
            }
        }
        // A signal received during the last iteration still gets its callback.
        self.observe_termination();

        let screen = ctx
            .clear_screen()
            .and_then(|()| ctx.panel().center_text_at("terminating", 3));

        info!(exit_code = status.code(), "invoking application teardown");
        let teardown = self.app.teardown(&mut ctx, status).await;

        ctx.arm().soft_hi_z().map_err(RunError::SafeState)?;
        info!("arm set in Hi-Z");

        if let Some(err) = pending {
            return Err(err);
        }
        screen.map_err(RunError::Panel)?;
        teardown.map_err(RunError::Teardown)?;
        Ok(status)
    }

    async fn run_loop(&mut self, ctx: &mut Context<'_>) -> Result<(), PhaseError> {
        let mut iteration: u64 = 0;
        while !self.observe_termination() {
            iteration += 1;
            match self.app.loop_once(ctx).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => {
                    debug!(iteration, "application loop requested stop");
                    break;
                }
                Err(source) => return Err(PhaseError::Loop { iteration, source }),
            }
        }
        debug!(iterations = iteration, "application loop exited");
        Ok(())
    }

    /// Check the termination flag, notifying the application the first time it is seen set.
    fn observe_termination(&mut self) -> bool {
        if !self.termination.is_terminated() {
            return false;
        }
        if !self.terminate_notified {
            self.terminate_notified = true;
            if let Some(signal) = self.termination.signal() {
                self.app.on_terminate(signal);
            }
        }
        true
    }
}

fn display_error(ctx: &mut Context<'_>, err: &PhaseError) -> Result<(), RunError> {
    ctx.panel()
        .display_error(&err.panel_message())
        .map_err(RunError::Panel)
}
