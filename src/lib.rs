//! Base for command-line control applications of the Youpi2 arm.
//!
//! An application implements [`Application`] and hands itself to
//! [`cli::launch`] together with a [`DeviceProvider`]. The runner then:
//!
//! 1. opens the control panel and connects to the arm node,
//! 2. installs SIGINT / SIGTERM handlers,
//! 3. calls `setup`, then `loop_once` until it asks to stop or a termination
//!    signal arrives,
//! 4. calls `teardown` and puts the arm in Hi-Z.
//!
//! Errors raised by `setup` and `loop_once` are logged, shown on the panel and
//! turned into exit code 1.
//!
//! ```no_run
//! use youpi2_app::{Application, ConsoleDevices, Context, Flow, NoArgs};
//!
//! struct Blink(u32);
//!
//! #[async_trait::async_trait]
//! impl Application for Blink {
//!     type Args = NoArgs;
//!     const NAME: &'static str = "blink";
//!
//!     async fn loop_once(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Flow> {
//!         self.0 += 1;
//!         ctx.panel().center_text_at(&self.0.to_string(), 2)?;
//!         tokio::time::sleep(std::time::Duration::from_millis(500)).await;
//!         Ok(Flow::Continue)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let status = youpi2_app::cli::launch(Blink(0), &ConsoleDevices).await?;
//!     std::process::exit(status.code());
//! }
//! ```

pub mod app;
pub mod cli;
pub mod devices;
pub mod error;
pub mod logging;
pub mod model;
pub mod orchestrator;

pub use app::{Application, Context, NoArgs};
#[cfg(feature = "console")]
pub use devices::ConsoleDevices;
pub use devices::{Arm, DeviceProvider, Panel};
pub use error::{ApplicationError, PhaseError, RunError};
pub use logging::{LogContext, LogLevel};
pub use model::{ExitStatus, Flow, RunConfig, TermSignal};
pub use orchestrator::{Runner, Termination};
