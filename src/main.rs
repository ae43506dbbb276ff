//! Heartbeat: the smallest useful Youpi2 application.
//!
//! Counts beats on the panel until interrupted or until `--beats` is reached.

use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use std::time::Duration;
use tracing::info;
use youpi2_app::{cli, Application, ConsoleDevices, Context, ExitStatus, Flow, TermSignal};

#[derive(Debug, Clone, Args)]
struct HeartbeatArgs {
    /// Delay between two beats
    #[arg(long, default_value = "1s")]
    period: humantime::Duration,

    /// Stop after this many beats
    #[arg(long)]
    beats: Option<u64>,
}

#[derive(Debug, Default)]
struct Heartbeat {
    period: Duration,
    limit: Option<u64>,
    count: u64,
}

#[async_trait]
impl Application for Heartbeat {
    type Args = HeartbeatArgs;
    const NAME: &'static str = "heartbeat";
    const TITLE: &'static str = "Heartbeat";
    const VERSION: Option<&'static str> = Some(env!("CARGO_PKG_VERSION"));

    async fn setup(&mut self, ctx: &mut Context<'_>, args: &HeartbeatArgs) -> Result<()> {
        self.period = Duration::from(args.period);
        self.limit = args.beats;
        ctx.panel().center_text_at("ready", 2)?;
        Ok(())
    }

    async fn loop_once(&mut self, ctx: &mut Context<'_>) -> Result<Flow> {
        tokio::time::sleep(self.period).await;
        self.count += 1;
        ctx.panel()
            .center_text_at(&format!("beat {}", self.count), 2)?;
        Ok(Flow::from(self.limit.is_some_and(|limit| self.count >= limit)))
    }

    async fn teardown(&mut self, _ctx: &mut Context<'_>, exit: ExitStatus) -> Result<()> {
        info!(beats = self.count, exit_code = exit.code(), "heartbeat stopped");
        Ok(())
    }

    fn on_terminate(&mut self, signal: TermSignal) {
        info!(%signal, beats = self.count, "stopping on signal");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let status = cli::launch(Heartbeat::default(), &ConsoleDevices).await?;
    std::process::exit(status.code());
}
