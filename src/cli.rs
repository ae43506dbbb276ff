use crate::app::Application;
use crate::devices::DeviceProvider;
use crate::error::RunError;
use crate::logging::{LogContext, LogLevel};
use crate::model::{ExitStatus, RunConfig, DEFAULT_ARM_NODE_NAME, DEFAULT_PANEL_DEVICE};
use crate::orchestrator::Runner;
use clap::{Args, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Options shared by every Youpi2 application.
#[derive(Debug, Args, Clone, PartialEq, Eq)]
pub struct BaseArgs {
    /// Mount point of the control panel device
    #[arg(long, default_value = DEFAULT_PANEL_DEVICE)]
    pub pnldev: PathBuf,

    /// Name of the arm node
    #[arg(long, default_value = DEFAULT_ARM_NODE_NAME)]
    pub arm_node_name: String,

    /// Trace everything (implies --verbose)
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for BaseArgs {
    fn default() -> Self {
        Self {
            pnldev: PathBuf::from(DEFAULT_PANEL_DEVICE),
            arm_node_name: DEFAULT_ARM_NODE_NAME.to_string(),
            debug: false,
            verbose: false,
        }
    }
}

/// Full command line: the common options plus the application's own.
#[derive(Debug, Parser, Clone)]
pub struct AppCli<A: Args> {
    #[command(flatten)]
    pub base: BaseArgs,

    #[command(flatten)]
    pub custom: A,
}

/// Build the command of application `A`, named and versioned after it.
pub fn command<A: Application>() -> clap::Command {
    let cmd = AppCli::<A::Args>::command()
        .name(A::NAME)
        .about(A::TITLE);
    match A::VERSION {
        Some(version) => cmd.version(version),
        None => cmd,
    }
}

/// Parse `argv` (program name first) for application `A`.
pub fn parse_args<A, I, T>(argv: I) -> Result<AppCli<A::Args>, clap::Error>
where
    A: Application,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command::<A>().try_get_matches_from(argv)?;
    AppCli::<A::Args>::from_arg_matches(&matches)
}

/// Build a `RunConfig` from the common options.
pub fn build_config(args: &BaseArgs) -> RunConfig {
    RunConfig {
        panel_device: args.pnldev.clone(),
        arm_node_name: args.arm_node_name.clone(),
        log_level: LogLevel::from_flags(args.debug, args.verbose),
    }
}

/// Initialise logging and run `app` with already parsed arguments.
pub async fn execute<A, P>(
    app: A,
    provider: &P,
    cli: AppCli<A::Args>,
) -> Result<ExitStatus, RunError>
where
    A: Application,
    P: DeviceProvider + ?Sized,
{
    let config = build_config(&cli.base);
    let log = LogContext::init(A::NAME, config.log_level);
    let mut runner = Runner::new(app, log);
    runner.run(provider, &config, &cli.custom).await
}

/// Parse the process arguments and run `app`.
///
/// Invalid arguments, `--help` and `--version` print their message and exit
/// the process, the way clap does for any parser.
pub async fn launch<A, P>(app: A, provider: &P) -> Result<ExitStatus, RunError>
where
    A: Application,
    P: DeviceProvider + ?Sized,
{
    let cli = parse_args::<A, _, _>(std::env::args_os()).unwrap_or_else(|e| e.exit());
    execute(app, provider, cli).await
}
