//! doryctl - command line client for dory-core
//!
//! Usage:
//!   doryctl def get <project> <kind> [modules...]   # Show project definitions
//!   doryctl login                                   # Store server URL and token
//!   doryctl logout                                  # Clear the stored token
//!   doryctl version

mod interactive;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use doryctl_core::commands::{DefGetCommand, DefGetOptions, LoginOptions, SessionCommand};
use doryctl_core::config::{ConfigStore, SettingsOverrides, default_config_path};
use doryctl_core::context::AppContext;

use crate::interactive::{LoginFlow, PrefilledLogin, print_note, print_success};

#[derive(Parser)]
#[command(name = "doryctl")]
#[command(about = "Command line client for dory-core", long_about = None)]
struct Cli {
    /// Config file (default: $DORYCTL_CONFIG or ~/.config/doryctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// dory-core server URL, overrides the config file
    #[arg(long, global = true, value_name = "URL")]
    server_url: Option<String>,

    /// Access token, overrides the config file
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Show debug logs, including the HTTP exchange
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project definitions
    Def(DefArgs),

    /// Store the server URL and access token in the config file
    Login,

    /// Remove the access token from the config file
    Logout,

    /// Show doryctl version
    Version,
}

#[derive(Args)]
struct DefArgs {
    #[command(subcommand)]
    command: DefSubcommand,
}

#[derive(Subcommand)]
enum DefSubcommand {
    /// Get one kind of project definition
    ///
    /// Kinds: build, package, deploy, pipeline, ignore, ops, step, steps.
    /// deploy needs --env, pipeline needs --branch, step needs --step.
    Get(GetArgs),
}

#[derive(Args)]
struct GetArgs {
    /// Project name
    project_name: String,

    /// Definition kind
    kind: String,

    /// Only show these modules
    module_names: Vec<String>,

    /// Environment name (deploy, step)
    #[arg(long = "env", value_name = "ENV")]
    env_name: Option<String>,

    /// Branch name (pipeline)
    #[arg(long = "branch", value_name = "BRANCH")]
    branch_name: Option<String>,

    /// Custom step name (step)
    #[arg(long = "step", value_name = "STEP")]
    step_name: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Aligned table
    #[default]
    Table,
    /// Pretty JSON
    Json,
    /// YAML
    Yaml,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            server_url: self.server_url.clone(),
            access_token: self.token.clone(),
            timeout: self.timeout,
            insecure: self.insecure,
            verbose: self.verbose,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(cli.verbose),
        )
        .init();

    run_cli(cli)
}

fn run_cli(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Def(DefArgs {
            command: DefSubcommand::Get(args),
        }) => run_def_get(&cli, args),
        Commands::Login => run_login(&cli),
        Commands::Logout => run_logout(&cli),
        Commands::Version => {
            println!("doryctl version: {}", doryctl_core::VERSION);
            Ok(())
        }
    }
}

fn def_get_options(args: &GetArgs) -> DefGetOptions {
    let mut options = DefGetOptions::new(&args.project_name, &args.kind)
        .with_modules(&args.module_names)
        .with_output(args.output.as_str());
    if let Some(env) = &args.env_name {
        options = options.with_env(env);
    }
    if let Some(branch) = &args.branch_name {
        options = options.with_branch(branch);
    }
    if let Some(step) = &args.step_name {
        options = options.with_step(step);
    }
    options
}

fn run_def_get(cli: &Cli, args: &GetArgs) -> Result<()> {
    // Reject bad input before reading config or touching the network.
    let request = def_get_options(args).validate()?;
    tracing::debug!(
        project = %request.project_name,
        kind = %request.selection.kind,
        format = %request.format,
        "def get"
    );

    let ctx = AppContext::from_overrides(cli.config.clone(), &cli.overrides())?;
    let command = DefGetCommand::new(ctx.http_provider()?);
    let report = command.run(&request)?;

    let output = report.render()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn session_command(cli: &Cli) -> Result<SessionCommand> {
    let path = default_config_path(cli.config.as_deref())?;
    Ok(SessionCommand::new(ConfigStore::from_path(path)))
}

fn run_login(cli: &Cli) -> Result<()> {
    let session = session_command(cli)?;
    let stored = session.store().load()?;

    let prefilled = PrefilledLogin {
        server_url: cli.server_url.clone().or(stored.server_url),
        access_token: cli.token.clone(),
    };
    let answers = LoginFlow::new(prefilled).collect()?;

    let mut options = LoginOptions::new(answers.access_token).with_server_url(answers.server_url);
    if let Some(timeout) = cli.timeout {
        options = options.with_timeout(timeout);
    }
    if cli.insecure {
        options = options.with_insecure(true);
    }
    let report = session.login(&options)?;

    print_success(&format!(
        "Logged in to {}",
        report.server_url.as_deref().unwrap_or_default()
    ));
    print_note(&format!(
        "Config saved to {}",
        session.store().config_path().display()
    ));
    Ok(())
}

fn run_logout(cli: &Cli) -> Result<()> {
    let session = session_command(cli)?;
    let report = session.logout()?;
    if report.changed {
        print_success("Logged out");
    } else {
        print_note("Not logged in");
    }
    Ok(())
}
