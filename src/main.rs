mod cli;
mod core;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::output::{detect_color, OutputFormat, OutputOptions};
use crate::core::config::{AppConfig, AwsSettings};

#[derive(Parser)]
#[command(
    name = "ce-report",
    about = "Month-to-date AWS spend per service with an end-of-month forecast",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (text|json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// AWS profile to use instead of the environment default
    #[arg(long, global = true)]
    profile: Option<String>,

    /// AWS region to use instead of the environment default
    #[arg(long, global = true)]
    region: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the per-service report and forecast (default)
    Report,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init,
    /// Validate config file
    Check,
    /// Print the config file path
    Path,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "ce_report=debug,warn" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Command-line flags take precedence over the config file; `--json` wins over `--format`.
fn resolve_options(cli: &Cli, config: AppConfig) -> (OutputOptions, AwsSettings) {
    let format_name = if cli.json {
        "json"
    } else {
        cli.format
            .as_deref()
            .unwrap_or(config.settings.default_format.as_str())
    };
    let output_opts = OutputOptions {
        format: OutputFormat::from_name(format_name),
        pretty: cli.pretty,
        use_color: detect_color(!cli.no_color, &config.settings.color),
    };

    let aws = AwsSettings {
        profile: cli.profile.clone().or(config.aws.profile),
        region: cli.region.clone().or(config.aws.region),
    };
    (output_opts, aws)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Every date boundary in the report derives from this one instant
    let now = chrono::Local::now().naive_local();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        None | Some(Commands::Report) => {
            let config = AppConfig::load()?;
            for issue in config.validate() {
                tracing::warn!("config: {}", issue);
            }

            let (output_opts, aws) = resolve_options(&cli, config);
            cli::report_cmd::run(now, &aws, &output_opts).await?;
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init => cli::config_cmd::init()?,
            ConfigAction::Check => cli::config_cmd::check()?,
            ConfigAction::Path => cli::config_cmd::path(),
        },
    }

    Ok(())
}
