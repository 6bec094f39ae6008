use anyhow::Result;
use clap::{Parser, Subcommand};
use crxlist::{
    config::Config,
    output::{print_result, OutputFormat},
    platform::chrome_extensions_dir,
    scanner::{ChromeScanner, Scanner},
};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod exit_codes {
    pub const ERROR: u8 = 1;
}

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "CRXLIST_LOG";

#[derive(Parser)]
#[command(name = "crxlist")]
#[command(
    author,
    version,
    about = "List installed Chrome extensions with their name and version"
)]
struct Cli {
    /// Log scan details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the default Chrome profile for extensions (the default command)
    Scan {
        /// Output format (lines, json, table)
        #[arg(short, long)]
        format: Option<String>,

        /// Visit folders and manifests in file name order
        #[arg(long)]
        sorted: bool,
    },

    /// Print the extensions directory that would be scanned
    Path,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("crxlist={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!("{:#}; using default configuration", e);
        Config::default()
    });

    match cli.command.unwrap_or(Commands::Scan {
        format: None,
        sorted: false,
    }) {
        Commands::Scan { format, sorted } => run_scan(&config, format, sorted).await,
        Commands::Path => {
            println!("{}", chrome_extensions_dir()?.display());
            Ok(())
        }
        Commands::Config { init, path } => handle_config(init, path),
    }
}

async fn run_scan(config: &Config, format: Option<String>, sorted: bool) -> Result<()> {
    let format = match format {
        Some(f) => OutputFormat::from_str(&f).map_err(|e| anyhow::anyhow!(e))?,
        None => config.default_format,
    };

    let mut options = config.scan_options();
    options.sorted |= sorted;

    let scanner = ChromeScanner::new(options)?;
    debug!(
        scanner = scanner.name(),
        dir = %scanner.extensions_dir().display(),
        "starting scan"
    );

    let result = scanner.scan().await?;
    print_result(&result, format)
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        Config::default().save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'crxlist config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
