use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount using the live exchange rate
    Convert {
        /// Currency to convert from, e.g. USD
        base: String,
        /// Currency to convert to, e.g. EUR
        target: String,
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Look up a historical daily rate in the rate spreadsheet
    Historical {
        /// Year of the rate, e.g. 2017
        year: String,
        /// Date in dd.mm.yy format, e.g. 11.02.17
        date: String,
        /// One of USD, EUR, RUB, KZT, CNY
        currency: String,
    },
    /// List known currencies, or describe one
    Currencies {
        /// Currency code to describe
        code: Option<String>,
    },
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert {
                base,
                target,
                amount,
            } => fxconv::AppCommand::Convert {
                base,
                target,
                amount,
            },
            Commands::Historical {
                year,
                date,
                currency,
            } => fxconv::AppCommand::Historical {
                year,
                date,
                currency,
            },
            Commands::Currencies { code } => fxconv::AppCommand::Currencies { code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => fxconv::cli::setup::setup_at_path(path),
            None => fxconv::cli::setup::setup(),
        },
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
