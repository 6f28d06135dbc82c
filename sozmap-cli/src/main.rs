//! Sozmap CLI - command-line access to the word map

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sozmap_core::{DEFAULT_SPREADSHEET, DEFAULT_WORKSHEET};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sozmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Spreadsheet title
    #[arg(long, global = true, env = "SOZMAP_SPREADSHEET", default_value = DEFAULT_SPREADSHEET)]
    spreadsheet: String,

    /// Worksheet title
    #[arg(long, global = true, env = "SOZMAP_WORKSHEET", default_value = DEFAULT_WORKSHEET)]
    worksheet: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the worksheet and print the word-map nodes as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Check that credentials work and the worksheet can be read
    Check,

    /// Map a local JSON file of rows to nodes without contacting Google
    Map {
        /// JSON array of objects keyed by column header
        input: String,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so it can supply SOZMAP_SPREADSHEET and SOZMAP_WORKSHEET
    sozmap_core::credentials::load_dotenv()?;
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "sozmap_cli=debug,sozmap_core=debug"
    } else {
        "sozmap_cli=info,sozmap_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Export { output, compact } => {
            commands::export(&cli.spreadsheet, &cli.worksheet, output.as_deref(), compact).await
        }

        Commands::Check => commands::check(&cli.spreadsheet, &cli.worksheet).await,

        Commands::Map { input, compact } => commands::map(&input, compact),
    }
}
