//! hexcast
//!
//! Look up, identify, decompose and reveal Hex Casting patterns.
//!
//! Usage:
//!   hexcast lookup <text>
//!   hexcast identify <DIR> [SIG]
//!   hexcast decompose <value> [--timeout-ms N] [--no-oracle]
//!   hexcast reveal [FILE] [--inline]
//!   hexcast segments <DIR> [SIG]

mod commands;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hexcast_numbers::{DEFAULT_BOUND, MAX_BOUND};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Session;

#[derive(Parser)]
#[command(name = "hexcast", version, about = "Hex Casting pattern codec")]
struct Cli {
    /// JSON literal table (`{"<n>": ["<DIR>", "<sig>"]}`) used instead of a
    /// generated one.
    #[arg(long, global = true, env = "HEXCAST_LITERALS")]
    literals: Option<PathBuf>,

    /// JSON pattern metadata to register alongside the built-ins.
    #[arg(long, global = true, env = "HEXCAST_PATTERNS")]
    patterns: Option<PathBuf>,

    /// Bound of the generated literal table.
    #[arg(
        long,
        global = true,
        env = "HEXCAST_LITERAL_BOUND",
        default_value_t = DEFAULT_BOUND,
        value_parser = clap::value_parser!(i64).range(0..=MAX_BOUND)
    )]
    bound: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a name, alias, literal or `DIR sig` pair.
    Lookup {
        /// Text to resolve, e.g. "mind's ref" or "numerical reflection: 42".
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Oracle budget when a number has to be generated.
        #[arg(long, default_value = "1000")]
        timeout_ms: u64,
    },

    /// Name a drawn pattern.
    Identify {
        /// Start direction, e.g. EAST or north_west.
        direction: String,
        /// Angle signature.
        #[arg(default_value = "")]
        signature: String,
    },

    /// Build a number out of literal and operator patterns.
    Decompose {
        /// Target value: `-12`, `3.25`, `1e3` or `3/4`.
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Oracle budget in milliseconds.
        #[arg(long, default_value = "1000")]
        timeout_ms: u64,

        /// Skip the oracle and decompose directly.
        #[arg(long)]
        no_oracle: bool,
    },

    /// Parse a dumped iota list and print it with pattern names.
    Reveal {
        /// Input file; standard input when omitted.
        file: Option<PathBuf>,

        /// Print on a single line.
        #[arg(long)]
        inline: bool,
    },

    /// Export a pattern's canonical segments and their six rotations as JSON.
    Segments {
        direction: String,
        #[arg(default_value = "")]
        signature: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexcast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let session = Session::load(cli.literals.as_deref(), cli.patterns.as_deref(), cli.bound)?;

    let output = match cli.command {
        Commands::Lookup { text, timeout_ms } => {
            session
                .lookup(&text.join(" "), Duration::from_millis(timeout_ms))
                .await?
        }
        Commands::Identify {
            direction,
            signature,
        } => session.identify(&direction, &signature)?,
        Commands::Decompose {
            value,
            timeout_ms,
            no_oracle,
        } => {
            let timeout = (!no_oracle).then(|| Duration::from_millis(timeout_ms));
            session.decompose(&value, timeout).await?
        }
        Commands::Reveal { file, inline } => {
            let source = commands::read_input(file.as_deref())?;
            session.reveal(&source, inline)?
        }
        Commands::Segments {
            direction,
            signature,
        } => commands::segments(&direction, &signature)?,
    };

    println!("{output}");
    Ok(())
}
