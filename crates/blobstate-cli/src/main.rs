use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "blobstate")]
#[command(about = "Versioned key-value state store over blob storage", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a key; prints the value to stdout
    Get {
        /// Storage URL (e.g. azure://container@account, memory://)
        #[arg(short, long)]
        url: String,

        /// Logical state key, optionally "<prefix>||<name>"
        key: String,
    },

    /// Write a key
    Set {
        /// Storage URL (e.g. azure://container@account, memory://)
        #[arg(short, long)]
        url: String,

        /// Logical state key, optionally "<prefix>||<name>"
        key: String,

        /// Value to store (omit to read from stdin)
        value: Option<String>,

        /// Treat the value as JSON and store its canonical encoding
        #[arg(long)]
        json: bool,

        /// Expected version token; the write fails on mismatch
        #[arg(long)]
        etag: Option<String>,

        /// Succeed only if the key does not exist yet
        #[arg(long)]
        first_write: bool,

        /// Content type hint stored with the value
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Delete a key
    Delete {
        /// Storage URL (e.g. azure://container@account, memory://)
        #[arg(short, long)]
        url: String,

        /// Logical state key, optionally "<prefix>||<name>"
        key: String,

        /// Expected version token; the delete fails on mismatch
        #[arg(long)]
        etag: Option<String>,
    },

    /// Probe the storage backend for liveness
    Ping {
        /// Storage URL (e.g. azure://container@account, memory://)
        #[arg(short, long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    // Priority: RUST_LOG env var > verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Get { url, key } => {
            commands::get::run(&url, &key).await?;
        }
        Commands::Set {
            url,
            key,
            value,
            json,
            etag,
            first_write,
            content_type,
        } => {
            commands::set::run(
                &url,
                &key,
                value.as_deref(),
                json,
                etag,
                first_write,
                content_type,
            )
            .await?;
        }
        Commands::Delete { url, key, etag } => {
            commands::delete::run(&url, &key, etag).await?;
        }
        Commands::Ping { url } => {
            commands::ping::run(&url).await?;
        }
    }

    Ok(())
}
