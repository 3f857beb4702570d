//! clstool: inspect class structure snapshots from the command line or over HTTP.

use anyhow::Result;
use clap::{Parser, Subcommand};
use class_structure::adapters::ordering::ordering_by_name;
use class_structure::app::engine::ModelEngine;
use class_structure::cli;
use class_structure::server::http;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clstool")]
#[command(about = "Structural views of an object-oriented type system", long_about = None)]
struct Cli {
    /// Extraction snapshot (JSON)
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ordering of members and relations: kind or name
    #[arg(long, default_value = "kind", global = true)]
    order: String,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every class of the model
    Classes,
    /// Show the class hierarchy
    Hierarchy {
        /// Root class id (defaults to every hierarchy root)
        #[arg(long)]
        root: Option<String>,
    },
    /// Show the member and relations tree of a class
    Members { class: String },
    /// Show the UML table of a class
    Uml { class: String },
    /// Show the relation counts of a class
    Summary { class: String },
    /// Validate the snapshot and report model statistics
    Check,
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7878")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so JSON output stays parseable
    let log_level = if args.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "class_structure={log_level},clstool={log_level}"
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ordering = ordering_by_name(&args.order)?;
    let engine = ModelEngine::load_from_json(&args.snapshot, ordering)?;

    match args.command {
        Commands::Classes => cli::display_classes(&engine, args.json),
        Commands::Hierarchy { root } => cli::display_hierarchy(&engine, root.as_deref(), args.json),
        Commands::Members { class } => cli::display_members(&engine, &class, args.json),
        Commands::Uml { class } => cli::display_uml(&engine, &class, args.json),
        Commands::Summary { class } => cli::display_summary(&engine, &class, args.json),
        Commands::Check => cli::check_snapshot(&engine, args.json),
        Commands::Serve { port, host } => {
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            http::serve(engine, addr).await
        }
    }
}
