//! msgview CLI: serve the read-only messages viewer, or export one conversation to CSV.
//! Config from env (and `.env`); CLI args override.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storage::{to_csv, MessageQuery, Repository, ViewerStore};
use viewer_core::{init_tracing, ViewerConfig};
use viewer_server::handlers::messages::EXPORT_DEFAULT_LIMIT;
use viewer_server::run_server;

#[derive(Parser)]
#[command(name = "msgview")]
#[command(about = "Read-only chat messages viewer: serve, export", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP viewer (port and database URL can override PORT / DATABASE_URL).
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(long)]
        database_url: Option<String>,
    },
    /// Write one conversation as CSV to stdout, with the same filters as the HTTP export.
    Export {
        #[arg(long)]
        instance_id: String,
        #[arg(long)]
        remote_jid: String,
        #[arg(long)]
        text: Option<String>,
        /// in | out
        #[arg(long)]
        direction: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(short, long)]
        limit: Option<i64>,
        #[arg(long, default_value = "0")]
        page: i64,
        #[arg(long)]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ViewerConfig::load()?;

    match cli.command {
        Commands::Serve { port, database_url } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(url) = database_url {
                config.database_url = url;
            }
            config.validate()?;
            init_tracing(&config.log_file).context("Failed to initialize tracing")?;
            run_server(config).await
        }
        Commands::Export {
            instance_id,
            remote_jid,
            text,
            direction,
            start,
            end,
            limit,
            page,
            database_url,
        } => {
            if let Some(url) = database_url {
                config.database_url = url;
            }
            config.validate()?;
            let query = MessageQuery {
                instance_id: Some(instance_id),
                remote_jid: Some(remote_jid),
                text,
                direction,
                start,
                end,
                limit: limit.map(|l| l.to_string()),
                page: Some(page.to_string()),
            };
            handle_export(&config, &query).await
        }
    }
}

/// Handle the export command. Logs stay off so stdout carries only CSV.
async fn handle_export(config: &ViewerConfig, query: &MessageQuery) -> Result<()> {
    let filter = query.to_filter_with_default_limit(EXPORT_DEFAULT_LIMIT)?;
    let store = ViewerStore::connect(
        &config.database_url,
        &config.db_schema,
        config.db_max_connections,
    )
    .await
    .context("Failed to open message store")?;

    let page = store.list_messages(&filter).await;
    store.pool_manager().close().await;
    let page = page?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(to_csv(&page.rows).as_bytes())?;
    stdout.flush()?;
    eprintln!("Exported {} of {} messages", page.rows.len(), page.total);
    Ok(())
}
