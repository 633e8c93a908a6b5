use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use duka_core::RawMessage;

mod config;
mod logging;
mod store;

use config::DukaConfig;
use store::JsonStore;

#[derive(Debug, Parser)]
#[command(name = "duka", version, about = "Turn mobile-money and bank SMS into bookkeeping records")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `duka_sms=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify an inbox export and merge new transactions into the store
    Scan {
        /// JSON array of {externalId?, body, receivedAtEpochMillis}
        #[arg(long)]
        inbox: PathBuf,
        /// Transaction list to merge into (overrides config `store`)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Only look at the N most recent messages (overrides config `scan_limit`)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Classify a single message body and print the resulting record
    Classify {
        body: String,
        /// Receipt time in epoch milliseconds; defaults to now
        #[arg(long)]
        received_at: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = DukaConfig::load(cli.config.as_deref()).await?;
    logging::init(cli.log_level.as_deref().unwrap_or(&cfg.log_level))?;

    match cli.command {
        Command::Scan { inbox, store, limit } => {
            let store = JsonStore::new(store.unwrap_or_else(|| cfg.store.clone()));
            let limit = limit.unwrap_or(cfg.scan_limit);
            run_scan(&cfg, &inbox, &store, limit).await
        }
        Command::Classify { body, received_at } => {
            let received_at = received_at.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
            run_classify(&cfg, body, received_at)
        }
    }
}

async fn run_scan(
    cfg: &DukaConfig,
    inbox: &std::path::Path,
    store: &JsonStore,
    limit: usize,
) -> anyhow::Result<()> {
    let messages = store::read_inbox(inbox).await?;
    let batch = duka_sms::most_recent(&messages, limit);
    tracing::info!(inbox = %inbox.display(), total = messages.len(), batch = batch.len(), "scanning inbox");

    let report = duka_sms::scan_with(&batch, &cfg.classifier);

    let mut existing = store.load().await?;
    let added = duka_sms::merge_by_id(&mut existing, report.transactions);
    if added == 0 {
        tracing::info!("no new transactions found");
        return Ok(());
    }

    store.save(&existing).await?;
    tracing::info!(
        added,
        total = existing.len(),
        store = %store.path().display(),
        "saved new transactions"
    );
    Ok(())
}

fn run_classify(cfg: &DukaConfig, body: String, received_at: i64) -> anyhow::Result<()> {
    let message = RawMessage::new(None, body, received_at).context("Invalid receipt time")?;
    match duka_sms::classify_with(&message, &cfg.classifier) {
        Some(fields) => {
            let tx = duka_sms::assemble(&message, &fields);
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        None => tracing::warn!("not a financial message"),
    }
    Ok(())
}
