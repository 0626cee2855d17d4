mod actors;
mod analysis;
mod config;
mod engine;
mod interest;
mod ledger;
mod models;
mod report;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::EngineConfig;
use crate::engine::ReportEngine;
use crate::storage::LedgerStore;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: A fuller CLI would pull in the clap crate; two positional
    //      arguments and a log level cover the dashboard feeds for now.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: fuel-ledger-engine [input].csv|[input].json [config].json [log_level:optional] > [output].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let mut config_path: Option<&String> = None;
    let mut log_level = LevelFilter::ERROR;

    for arg in &args[2..] {
        if arg.ends_with(".json") {
            config_path = Some(arg);
        } else {
            log_level = parse_log_level(arg);
        }
    }

    setup_logging(log_level);

    let config = match config_path {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default()
    };

    let storage = Arc::new(LedgerStore::new());
    let engine = ReportEngine::new(storage, config);

    let timer = Instant::now();
    engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Processed ledger records in: {duration:?}");

    write_results_to_stdout(&engine).await?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the results table for redirection, so logging has to stay on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn write_results_to_stdout(engine: &ReportEngine) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "account,transactions,charges,payments,closing_balance,accrued_interest")?;

    for account_id in engine.account_ids() {
        let Some(report) = engine.report(account_id).await else {
            continue;
        };

        writeln!(
            output,
            "{},{},{},{},{},{}",
            report.account_id,
            report.summary.transaction_count,
            report.summary.total_charges,
            report.summary.total_payments,
            report.closing_balance(),
            report.accrued_interest()
        )?;
    }

    output.flush()?;

    Ok(())
}
