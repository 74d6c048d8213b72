use std::rc::Rc;

use bondflow::{Pipeline, PipelineConfig, SystemClock};
use bondflow_core::BondCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"bondflow - simulated US-Treasuries trading back-end

USAGE:
    bondflow [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter

With no options the four input files (prices.txt, trades.txt,
marketdata.txt, inquiries.txt) are read from the working directory and
the six output files are appended there.
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bondflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            tracing::info!("loading configuration from {}", path);
            PipelineConfig::from_file(&path)?
        }
        None => PipelineConfig::default(),
    };

    let catalog = Rc::new(BondCatalog::with_defaults());
    tracing::info!(instruments = catalog.len(), "catalog loaded");

    let pipeline = Pipeline::build(config, catalog.clone(), Rc::new(SystemClock))?;
    let summary = pipeline.run()?;

    tracing::info!(
        accepted = summary.prices.accepted,
        skipped = summary.prices.skipped,
        "prices drained"
    );
    tracing::info!(
        accepted = summary.trades.accepted,
        skipped = summary.trades.skipped,
        "trades drained"
    );
    tracing::info!(
        accepted = summary.market_data.accepted,
        skipped = summary.market_data.skipped,
        "market data drained"
    );
    tracing::info!(
        accepted = summary.inquiries.accepted,
        skipped = summary.inquiries.skipped,
        "inquiries drained"
    );

    let risk = pipeline.risk.borrow();
    for sector in [catalog.front_end(), catalog.belly(), catalog.long_end()] {
        let rollup = risk.bucketed_risk(&sector);
        tracing::info!(sector = %rollup.sector.name, pv01 = %rollup.pv01, "sector risk");
    }

    Ok(())
}
