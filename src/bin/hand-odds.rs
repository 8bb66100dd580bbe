use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hand_odds::{run_request, CancelToken, SimulationRequest, WorkerMessage};

#[derive(Debug, Parser)]
#[command(name = "hand-odds", version)]
#[command(about = "Estimate opening hand odds for a trading card deck")]
struct Args {
    /// Simulation request (JSON)
    request: PathBuf,

    /// Override the request's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the request's trial count
    #[arg(long)]
    iterations: Option<u32>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.request)
        .with_context(|| format!("reading {}", args.request.display()))?;
    let mut request = SimulationRequest::from_json(&text)
        .with_context(|| format!("parsing {}", args.request.display()))?;
    if let Some(seed) = args.seed {
        request.config.seed = Some(seed);
    }
    if let Some(iterations) = args.iterations {
        request.config.iterations = iterations;
    }

    let report = run_request(request, &CancelToken::new(), |message| {
        if let WorkerMessage::Progress { progress } = message {
            log::info!("{progress}%");
        }
    })?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
