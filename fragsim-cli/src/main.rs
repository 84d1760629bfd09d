//! fragsim - heap fragmentation simulator CLI.

mod observability;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fragsim_core::{
    CancelToken, NullPresenter, Presenter, RunOutcome, SeedMode, SimConfig, SimulationRunner,
};

use render::ConsolePresenter;

/// Simulate a first-fit free-list allocator under a random workload.
#[derive(Parser)]
#[command(name = "fragsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of ticks to run; omit for an unlimited run
    #[arg(short, long)]
    epochs: Option<u64>,

    /// Largest allocation request a single tick may draw
    #[arg(short, long, default_value = "10")]
    max_request: usize,

    /// Heap size in cells
    #[arg(short = 's', long, default_value = "100")]
    heap_size: usize,

    /// Probability that a tick frees instead of allocating
    #[arg(short = 'p', long, default_value = "0.3")]
    free_prob: f64,

    /// Random seed selection
    #[arg(long, value_enum, default_value = "time")]
    seed: SeedArg,

    /// Suppress per-tick rendering
    #[arg(short, long)]
    quiet: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// CLI-facing seed selection, mapped onto the engine's seed mode.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeedArg {
    /// Seed from the current time; every run differs
    Time,
    /// Fixed seed for a reproducible run
    FixedA,
    /// Second fixed seed for a distinct reproducible run
    FixedB,
}

impl From<SeedArg> for SeedMode {
    fn from(arg: SeedArg) -> Self {
        match arg {
            SeedArg::Time => SeedMode::Time,
            SeedArg::FixedA => SeedMode::FixedA,
            SeedArg::FixedB => SeedMode::FixedB,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init_tracing(cli.verbose)?;

    let config = SimConfig::new()
        .with_epochs(cli.epochs)
        .with_max_request(cli.max_request)
        .with_heap_size(cli.heap_size)
        .with_free_prob(cli.free_prob)
        .with_seed(cli.seed.into());
    config.validate().context("invalid configuration")?;

    if !cli.json {
        render::print_config(&config);
    }

    let cancel = CancelToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, requesting orderly shutdown");
            signal_cancel.cancel();
        }
    });

    let quiet = cli.quiet || cli.json;
    let runner = SimulationRunner::from_config(&config, cancel);
    let outcome: RunOutcome = tokio::task::spawn_blocking(move || {
        let mut presenter: Box<dyn Presenter + Send> = if quiet {
            Box::new(NullPresenter)
        } else {
            Box::new(ConsolePresenter)
        };
        runner.run(presenter.as_mut())
    })
    .await
    .context("simulation thread panicked")??;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render::print_report(&outcome);
    }

    Ok(())
}
