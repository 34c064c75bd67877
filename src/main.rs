//! Map generator entry point: CLI wiring, logging and config resolution.

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use wind_planning_map::cli::Cli;
use wind_planning_map::config::MapConfig;
use wind_planning_map::pipeline;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install log subscriber: {e}");
    }

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(config: &MapConfig) -> anyhow::Result<()> {
    info!(
        source = %config.source.path.display(),
        overlays = %config.overlays.dir.display(),
        "building map"
    );
    let report = pipeline::run(config).with_context(|| {
        format!(
            "failed to build map from \"{}\"",
            config.source.path.display()
        )
    })?;
    println!("{report}");
    Ok(())
}
