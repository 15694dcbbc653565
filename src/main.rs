//! grid-mockdata entry point: CLI wiring and config-driven generation.

use std::fmt::Display;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use grid_mockdata::cli::{self, CliAction};
use grid_mockdata::runner::{resolve_noise, run};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Reports a fatal error on stderr even when logging is filtered out.
fn report(e: impl Display) {
    error!("{e}");
    eprintln!("error: {e}");
}

fn main() {
    init_logging();

    let opts = match cli::parse_args() {
        Ok(CliAction::Run(opts)) => opts,
        Ok(CliAction::Help) => {
            cli::print_usage();
            return;
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    // --config takes priority, then --preset, then korea_2024
    let mut config = match opts.load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            report(e);
            process::exit(1);
        }
    };
    opts.apply_to(&mut config);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            report(e);
        }
        process::exit(1);
    }

    let noise = resolve_noise(&config, opts.no_noise);
    let report = match run(&config, noise, opts.verify) {
        Ok(report) => report,
        Err(e) => {
            report(e);
            process::exit(1);
        }
    };

    if opts.summary {
        for output in &report.outputs {
            println!("{}", output.summary);
        }
    }

    info!(
        rows = report.total_rows(),
        files = report.outputs.len(),
        year = report.year,
        "done"
    );
}
