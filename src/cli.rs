use std::env;
use std::path::PathBuf;

use crate::config::{ConfigError, GeneratorConfig};
use crate::series::SeriesKind;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    pub year: Option<i32>,
    pub household_out: Option<PathBuf>,
    pub price_out: Option<PathBuf>,
    /// Generate only this series.
    pub only: Option<SeriesKind>,
    pub no_noise: bool,
    pub summary: bool,
    pub verify: bool,
}

/// What the binary should do after parsing.
#[derive(Debug)]
pub enum CliAction {
    Run(CliOptions),
    Help,
}

pub fn parse_args() -> Result<CliAction, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliAction, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(CliAction::Help),
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                set_once(&mut opts.config, PathBuf::from(path), "--config")?;
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --preset (expected a preset name)",
                )?;
                set_once(&mut opts.preset, name.to_string(), "--preset")?;
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                set_once(&mut opts.seed, seed, "--seed")?;
            }
            "--year" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --year (expected a year)")?;
                let year = raw
                    .parse::<i32>()
                    .map_err(|_| format!("--year value \"{raw}\" is not a valid year"))?;
                set_once(&mut opts.year, year, "--year")?;
            }
            "--household-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --household-out (expected a file path)",
                )?;
                set_once(
                    &mut opts.household_out,
                    PathBuf::from(path),
                    "--household-out",
                )?;
            }
            "--price-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --price-out (expected a file path)",
                )?;
                set_once(&mut opts.price_out, PathBuf::from(path), "--price-out")?;
            }
            "--only" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --only (expected household or price)",
                )?;
                let kind = SeriesKind::from_name(name).ok_or_else(|| {
                    format!(
                        "--only value \"{name}\" is not a series (expected household or price)"
                    )
                })?;
                set_once(&mut opts.only, kind, "--only")?;
            }
            "--no-noise" => opts.no_noise = true,
            "--summary" => opts.summary = true,
            "--verify" => opts.verify = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(CliAction::Run(opts))
}

impl CliOptions {
    /// Loads the configuration source: `--config`, then `--preset`, then the default preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed, or the
    /// preset is unknown.
    pub fn load_config(&self) -> Result<GeneratorConfig, ConfigError> {
        if let Some(ref path) = self.config {
            GeneratorConfig::from_toml_file(path)
        } else if let Some(ref name) = self.preset {
            GeneratorConfig::from_preset(name)
        } else {
            Ok(GeneratorConfig::korea_2024())
        }
    }

    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_to(&self, cfg: &mut GeneratorConfig) {
        if let Some(seed) = self.seed {
            cfg.general.seed = Some(seed);
        }
        if let Some(year) = self.year {
            cfg.general.year = year;
        }
        if let Some(ref path) = self.household_out {
            cfg.household.output.clone_from(path);
        }
        if let Some(ref path) = self.price_out {
            cfg.price.output.clone_from(path);
        }
        match self.only {
            Some(SeriesKind::Household) => cfg.price.enabled = false,
            Some(SeriesKind::Price) => cfg.household.enabled = false,
            None => {}
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, flag: &str) -> Result<(), String> {
    if slot.replace(value).is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    Ok(())
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("grid-mockdata: synthetic hourly household consumption and SMP series");
    eprintln!();
    eprintln!("Usage: grid-mockdata [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load configuration from a TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (korea_2024, flat)");
    eprintln!("  --seed <u64>             Override the random seed");
    eprintln!("  --year <i32>             Override the calendar year");
    eprintln!("  --household-out <path>   Override the household CSV path");
    eprintln!("  --price-out <path>       Override the SMP CSV path");
    eprintln!("  --only <series>          Generate only household or price");
    eprintln!("  --no-noise               Pin every random multiplier to 1.0");
    eprintln!("  --summary                Print per-series statistics to stdout");
    eprintln!("  --verify                 Read each file back and check it");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the korea_2024 preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}
