//! src/cli.rs
//!
//! Command-line options, their validation into a `ChartConfig`, and logger
//! setup.

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::graph::config::{ChartConfig, DEFAULT_GAIN, KeyMode};

#[derive(Parser, Debug)]
#[command(name = "gain_strip", version, about = "Live strip chart of a gain control")]
pub struct Cli {
    /// Logical canvas width
    #[arg(long, default_value_t = 520.0)]
    pub width: f64,

    /// Logical canvas height
    #[arg(long, default_value_t = 180.0)]
    pub height: f64,

    /// Samples kept in the history
    #[arg(long, default_value_t = 90)]
    pub max_points: usize,

    /// Sampling period in milliseconds
    #[arg(long, default_value_t = 125)]
    pub sample_ms: u64,

    /// Redraw period in milliseconds
    #[arg(long, default_value_t = 33)]
    pub frame_ms: u64,

    /// Initial gain committed to the control store
    #[arg(long, default_value_t = DEFAULT_GAIN)]
    pub gain: f64,

    /// How bars are keyed between render passes
    #[arg(long, value_enum, default_value_t = KeyArg::Slot)]
    pub key_by: KeyArg,

    /// Random-walk the gain on its own cadence
    #[arg(long)]
    pub wander: bool,

    /// Write logs to this file (otherwise stderr, filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyArg {
    Slot,
    Sample,
}

impl From<KeyArg> for KeyMode {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Slot => KeyMode::Slot,
            KeyArg::Sample => KeyMode::Sample,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("--max-points must be at least 1")]
    NoHistory,
    #[error("--sample-ms must be at least 1")]
    ZeroSamplePeriod,
    #[error("--frame-ms must be at least 1")]
    ZeroFramePeriod,
    #[error("canvas size {0}x{1} is not finite")]
    BadCanvas(f64, f64),
}

/// Validated runtime settings.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub chart: ChartConfig,
    pub frame_period: Duration,
    pub gain: f64,
    pub wander: bool,
}

impl TryFrom<&Cli> for AppConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.max_points == 0 {
            return Err(ConfigError::NoHistory);
        }
        if cli.sample_ms == 0 {
            return Err(ConfigError::ZeroSamplePeriod);
        }
        if cli.frame_ms == 0 {
            return Err(ConfigError::ZeroFramePeriod);
        }
        if !cli.width.is_finite() || !cli.height.is_finite() {
            return Err(ConfigError::BadCanvas(cli.width, cli.height));
        }
        let chart = ChartConfig {
            key_mode: cli.key_by.into(),
            ..ChartConfig::new(
                cli.width,
                cli.height,
                cli.max_points,
                Duration::from_millis(cli.sample_ms),
            )
        };
        Ok(Self {
            chart,
            frame_period: Duration::from_millis(cli.frame_ms),
            // non-finite values are left for the sampler's fallback
            gain: cli.gain,
            wander: cli.wander,
        })
    }
}

/// Route `log` output. The terminal belongs to the UI, so logging is off
/// unless `RUST_LOG` asks for it or a file is given.
///
/// Fails if the log file cannot be created or a logger is already installed.
pub fn init_logging(log_file: Option<&PathBuf>) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            if std::env::var_os("RUST_LOG").is_none() {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.try_init().map_err(std::io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("gain_strip").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_chart_defaults() {
        let cfg = AppConfig::try_from(&parse(&[])).unwrap();
        let def = ChartConfig::default();
        assert_eq!(cfg.chart.width, def.width);
        assert_eq!(cfg.chart.height, def.height);
        assert_eq!(cfg.chart.max_points, 90);
        assert_eq!(cfg.chart.sample_period, Duration::from_millis(125));
        assert_eq!(cfg.chart.key_mode, KeyMode::Slot);
        assert_eq!(cfg.gain, 1.2);
        assert!(!cfg.wander);
    }

    #[test]
    fn options_override_defaults() {
        let cli = parse(&["--max-points", "3", "--sample-ms", "50", "--key-by", "sample", "--wander"]);
        let cfg = AppConfig::try_from(&cli).unwrap();
        assert_eq!(cfg.chart.max_points, 3);
        assert_eq!(cfg.chart.sample_period, Duration::from_millis(50));
        assert_eq!(cfg.chart.key_mode, KeyMode::Sample);
        assert!(cfg.wander);
    }

    #[test]
    fn rejects_degenerate_settings() {
        let err = AppConfig::try_from(&parse(&["--max-points", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::NoHistory);
        let err = AppConfig::try_from(&parse(&["--sample-ms", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroSamplePeriod);
        let err = AppConfig::try_from(&parse(&["--frame-ms", "0"])).unwrap_err();
        assert_eq!(err.to_string(), "--frame-ms must be at least 1");
    }

    #[test]
    fn non_finite_gain_is_accepted() {
        let cfg = AppConfig::try_from(&parse(&["--gain", "NaN"])).unwrap();
        assert!(cfg.gain.is_nan());
    }

    #[test]
    fn logger_installs_once() {
        assert!(init_logging(None).is_ok());
        assert!(init_logging(None).is_err());
    }
}
