use crate::filter::Filter;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://en.dhv-xc.de/api/fli/flights";

/// Day format expected by the API, e.g. `08.06.2022`.
const DAY_FORMAT: &str = "%d.%m.%Y";

/// Refresh waits are stretched by this factor.
const INTERVAL_FACTOR: f64 = 1.15;

#[derive(Parser, Debug)]
#[command(name = "xcrank", version)]
#[command(about = "Rank today's DHV-XC paragliding flights by XC points", long_about = None)]
pub struct Args {
    /// Date selection, e.g. 08.06.2022 (default: today)
    #[arg(short, long, value_parser = parse_day)]
    pub day: Option<String>,

    /// Refresh interval in seconds (0 = run once)
    #[arg(short, long, default_value_t = 0)]
    pub interval: u64,

    /// Limit to X results (0 = unlimited)
    #[arg(short, long, default_value_t = 0)]
    pub limit: usize,

    /// Only show flights with more than X XC points
    #[arg(short, long, default_value_t = 0.0, value_parser = parse_points)]
    pub points: f64,

    /// Don't display colors, ascii only output
    #[arg(short, long)]
    pub ascii: bool,

    /// Filter by takeoff: takeoff must include string
    #[arg(short = 'f', long, default_value = "")]
    pub takeoff: String,

    /// Hide the flight ID column
    #[arg(long)]
    pub no_flight_id: bool,

    /// Flights endpoint
    #[arg(long, env = "DHV_XC_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Validate a `DD.MM.YYYY` day and normalise it to zero-padded form.
fn parse_day(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s, DAY_FORMAT)
        .map(|d| d.format(DAY_FORMAT).to_string())
        .map_err(|e| format!("expected DD.MM.YYYY ({})", e))
}

fn parse_points(s: &str) -> Result<f64, String> {
    let points: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if !points.is_finite() || points < 0.0 {
        return Err("must be a non-negative number".into());
    }
    Ok(points)
}

/// Immutable settings for a whole run.
#[derive(Debug, Clone)]
pub struct Config {
    pub day: String,
    pub interval_secs: u64,
    pub filter: Filter,
    pub color: bool,
    pub flight_id: bool,
    pub api_url: String,
    pub verbosity: u8,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Self {
            day: args.day.unwrap_or_else(today),
            interval_secs: args.interval,
            filter: Filter {
                min_points: args.points,
                takeoff: args.takeoff,
                limit: args.limit,
            },
            color: !args.ascii,
            flight_id: !args.no_flight_id,
            api_url: args.api_url,
            verbosity: args.verbose,
        }
    }

    /// Full request URL for the configured day.
    pub fn flights_url(&self) -> String {
        format!("{}?d={}", self.api_url, self.day)
    }

    /// Pause between refresh cycles, or `None` when running once.
    pub fn sleep_interval(&self) -> Option<Duration> {
        (self.interval_secs > 0)
            .then(|| Duration::from_secs_f64(INTERVAL_FACTOR * self.interval_secs as f64))
    }
}

fn today() -> String {
    Local::now().format(DAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> Config {
        let mut full = vec!["xcrank"];
        full.extend_from_slice(argv);
        Config::from_args(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.day, today());
        assert_eq!(cfg.interval_secs, 0);
        assert_eq!(cfg.filter.limit, 0);
        assert_eq!(cfg.filter.min_points, 0.0);
        assert_eq!(cfg.filter.takeoff, "");
        assert!(cfg.color);
        assert!(cfg.flight_id);
        assert!(cfg.sleep_interval().is_none());
    }

    #[test]
    fn test_short_flags() {
        let cfg = config(&[
            "-d", "08.06.2022", "-i", "60", "-l", "10", "-p", "50.5", "-a", "-f", "Brauneck",
        ]);
        assert_eq!(cfg.day, "08.06.2022");
        assert_eq!(cfg.interval_secs, 60);
        assert_eq!(cfg.filter.limit, 10);
        assert_eq!(cfg.filter.min_points, 50.5);
        assert_eq!(cfg.filter.takeoff, "Brauneck");
        assert!(!cfg.color);
    }

    #[test]
    fn test_long_flags() {
        let cfg = config(&[
            "--day=1.6.2024",
            "--interval=5",
            "--limit=3",
            "--points=100",
            "--ascii",
            "--takeoff=Tegelberg",
            "--no-flight-id",
            "--api-url=http://localhost:8080/flights",
            "-vv",
        ]);
        assert_eq!(cfg.day, "01.06.2024");
        assert_eq!(cfg.filter.limit, 3);
        assert!(!cfg.flight_id);
        assert_eq!(cfg.verbosity, 2);
        assert_eq!(cfg.flights_url(), "http://localhost:8080/flights?d=01.06.2024");
    }

    #[test]
    fn test_flights_url() {
        let cfg = config(&["-d", "08.06.2022", "--api-url", DEFAULT_API_URL]);
        assert_eq!(cfg.flights_url(), "https://en.dhv-xc.de/api/fli/flights?d=08.06.2022");
    }

    #[test]
    fn test_sleep_interval_is_stretched() {
        let pause = config(&["-i", "10"]).sleep_interval().unwrap();
        assert!((pause.as_secs_f64() - 11.5).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for argv in [
            vec!["xcrank", "-d", "2022-06-08"],
            vec!["xcrank", "-d", "31.02.2022"],
            vec!["xcrank", "-i", "-1"],
            vec!["xcrank", "-l", "ten"],
            vec!["xcrank", "-l", "-3"],
            vec!["xcrank", "-p", "-5"],
            vec!["xcrank", "-p", "NaN"],
            vec!["xcrank", "--bogus"],
        ] {
            assert!(Args::try_parse_from(argv.clone()).is_err(), "accepted {:?}", argv);
        }
    }

    #[test]
    fn test_help_is_not_a_usage_error() {
        let err = Args::try_parse_from(["xcrank", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
