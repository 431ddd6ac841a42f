//! CLI commands and argument parsing

use crate::config::{ENV_API_KEY, ENV_API_URL, ENV_ENVIRONMENT, ENV_ORG, ENV_USER};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};

/// Command-line client for the CVE ID registration service
#[derive(Parser, Debug)]
#[command(name = "cve")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Your username
    #[arg(short, long, global = true, env = ENV_USER)]
    pub username: Option<String>,

    /// Your CNA organization short name
    #[arg(short, long, global = true, env = ENV_ORG)]
    pub org: Option<String>,

    /// Your API key
    #[arg(short, long, global = true, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Deployment environment to connect to
    #[arg(short, long = "env", global = true, env = ENV_ENVIRONMENT, default_value = "prod")]
    pub environment: String,

    /// Explicit IDR URL, overrides --env
    #[arg(long, global = true, env = ENV_API_URL)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reserve one or more CVE IDs
    Reserve {
        /// Number of CVE IDs to reserve
        #[arg(default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Reserve multiple IDs non-sequentially
        #[arg(short, long)]
        random: bool,

        /// Year to reserve IDs for (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// CNA to reserve IDs on behalf of (defaults to --org)
        #[arg(short = 'c', long)]
        owning_cna: Option<String>,
    },

    /// Show a single CVE ID record
    Show {
        /// CVE ID, e.g. CVE-2024-1234
        cve_id: String,
    },

    /// List CVE IDs owned by your CNA
    List {
        /// Only IDs of this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Only IDs in this state
        #[arg(short, long)]
        state: Option<CveState>,

        /// Only IDs reserved before this time
        #[arg(long, value_parser = parse_datetime)]
        reserved_lt: Option<DateTime<Utc>>,

        /// Only IDs reserved after this time
        #[arg(long, value_parser = parse_datetime)]
        reserved_gt: Option<DateTime<Utc>>,
    },

    /// Show the CVE ID quota of your organization
    Quota,

    /// Check that the service is reachable
    Ping,
}

/// CVE ID state filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CveState {
    /// Reserved but not published
    Reserved,
    /// Published record
    Public,
    /// Rejected ID
    Rejected,
}

impl CveState {
    /// Lower-case name, as typed on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Public => "public",
            Self::Rejected => "rejected",
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (list: one item per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD` as a UTC time
pub fn parse_datetime(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(time.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
        .ok_or_else(|| format!("invalid date/time '{value}', expected e.g. 2024-01-31T12:00:00"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["cve", "-u", "user", "-o", "example", "-a", "key"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_reserve_defaults() {
        let cli = parse(&["reserve"]);
        match cli.command {
            Commands::Reserve {
                count,
                random,
                year,
                owning_cna,
            } => {
                assert_eq!(count, 1);
                assert!(!random);
                assert!(year.is_none());
                assert!(owning_cna.is_none());
            }
            other => panic!("Expected Reserve, got {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_parse_reserve_batch() {
        let cli = parse(&["reserve", "10", "--random", "--year", "2025", "-c", "acme"]);
        assert!(matches!(
            cli.command,
            Commands::Reserve { count: 10, random: true, year: Some(2025), owning_cna: Some(ref c) } if c == "acme"
        ));
    }

    #[test]
    fn test_parse_reserve_zero_rejected() {
        let result = Cli::try_parse_from(["cve", "reserve", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = parse(&[
            "list",
            "--state",
            "reserved",
            "--reserved-gt",
            "2024-01-01",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::List {
                state, reserved_gt, ..
            } => {
                assert_eq!(state, Some(CveState::Reserved));
                assert_eq!(
                    reserved_gt,
                    Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
                );
            }
            other => panic!("Expected List, got {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap();
        assert_eq!(parse_datetime("2024-03-05T10:20:30Z").unwrap(), expected);
        assert_eq!(parse_datetime("2024-03-05T12:20:30+02:00").unwrap(), expected);
        assert_eq!(parse_datetime("2024-03-05T10:20:30").unwrap(), expected);
        assert!(parse_datetime("yesterday").is_err());
    }
}
