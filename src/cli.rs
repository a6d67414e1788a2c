// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Two subcommands:
// - batch: read a JSON array of link-check requests from a file (or stdin)
// - field: check the URLs given on the command line for one field
//
// The check options (timeouts, redirect cap, concurrency ceiling, deadline)
// are global, so they go before or after the subcommand alike.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use metis_linkcheck::config::{
    CheckConfig, DEFAULT_MAX_CONCURRENT_CHECKS, DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT,
};
use metis_linkcheck::logging::{LogFormat, LogLevel};
use metis_linkcheck::FieldName;

#[derive(Parser, Debug)]
#[command(
    name = "metis-linkcheck",
    version,
    about = "Checks that the web resources referenced by metadata fields are reachable",
    long_about = "metis-linkcheck checks every URL of every field concurrently, under a global \
                  connection ceiling, and reports per field how many URLs succeeded and failed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub check: CheckOptions,

    /// Log verbosity (RUST_LOG is honored too, this flag wins)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a batch of requests read from a JSON file
    ///
    /// Example: metis-linkcheck batch requests.json --json
    ///
    /// The file holds an array like
    /// [{"fieldName": "IS_SHOWN_BY", "urls": ["https://a.example/1.jpg"]}]
    Batch {
        /// Path to the JSON file, or '-' for stdin
        file: PathBuf,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check URLs of a single field given on the command line
    ///
    /// Example: metis-linkcheck field is-shown-by https://a.example/1.jpg
    Field {
        /// IS_SHOWN_BY, IS_SHOWN_AT, OBJECT or HAS_VIEW (case-insensitive)
        field: FieldName,

        /// URLs to check
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CheckOptions {
    /// Redirect hops to follow before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS, global = true)]
    pub max_redirects: usize,

    /// Connect timeout per request, in milliseconds
    #[arg(long, default_value_t = 10_000, global = true)]
    pub connect_timeout_ms: u64,

    /// Response timeout per request, in milliseconds
    #[arg(long, default_value_t = 10_000, global = true)]
    pub read_timeout_ms: u64,

    /// Maximum number of URLs checked at the same time
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_CHECKS, global = true)]
    pub max_concurrent: usize,

    /// Give up on the whole batch after this many milliseconds
    #[arg(long, global = true)]
    pub batch_deadline_ms: Option<u64>,

    /// User-Agent header sent with every check request
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,
}

impl From<&CheckOptions> for CheckConfig {
    fn from(options: &CheckOptions) -> Self {
        CheckConfig {
            user_agent: options.user_agent.clone(),
            ..CheckConfig::from_millis(
                options.max_redirects,
                options.connect_timeout_ms,
                options.read_timeout_ms,
                options.max_concurrent,
                options.batch_deadline_ms,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_command() {
        let cli = Cli::try_parse_from([
            "metis-linkcheck",
            "field",
            "is-shown-by",
            "http://a.test",
            "http://b.test",
            "--max-concurrent",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Field { field, urls, json } => {
                assert_eq!(field, FieldName::IsShownBy);
                assert_eq!(urls.len(), 2);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.check.max_concurrent, 3);
    }

    #[test]
    fn test_options_become_config() {
        let cli = Cli::try_parse_from([
            "metis-linkcheck",
            "--max-redirects",
            "0",
            "--batch-deadline-ms",
            "5000",
            "batch",
            "requests.json",
            "--json",
        ])
        .unwrap();

        let config = CheckConfig::from(&cli.check);
        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.batch_deadline, Some(std::time::Duration::from_secs(5)));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_field_requires_urls() {
        assert!(Cli::try_parse_from(["metis-linkcheck", "field", "object"]).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Cli::try_parse_from(["metis-linkcheck", "field", "creator", "http://a.test"]).is_err());
    }
}
