//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "smartmed")]
#[command(about = "SmartMed inventory dashboard service")]
#[command(version)]
pub struct Config {
    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1", env = "SMARTMED_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SMARTMED_PORT")]
    pub port: u16,

    /// SQLite database file
    #[arg(long, default_value = "smartmed.sqlite", env = "SMARTMED_DATABASE")]
    pub database: PathBuf,

    /// Start new dashboards with the sample inventory
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        env = "SMARTMED_SEED_SAMPLE"
    )]
    pub seed_sample: bool,

    /// Largest accepted CSV upload, in megabytes
    #[arg(long, default_value = "10", env = "SMARTMED_MAX_UPLOAD_MB")]
    pub max_upload_mb: usize,

    /// Open the dashboard in the default browser once the server is up
    #[arg(long, env = "SMARTMED_OPEN_BROWSER")]
    pub open_browser: bool,
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["smartmed"]);
        assert_eq!(config.port, 8080);
        assert!(config.seed_sample);
        assert!(!config.open_browser);
        assert_eq!(config.max_upload_bytes(), 10 * 1024 * 1024);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_seed_sample_can_be_disabled() {
        let config = Config::parse_from(["smartmed", "--seed-sample", "false", "--port", "9000"]);
        assert!(!config.seed_sample);
        assert_eq!(config.port, 9000);
    }
}
