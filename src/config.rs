//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "voyageflow")]
#[command(about = "A state-managed HTTP service for multi-step trip booking")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory for saved booking state (defaults to the platform data dir)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Keep state in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory the file storage lives in
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("voyageflow")
        })
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["voyageflow"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(!config.ephemeral);
        assert!(config.storage_dir().ends_with("voyageflow"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "voyageflow",
            "--port",
            "8080",
            "--data-dir",
            "/tmp/trips",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/trips"));
        assert_eq!(config.log_level(), "debug");
    }
}
