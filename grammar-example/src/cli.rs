//! Shared plumbing for the binaries.

use common_framework::{ConfigError, ScanConfig};
use tracing_subscriber::EnvFilter;

/// Logs to stderr. `RUST_LOG` overrides the default `warn` level.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }
}

/// Command line split into `--config <file>` and positional arguments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<String>,
    pub positional: Vec<String>,
}

impl CliArgs {
    /// Parses `args` without the program name.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = CliArgs::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("Missing value for --config".to_string());
                    }
                    parsed.config = Some(args[i].clone());
                }
                other => parsed.positional.push(other.to_string()),
            }
            i += 1;
        }
        Ok(parsed)
    }

    /// The configured limits, or the defaults without `--config`.
    pub fn scan_config(&self) -> Result<ScanConfig, ConfigError> {
        match &self.config {
            Some(path) => ScanConfig::from_file(path),
            None => Ok(ScanConfig::default()),
        }
    }
}
