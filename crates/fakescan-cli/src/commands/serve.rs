//! Web server command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use fakescan_web::ServerConfig;
use std::path::PathBuf;

const DEFAULT_LOG_FILE: &str = "fakescan.log";

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long, env = "FAKESCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on [default: 8000]
    #[arg(long, env = "FAKESCAN_PORT")]
    pub port: Option<u16>,

    /// Host to bind to [default: 127.0.0.1]
    #[arg(long, env = "FAKESCAN_HOST")]
    pub host: Option<String>,

    /// Largest accepted request body, in megabytes [default: 512]
    #[arg(long, env = "FAKESCAN_MAX_UPLOAD_MB")]
    pub max_upload_mb: Option<u64>,

    /// Fixed seed for the score perturbation
    #[arg(long, env = "FAKESCAN_SEED")]
    pub seed: Option<u64>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path, used with --log [default: fakescan.log]
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    /// Defaults, then the config file, then flags and environment.
    pub fn resolve_config(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(limit) = self.max_upload_mb {
            config.max_upload_mb = limit;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = args.resolve_config()?;

    println!();
    println!("  {} {}", "fakescan".cyan().bold(), "Analysis Server".bold());
    println!();
    println!(
        "  {}  http://{}/analyze",
        "Endpoint".green(),
        config.bind_addr()
    );
    println!(
        "  {}  {} MB",
        "Max size".green(),
        config.max_upload_mb
    );
    if let Some(seed) = config.seed {
        println!("  {}      {}", "Seed".yellow(), seed);
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    fakescan_web::run_server(config).await?;

    Ok(())
}
