//! Local file analysis command.

use anyhow::{Context, Result};
use clap::Args;
use fakescan_core::Upload;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Image or video file to analyze
    pub path: PathBuf,

    /// Content type to declare for the file (e.g. image/png)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Fixed seed for the score perturbation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let data = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let filename = args.path.file_name().and_then(|name| name.to_str());

    let upload = Upload::new(filename, args.content_type.as_deref(), &data);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let result = fakescan_core::analyze_upload(&upload, &mut rng)?;
    tracing::debug!(path = %args.path.display(), verdict = %result.result, "Analyzed local file");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_analysis(filename.unwrap_or_default(), data.len(), &result);
    }

    Ok(())
}
