//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use fakescan_core::{AnalysisResult, Verdict};

/// Print a single analysis result.
pub fn print_analysis(filename: &str, size_bytes: usize, result: &AnalysisResult) {
    println!();
    println!("{} {}", filename.cyan().bold(), format!("({})", format_size(size_bytes)).dimmed());
    println!();
    println!("{}: {}", "Result".bold(), verdict_colored(result.result));
    println!("{}: {}%", "Confidence".bold(), result.confidence);
    println!();
    println!("{}", "Indicators".bold());
    for (i, indicator) in result.indicators.iter().enumerate() {
        println!("  {}. {}", i + 1, indicator);
    }
    println!();
}

fn verdict_colored(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Suspicious => verdict.as_str().red().bold(),
        Verdict::NeedsReview => verdict.as_str().yellow(),
        Verdict::LikelyAuthentic => verdict.as_str().green(),
    }
}

/// Human-readable byte count.
pub fn format_size(bytes: usize) -> String {
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        format!("{:.1} KB", kb)
    } else {
        format!("{:.2} MB", kb / 1024.0)
    }
}
