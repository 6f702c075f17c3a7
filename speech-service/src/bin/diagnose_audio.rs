use anyhow::{bail, Context, Result};
use clap::Parser;
use speech_service::diagnostics::{self, Report, Thresholds};
use std::path::PathBuf;

/// Computes signal statistics for every WAV file under a directory.
#[derive(Debug, Parser)]
#[command(name = "diagnose-audio", version, about)]
struct Cli {
    /// Directory to scan recursively
    dir: PathBuf,

    /// Flag files whose share of silent samples exceeds this
    #[arg(long, default_value_t = 0.5)]
    silence_ratio: f64,

    /// Flag files whose share of clipped samples exceeds this
    #[arg(long, default_value_t = 0.001)]
    clipped_ratio: f64,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn print_table(report: &Report) {
    println!(
        "{:<48} {:>7} {:>3} {:>8} {:>7} {:>7} {:>8} {:>8}",
        "file", "rate", "ch", "secs", "rms", "peak", "silence", "clipped"
    );
    for file in &report.files {
        let s = &file.stats;
        let flags = match (file.mostly_silent, file.clipped) {
            (true, true) => "  [silent, clipped]",
            (true, false) => "  [silent]",
            (false, true) => "  [clipped]",
            (false, false) => "",
        };
        println!(
            "{:<48} {:>7} {:>3} {:>8.2} {:>7.4} {:>7.4} {:>7.1}% {:>7.2}%{}",
            file.path.display(),
            s.sample_rate,
            s.channels,
            s.duration_secs,
            s.rms,
            s.peak,
            s.silence_ratio * 100.0,
            s.clipped_ratio * 100.0,
            flags
        );
    }

    for failure in &report.failures {
        println!("{:<48} error: {}", failure.path.display(), failure.error);
    }

    let summary = &report.summary;
    println!();
    println!("files analysed: {}", summary.count);
    println!("files failed:   {}", summary.failed);
    println!("total duration: {:.2}s", summary.total_duration_secs);
    println!("mean duration:  {:.2}s", summary.mean_duration_secs);
    for (rate, count) in &summary.sample_rates {
        println!("  {:>6} Hz: {}", rate, count);
    }
    println!("mostly silent:  {}", summary.mostly_silent);
    println!("clipped:        {}", summary.clipped);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.dir.is_dir() {
        bail!("{} is not a directory", cli.dir.display());
    }

    let report = diagnostics::scan(
        &cli.dir,
        Thresholds {
            silence_ratio: cli.silence_ratio,
            clipped_ratio: cli.clipped_ratio,
        },
    );

    if cli.json {
        let rendered = serde_json::to_string_pretty(&report).context("Failed to render report")?;
        println!("{}", rendered);
    } else {
        print_table(&report);
    }

    Ok(())
}
