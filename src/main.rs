mod dom;
mod export;
mod images;
mod parser;
mod schema;
mod text;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;

use export::{ExportConfig, JsonFormatter};
use images::{ImageQueue, NoImages};

#[derive(Parser)]
#[command(name = "meh", about = "Convert a Medium export archive into JSON")]
struct Cli {
    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an unpacked export directory
    Convert {
        /// Path to the uncompressed export
        #[arg(long = "in", value_name = "DIR")]
        input: PathBuf,
        /// Output directory
        #[arg(long = "out", value_name = "DIR")]
        output: PathBuf,
        /// Also download post images from the Medium CDN
        #[arg(long)]
        with_images: bool,
        /// Max parallel image downloads
        #[arg(long, default_value = "8")]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    let t0 = Instant::now();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            with_images,
            concurrency,
        } => {
            let config = ExportConfig {
                input,
                output,
                with_images,
                concurrency,
            };
            run_convert(config).await
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }

    result
}

async fn run_convert(config: ExportConfig) -> anyhow::Result<()> {
    if !config.input.is_dir() {
        bail!("{} is not a directory", config.input.display());
    }

    let formatter = JsonFormatter::new(&config.output);
    info!(
        "Converting {} into {}",
        config.input.display(),
        config.output.display()
    );

    let stats = if config.with_images {
        let queue = ImageQueue::default();
        let stats = tokio::task::block_in_place(|| export::convert(&config, &formatter, &queue))?;
        let ids = queue.into_ids();
        info!("Fetching {} images...", ids.len());
        let fetched = images::fetch_images(ids, &config.output, config.concurrency).await?;
        info!(
            "Downloaded {} images ({} ok, {} errors)",
            fetched.total, fetched.ok, fetched.errors
        );
        stats
    } else {
        tokio::task::block_in_place(|| export::convert(&config, &formatter, &NoImages))?
    };

    info!(
        "Converted {} categories ({} files parsed, {} skipped)",
        stats.categories, stats.parsed, stats.failed
    );
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn convert_flags() {
        let cli = Cli::try_parse_from([
            "meh", "convert", "--in", "export", "--out", "json", "--with-images", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Convert {
            input,
            output,
            with_images,
            concurrency,
        } = cli.command;
        assert_eq!(input, PathBuf::from("export"));
        assert_eq!(output, PathBuf::from("json"));
        assert!(with_images);
        assert_eq!(concurrency, 8);
    }
}
