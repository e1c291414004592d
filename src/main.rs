use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use progress_dl::downloader::{
    DownloadConfig, StreamingDownloader, DEFAULT_UPDATE_INTERVAL_MS,
};
use progress_dl::render::{RenderFormat, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "progress-dl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download one file over HTTPS with a live progress line", long_about = None)]
struct Cli {
    /// Source URL
    url: String,

    /// Destination file path
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Progress line format
    #[arg(short, long, value_enum, default_value_t = Format::Standard)]
    format: Format,

    /// Progress update interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_UPDATE_INTERVAL_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Allow plain http sources
    #[arg(long)]
    allow_http: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Standard,
    Bar,
    Legacy,
}

impl From<Format> for RenderFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Standard => RenderFormat::Standard,
            Format::Bar => RenderFormat::Bar,
            Format::Legacy => RenderFormat::Legacy,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = DownloadConfig {
        update_interval: Duration::from_millis(cli.interval_ms),
        https_only: !cli.allow_http,
        ..Default::default()
    };

    let downloader = match StreamingDownloader::new(&cli.url) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Download failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = downloader
        .with_config(config)
        .with_hook(TerminalRenderer::stdout(cli.format.into()))
        .save_to(&cli.output)
        .await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Download failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// 日志写到 stderr，避免与进度行混在一起；默认输出 warn 及以上，用 RUST_LOG 调整。
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}
