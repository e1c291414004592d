pub mod download_config;
pub mod download_error;
pub mod download_hooks_container;
pub mod download_summary;
pub(crate) mod hook_adapters;
pub mod streaming_downloader;

// 重导出公共类型
pub use download_config::{DownloadConfig, DEFAULT_UPDATE_INTERVAL_MS};
pub use download_error::DownloadError;
pub use download_hooks_container::DownloadHooksContainer;
pub use download_summary::DownloadSummary;
pub use streaming_downloader::StreamingDownloader;
