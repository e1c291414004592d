//! 下载器领域模块：单连接、单文件的流式下载，按固定节拍发布进度。
//!
//! 使用方式：`StreamingDownloader::new(url)?.with_on_progress_hook(f).send(sink).await`
//! 对外导出以 [`crate::downloader`] 为准，此处仅做模块划分。

pub mod structs;
pub mod traits;
