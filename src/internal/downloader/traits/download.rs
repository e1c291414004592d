//! 下载相关 trait：进度通知钩子。
//!
//! 下载器在自己的任务上依次调用各钩子，钩子之间、钩子与写盘之间不存在并发。

use async_trait::async_trait;

use crate::internal::downloader::structs::{DownloadError, DownloadSummary};
use crate::internal::progress::structs::ProgressReport;

/// 下载流程钩子：在「进度 / 失败 / 完成后」插入自定义逻辑。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_on_progress_hook` / `with_on_error_hook` / `with_after_complete_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过下载器的 `with_hook` 注册。
///
/// 一次下载中 `on_progress` 会被调用零次或多次，之后恰好有一次终态通知：
/// 成功时是一份百分比为 100 的 `on_progress`，失败时是 `on_error`，两者不会同时出现。
#[async_trait]
pub trait DownloadHook: Send + Sync {
    /// 按节拍收到的进度报告，以及成功时的终态报告。报告不应被保留。
    fn on_progress(&mut self, _report: &ProgressReport) {}

    /// 传输失败时调用一次，之后不会再有进度通知。
    fn on_error(&mut self, _error: &DownloadError) {}

    /// 下载成功、目标已关闭后调用。
    async fn after_complete(&mut self, _summary: &DownloadSummary) {}
}
