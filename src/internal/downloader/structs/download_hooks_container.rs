use crate::internal::downloader::structs::{DownloadError, DownloadSummary};
use crate::internal::downloader::traits::download::DownloadHook;
use crate::internal::progress::structs::ProgressReport;

/// 钩子容器：按注册顺序依次执行多个钩子。
#[derive(Default)]
pub struct DownloadHooksContainer {
    hooks: Vec<Box<dyn DownloadHook>>,
}

impl DownloadHooksContainer {
    /// 添加一个下载钩子；支持多次调用以注册多个钩子。
    pub fn add(&mut self, hook: impl DownloadHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn run_on_progress(&mut self, report: &ProgressReport) {
        for h in self.hooks.iter_mut() {
            h.on_progress(report);
        }
    }

    pub fn run_on_error(&mut self, error: &DownloadError) {
        for h in self.hooks.iter_mut() {
            h.on_error(error);
        }
    }

    pub async fn run_after_complete(&mut self, summary: &DownloadSummary) {
        for h in self.hooks.iter_mut() {
            h.after_complete(summary).await;
        }
    }
}
