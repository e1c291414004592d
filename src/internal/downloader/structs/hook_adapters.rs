//! 单阶段钩子适配器：将闭包包装成 [`DownloadHook`]，供 `with_xx_hook` 使用。

use std::future::Future;

use async_trait::async_trait;

use crate::internal::downloader::structs::{DownloadError, DownloadSummary};
use crate::internal::downloader::traits::download::DownloadHook;
use crate::internal::progress::structs::ProgressReport;

/// 仅实现「进度」的钩子适配器。
pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnProgressHookAdapter<F>
where
    F: FnMut(&ProgressReport) + Send + Sync + 'static,
{
    fn on_progress(&mut self, report: &ProgressReport) {
        (self.0)(report);
    }
}

/// 仅实现「失败」的钩子适配器。
pub(crate) struct OnErrorHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnErrorHookAdapter<F>
where
    F: FnMut(&DownloadError) + Send + Sync + 'static,
{
    fn on_error(&mut self, error: &DownloadError) {
        (self.0)(error);
    }
}

/// 仅实现「完成后」的钩子适配器；闭包拿到的是结果的副本。
pub(crate) struct AfterCompleteHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> DownloadHook for AfterCompleteHookAdapter<F>
where
    F: FnMut(DownloadSummary) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn after_complete(&mut self, summary: &DownloadSummary) {
        (self.0)(summary.clone()).await
    }
}
