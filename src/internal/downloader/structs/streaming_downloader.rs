//! 流式下载器
//!
//! 单连接、单文件的 https 下载：响应体按到达顺序写入调用方给出的目标，
//! 同时按固定节拍（默认 1000ms）发布进度报告。
//!
//! ## 功能特性
//!
//! - **固定节拍进度**：通知频率由定时器决定，与网络分块无关；期间没有新数据时照常通知
//! - **平均速度与 ETA**：速度取自开始以来的平均值，ETA 以最大整单位输出（如 `"1 hour"`）
//! - **总大小未知可降级**：响应没有 `Content-Length` 时百分比为 `None`、ETA 为无穷
//! - **钩子机制**：进度、失败、完成后三个阶段，可传闭包或实现 [`DownloadHook`]
//! - **响应式进度**：通过 `progress()` 获取可监听的最新进度报告
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use progress_dl::downloader::StreamingDownloader;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let file = tokio::fs::File::create("./test.zip").await?;
//! let summary = StreamingDownloader::new("https://example.com/file.zip")?
//!     .with_on_progress_hook(|r| println!("{:?}% ETA {}", r.percentage, r.eta_label))
//!     .send(file)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## 内部实现说明
//!
//! - `transfer` 子模块：与协议无关的传输主循环
//! - `http_client` 子模块：按配置创建 reqwest 客户端

mod http_client;
mod transfer;

use std::path::Path;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use url::Url;

use crate::internal::downloader::traits::download::DownloadHook;
use crate::internal::progress::structs::ProgressReport;
use crate::internal::states::reactive_core::ReactiveProperty;

use super::download_config::DownloadConfig;
use super::download_error::DownloadError;
use super::download_hooks_container::DownloadHooksContainer;
use super::download_summary::DownloadSummary;
use super::hook_adapters::{
    AfterCompleteHookAdapter, OnErrorHookAdapter, OnProgressHookAdapter,
};
use http_client::build_client;

pub use transfer::run_transfer;

/// 流式下载器
///
/// 一个实例对应一次下载，`send` 会消耗自身；进度可通过 `progress()` 返回的句柄在下载期间监听。
pub struct StreamingDownloader {
    pub(crate) source: Url,
    pub(crate) config: DownloadConfig,
    pub(crate) hooks: DownloadHooksContainer,
    pub(crate) progress_state: ReactiveProperty<ProgressReport>,
}

impl StreamingDownloader {
    /// 解析下载地址并创建下载器，配置取默认值。
    pub fn new(source: &str) -> Result<Self, DownloadError> {
        Ok(Self::from_url(Url::parse(source)?))
    }

    pub fn from_url(source: Url) -> Self {
        Self {
            source,
            config: DownloadConfig::default(),
            hooks: Default::default(),
            progress_state: ReactiveProperty::new(ProgressReport::default()),
        }
    }

    /// 下载地址
    pub fn source(&self) -> &Url {
        &self.source
    }

    /// 整体替换配置。
    pub fn with_config(mut self, config: DownloadConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置进度通知间隔；为 0 时 `send` 返回 [`DownloadError::InvalidUpdateInterval`]。
    pub fn update_interval(mut self, interval: Duration) -> Self {
        self.config.update_interval = interval;
        self
    }

    /// 是否只允许 https 源，默认 `true`。
    pub fn https_only(mut self, enabled: bool) -> Self {
        self.config.https_only = enabled;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// 注册「进度」钩子；按节拍调用，成功结束时再收到一份百分比为 100 的终态报告。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&ProgressReport) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    /// 注册「失败」钩子；传输失败时调用一次。
    pub fn with_on_error_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&DownloadError) + Send + Sync + 'static,
    {
        self.hooks.add(OnErrorHookAdapter(f));
        self
    }

    /// 注册「完成后」钩子；下载成功结束后调用。
    pub fn with_after_complete_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut(DownloadSummary) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(AfterCompleteHookAdapter(f));
        self
    }

    /// 添加完整钩子；可多次调用，按注册顺序执行。
    pub fn with_hook(mut self, hook: impl DownloadHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 内置的进度状态；返回可共享句柄，`.watch()` 后 `changed().await` 监听每次发布的报告。
    pub fn progress(&self) -> ReactiveProperty<ProgressReport> {
        self.progress_state.clone()
    }

    /// 执行下载，写入调用方已打开的目标。目标在任何退出路径上都会被关闭。
    pub async fn send<W>(self, sink: W) -> Result<DownloadSummary, DownloadError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let Self {
            source,
            config,
            mut hooks,
            progress_state,
        } = self;

        let resp = match request(&source, &config).await {
            Ok(resp) => resp,
            Err(err) => return Err(abort(sink, &mut hooks, err).await),
        };

        let total = resp.content_length();
        debug!(url = %source, status = %resp.status(), ?total, "收到响应头");

        run_transfer(
            resp.bytes_stream(),
            total,
            sink,
            &mut hooks,
            config.update_interval,
            &progress_state,
        )
        .await
    }

    /// 创建（覆盖）本地文件后下载到该文件。
    pub async fn save_to(
        mut self,
        path: impl AsRef<Path>,
    ) -> Result<DownloadSummary, DownloadError> {
        let file = match File::create(path.as_ref()).await {
            Ok(f) => f,
            Err(e) => {
                let err = DownloadError::CreateFile(e);
                self.hooks.run_on_error(&err);
                return Err(err);
            }
        };
        self.send(file).await
    }
}

/// 发起 GET 请求；非成功状态码视为失败，不读取响应体。
async fn request(
    source: &Url,
    config: &DownloadConfig,
) -> Result<reqwest::Response, DownloadError> {
    if config.update_interval.is_zero() {
        return Err(DownloadError::InvalidUpdateInterval);
    }

    let client = build_client(config)?;
    debug!(url = %source, "发起请求");
    let resp = client.get(source.clone()).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(DownloadError::HttpStatus(status));
    }
    Ok(resp)
}

/// 传输开始前失败：关闭目标、通知钩子，返回原错误。
async fn abort<W>(
    mut sink: W,
    hooks: &mut DownloadHooksContainer,
    err: DownloadError,
) -> DownloadError
where
    W: AsyncWrite + Unpin,
{
    warn!(error = %err, "下载失败");
    let _ = sink.shutdown().await;
    hooks.run_on_error(&err);
    err
}

/// 一次性下载：`source` 写入 `destination`，每份进度报告交给 `on_progress`。
pub async fn download<W, F>(
    source: &str,
    destination: W,
    on_progress: F,
    config: DownloadConfig,
) -> Result<DownloadSummary, DownloadError>
where
    W: AsyncWrite + Unpin + Send,
    F: FnMut(&ProgressReport) + Send + Sync + 'static,
{
    let downloader = match StreamingDownloader::new(source) {
        Ok(d) => d,
        Err(err) => {
            let mut destination = destination;
            let _ = destination.shutdown().await;
            return Err(err);
        }
    };

    downloader
        .with_config(config)
        .with_on_progress_hook(on_progress)
        .send(destination)
        .await
}
