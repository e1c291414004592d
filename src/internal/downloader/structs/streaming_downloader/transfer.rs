//! 传输主循环：把字节流按序写入目标，并按固定节拍发布进度。
//!
//! 数据到达与节拍触发是同一个 `select!` 循环的两个分支，计数器只是局部变量，
//! 读写天然串行，不需要锁或原子量。

use std::time::Duration;

use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::internal::downloader::structs::{
    DownloadError, DownloadHooksContainer, DownloadSummary,
};
use crate::internal::progress::structs::{ProgressReport, TransferSnapshot};
use crate::internal::states::reactive_core::ReactiveProperty;

/// 传输核心：与具体协议无关，只要求一个字节块流和一个可写目标。
///
/// - `total_bytes` 为 `None` 时百分比与 ETA 均为未知；
/// - 每隔 `update_interval` 通知一次，与数据块大小、到达频率无关；
/// - 成功时刷新并关闭目标，发布一份百分比为 100 的终态报告；
/// - 失败时停止节拍、关闭目标（已写入的部分保留）、通知 `on_error` 后返回错误，不重试。
///
/// 目标的所有权交给本函数，任何退出路径上都只关闭一次。
///
/// 字节流的错误类型需要能转换成 [`DownloadError`]：reqwest 的错误自动转为
/// `Transport`，其他来源（如 `io::Error`）可用 [`DownloadError::stream`] 映射，
/// 例如 `stream.map_err(DownloadError::stream)`。
pub async fn run_transfer<S, B, E, W>(
    stream: S,
    total_bytes: Option<u64>,
    mut sink: W,
    hooks: &mut DownloadHooksContainer,
    update_interval: Duration,
    progress: &ReactiveProperty<ProgressReport>,
) -> Result<DownloadSummary, DownloadError>
where
    S: Stream<Item = Result<B, E>> + Send,
    B: AsRef<[u8]> + Send,
    E: Into<DownloadError> + Send,
    W: AsyncWrite + Unpin + Send,
{
    if update_interval.is_zero() {
        let err = DownloadError::InvalidUpdateInterval;
        let _ = sink.shutdown().await;
        hooks.run_on_error(&err);
        return Err(err);
    }

    let mut stream = Box::pin(stream);
    let start = Instant::now();
    let mut ticker = time::interval_at(start + update_interval, update_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut bytes_transferred: u64 = 0;

    progress.update(
        TransferSnapshot::new(0, total_bytes, Duration::ZERO).report(),
    );

    let outcome = loop {
        tokio::select! {
            biased;

            _ = ticker.tick() => {
                let snapshot = TransferSnapshot::new(
                    bytes_transferred,
                    total_bytes,
                    start.elapsed(),
                );
                let report = snapshot.report();
                trace!(
                    bytes = report.bytes_transferred,
                    total = ?report.total_bytes,
                    speed = report.speed_bytes_per_second,
                    "进度"
                );
                hooks.run_on_progress(&report);
                progress.update(report);
            }
            next = stream.next() => match next {
                Some(Ok(chunk)) => {
                    let chunk = chunk.as_ref();
                    if let Err(e) = sink.write_all(chunk).await {
                        break Err(DownloadError::SinkWrite(e));
                    }
                    bytes_transferred += chunk.len() as u64;
                }
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            },
        }
    };

    // 先停节拍、释放响应流，再处理目标
    drop(ticker);
    drop(stream);
    let elapsed = start.elapsed();

    if let Err(err) = outcome {
        warn!(bytes = bytes_transferred, error = %err, "下载失败");
        let _ = sink.shutdown().await;
        hooks.run_on_error(&err);
        return Err(err);
    }

    if let Err(e) = close_sink(&mut sink).await {
        let err = DownloadError::SinkWrite(e);
        warn!(error = %err, "关闭目标失败");
        hooks.run_on_error(&err);
        return Err(err);
    }

    let report = ProgressReport::finished(bytes_transferred, total_bytes);
    hooks.run_on_progress(&report);
    progress.update(report);

    let summary = DownloadSummary {
        bytes_transferred,
        total_bytes,
        elapsed,
    };
    info!(
        bytes = summary.bytes_transferred,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "下载完成"
    );
    debug!(hooks = hooks.len(), "执行完成钩子");
    hooks.run_after_complete(&summary).await;

    Ok(summary)
}

/// 刷新失败也要关闭目标，返回先出现的错误。
async fn close_sink<W>(sink: &mut W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let flushed = sink.flush().await;
    let closed = sink.shutdown().await;
    flushed.and(closed)
}
