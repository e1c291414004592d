use std::time::Duration;

use super::progress_report::ProgressReport;
use crate::internal::progress::eta::format_eta;

/// 某一时刻的传输计数器快照，用于推导一份 [`ProgressReport`]。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferSnapshot {
    /// 已写入目标的字节数
    pub bytes_transferred: u64,
    /// 总大小（字节），响应未携带 `Content-Length` 时为 `None`
    pub total_bytes: Option<u64>,
    /// 自收到响应头起经过的时间
    pub elapsed: Duration,
}

impl TransferSnapshot {
    pub fn new(
        bytes_transferred: u64,
        total_bytes: Option<u64>,
        elapsed: Duration,
    ) -> Self {
        Self { bytes_transferred, total_bytes, elapsed }
    }

    /// 进度百分比（0～100）；总大小未知时为 `None`，总大小为 0 时视为已完成。
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_transferred as f64 / total as f64 * 100.0)
                    .min(100.0)
            }
        })
    }

    /// 自开始以来的平均速度（字节/秒）；经过时间为 0 时为 0。
    pub fn speed_bytes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_transferred as f64 / secs
        } else {
            0.0
        }
    }

    /// 剩余秒数；总大小未知或速度为 0 时为 `f64::INFINITY`。
    pub fn eta_seconds(&self) -> f64 {
        let speed = self.speed_bytes_per_second();
        match self.total_bytes {
            Some(total) if speed > 0.0 => {
                total.saturating_sub(self.bytes_transferred) as f64 / speed
            }
            _ => f64::INFINITY,
        }
    }

    /// 由快照生成进度报告。
    pub fn report(&self) -> ProgressReport {
        let eta_seconds = self.eta_seconds();
        ProgressReport {
            percentage: self.percentage(),
            speed_bytes_per_second: self.speed_bytes_per_second(),
            eta_label: format_eta(eta_seconds),
            eta_seconds,
            bytes_transferred: self.bytes_transferred,
            total_bytes: self.total_bytes,
        }
    }
}
