use crate::internal::progress::eta::{FINISHED_ETA_LABEL, UNKNOWN_ETA_LABEL};

/// 渲染时 1 MB 对应的字节数（按 1024 × 1024 计）。
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// 进度报告：每次通知时新建，以引用交给回调，回调不应保留。
///
/// 总大小未知时 `percentage` 为 `None`、`eta_seconds` 为 `f64::INFINITY`，不会出现 `NaN`。
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// 进度百分比（0～100），总大小未知时为 `None`
    pub percentage: Option<f64>,
    /// 自开始以来的平均速度（字节/秒）
    pub speed_bytes_per_second: f64,
    /// 人类可读的剩余时间，例如 `"3 minutes"`
    pub eta_label: String,
    /// 剩余秒数，可能为 `f64::INFINITY`
    pub eta_seconds: f64,
    /// 已传输字节数
    pub bytes_transferred: u64,
    /// 总字节数，未知时为 `None`
    pub total_bytes: Option<u64>,
}

impl Default for ProgressReport {
    fn default() -> Self {
        Self {
            percentage: None,
            speed_bytes_per_second: 0.0,
            eta_label: UNKNOWN_ETA_LABEL.to_string(),
            eta_seconds: f64::INFINITY,
            bytes_transferred: 0,
            total_bytes: None,
        }
    }
}

impl ProgressReport {
    /// 传输成功结束时的终态报告：百分比固定为 100，速度与 ETA 归零。
    ///
    /// 声明的总大小缺失时以最终字节数补齐。
    pub fn finished(bytes_transferred: u64, total_bytes: Option<u64>) -> Self {
        Self {
            percentage: Some(100.0),
            speed_bytes_per_second: 0.0,
            eta_label: FINISHED_ETA_LABEL.to_string(),
            eta_seconds: 0.0,
            bytes_transferred,
            total_bytes: Some(total_bytes.unwrap_or(bytes_transferred)),
        }
    }

    /// 速度（MB/s）
    pub fn speed_mbs(&self) -> f64 {
        self.speed_bytes_per_second / BYTES_PER_MB
    }

    /// 已下载的整 MB 数
    pub fn downloaded_mb(&self) -> u64 {
        (self.bytes_transferred as f64 / BYTES_PER_MB) as u64
    }

    /// 总大小的整 MB 数，未知时为 `None`
    pub fn total_mb(&self) -> Option<u64> {
        self.total_bytes.map(|t| (t as f64 / BYTES_PER_MB) as u64)
    }
}
