use std::time::Duration;

/// 一次成功下载的结果。
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSummary {
    /// 实际写入的字节数
    pub bytes_transferred: u64,
    /// 响应声明的总大小，未声明时为 `None`
    pub total_bytes: Option<u64>,
    /// 自收到响应头到传输结束经过的时间
    pub elapsed: Duration,
}
