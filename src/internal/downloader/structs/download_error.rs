//! 下载相关错误类型。

use thiserror::Error;

/// 非 reqwest 字节流在传输中途返回的错误。
pub type StreamError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("下载地址无效: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("进度通知间隔必须大于 0")]
    InvalidUpdateInterval,

    /// DNS、连接、TLS 失败，或传输中途断开。
    #[error("HTTP 请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 传输中途字节流出错。
    #[error("读取数据流失败: {0}")]
    Stream(StreamError),

    #[error("服务器返回非成功状态码: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    /// 写入、刷新或关闭目标失败。
    #[error("写入目标失败: {0}")]
    SinkWrite(std::io::Error),
}

impl DownloadError {
    /// 把任意字节流错误包装成 [`DownloadError::Stream`]。
    pub fn stream(err: impl Into<StreamError>) -> Self {
        Self::Stream(err.into())
    }
}
