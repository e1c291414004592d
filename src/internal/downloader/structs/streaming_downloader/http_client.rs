use reqwest::Client;

use crate::internal::downloader::structs::{DownloadConfig, DownloadError};

/// 按下载配置创建 http 客户端。
///
/// 不开启任何内容编码，保证 `Content-Length` 与写入目标的字节数一致。
pub(super) fn build_client(
    config: &DownloadConfig,
) -> Result<Client, DownloadError> {
    let client = Client::builder()
        .https_only(config.https_only)
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}
