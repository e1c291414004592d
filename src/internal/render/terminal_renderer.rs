use std::io::Write;

use async_trait::async_trait;
use console::Term;

use super::format::{format_bar, format_standard, COMPLETED_MESSAGE};
use super::RenderFormat;
use crate::internal::downloader::structs::{DownloadError, DownloadSummary};
use crate::internal::downloader::traits::download::DownloadHook;
use crate::internal::progress::structs::ProgressReport;

/// 回到行首并清空整行
const CLEAR_LINE: &str = "\r\x1b[2K";

/// legacy 格式：光标移到第 0 列，写完后清掉行尾残留
const CURSOR_RESET: &str = "\x1b[0G";
const CLEAR_TO_END: &str = "\x1b[K";

/// 终端渲染钩子：每份进度报告覆盖输出到同一行。
///
/// 写终端失败不会中断下载，直接忽略。
pub struct TerminalRenderer<W = Term> {
    format: RenderFormat,
    out: W,
}

impl TerminalRenderer<Term> {
    /// 输出到标准输出。
    pub fn stdout(format: RenderFormat) -> Self {
        Self::new(format, Term::stdout())
    }
}

impl<W> TerminalRenderer<W>
where
    W: Write + Send + Sync,
{
    pub fn new(format: RenderFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn format(&self) -> RenderFormat {
        self.format
    }

    /// 取回底层输出，测试中用于检查写入内容。
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, report: &ProgressReport) -> std::io::Result<()> {
        match self.format {
            RenderFormat::Standard => {
                write!(self.out, "{CLEAR_LINE}{}", format_standard(report))?
            }
            RenderFormat::Bar => {
                write!(self.out, "{CLEAR_LINE}{}", format_bar(report))?
            }
            RenderFormat::Legacy => write!(
                self.out,
                "{CURSOR_RESET}{}{CLEAR_TO_END}",
                format_standard(report)
            )?,
        }
        self.out.flush()
    }

    fn finish(&mut self) -> std::io::Result<()> {
        match self.format {
            RenderFormat::Legacy => writeln!(self.out, "\n{COMPLETED_MESSAGE}")?,
            RenderFormat::Standard | RenderFormat::Bar => writeln!(self.out)?,
        }
        self.out.flush()
    }
}

#[async_trait]
impl<W> DownloadHook for TerminalRenderer<W>
where
    W: Write + Send + Sync,
{
    fn on_progress(&mut self, report: &ProgressReport) {
        let _ = self.draw(report);
    }

    fn on_error(&mut self, _error: &DownloadError) {
        // 结束当前进度行，错误由调用方输出
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }

    async fn after_complete(&mut self, _summary: &DownloadSummary) {
        let _ = self.finish();
    }
}
