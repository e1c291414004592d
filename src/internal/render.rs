//! 终端渲染：进度报告的三种单行格式，以及把它们写到终端的钩子。
//!
//! 格式化函数是纯函数，便于测试；[`TerminalRenderer`] 负责覆盖式输出。

pub mod format;
pub mod terminal_renderer;

pub use format::{
    format_bar, format_standard, render_bar_glyphs, BAR_WIDTH,
    COMPLETED_MESSAGE,
};
pub use terminal_renderer::TerminalRenderer;

/// 渲染格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// `Downloading: 42.00% | Speed: 1.50 MB/s | ETA: 3 minutes`
    #[default]
    Standard,
    /// 50 格双色进度条 + 已下载/总 MB
    Bar,
    /// ANSI 光标复位 + 标准行，结束时输出 `Download completed!`
    Legacy,
}
