use console::style;

use crate::internal::progress::structs::ProgressReport;

/// 进度条格数
pub const BAR_WIDTH: usize = 50;

/// 进度条使用的字形
const BAR_GLYPH: &str = "━";

/// legacy 格式下载结束时的提示
pub const COMPLETED_MESSAGE: &str = "Download completed!";

/// 未知数值的占位文本
const UNKNOWN: &str = "--";

/// 标准格式：`Downloading: {pct}% | Speed: {mbs} MB/s | ETA: {label}`。
pub fn format_standard(report: &ProgressReport) -> String {
    format!(
        "Downloading: {}% | Speed: {:.2} MB/s | ETA: {}",
        format_percentage(report.percentage),
        report.speed_mbs(),
        report.eta_label
    )
}

/// 进度条格式：`Downloading... {bar} {dl}/{total} MB | Speed: ... | ETA: ...`。
pub fn format_bar(report: &ProgressReport) -> String {
    let total_mb = match report.total_mb() {
        Some(t) => t.to_string(),
        None => "?".to_string(),
    };
    format!(
        "Downloading... {} {}/{} MB | Speed: {:.2} MB/s | ETA: {}",
        render_bar_glyphs(report.percentage),
        report.downloaded_mb(),
        total_mb,
        report.speed_mbs(),
        report.eta_label
    )
}

/// 50 格进度条：已完成部分绿色，剩余部分红色；百分比未知时整条为剩余。
pub fn render_bar_glyphs(percentage: Option<f64>) -> String {
    let completed = completed_cells(percentage);
    let remaining = BAR_WIDTH - completed;
    format!(
        "{}{}",
        style(BAR_GLYPH.repeat(completed)).green(),
        style(BAR_GLYPH.repeat(remaining)).red()
    )
}

fn completed_cells(percentage: Option<f64>) -> usize {
    match percentage {
        Some(pct) if pct.is_finite() => {
            let cells = (pct.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64)
                .round() as usize;
            cells.min(BAR_WIDTH)
        }
        _ => 0,
    }
}

fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(pct) if pct.is_finite() => format!("{pct:.2}"),
        _ => UNKNOWN.to_string(),
    }
}
