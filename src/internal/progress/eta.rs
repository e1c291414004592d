//! ETA 文案：按单位表取最大的整单位，数值不为 1 时加复数。

/// 时间单位表，按从大到小排列。
pub const TIME_UNITS: [(&str, u64); 5] = [
    ("year", 31_536_000),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

/// 总大小未知或速度为 0 时的 ETA 文案。
pub const UNKNOWN_ETA_LABEL: &str = "unknown";

/// 下载结束时报告使用的 ETA 文案。
pub const FINISHED_ETA_LABEL: &str = "0s";

/// 把剩余秒数格式化为 `"3 minutes"`、`"1 hour"` 这类文案。
///
/// - 非有限值（`+∞`、`NaN`）返回 [`UNKNOWN_ETA_LABEL`]；
/// - 不足 1 秒时返回 `"0 seconds"`。
pub fn format_eta(eta_seconds: f64) -> String {
    if !eta_seconds.is_finite() {
        return UNKNOWN_ETA_LABEL.to_string();
    }

    for (unit, seconds) in TIME_UNITS {
        let seconds = seconds as f64;
        if eta_seconds >= seconds {
            let value = (eta_seconds / seconds).floor() as u64;
            return pluralize(value, unit);
        }
    }

    pluralize(0, "second")
}

fn pluralize(value: u64, unit: &str) -> String {
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}
