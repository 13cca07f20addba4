//! Shared formatting utilities for the WorldMetrics views.

/// Format a numeric value for display with appropriate scale suffix.
///
/// - Values >= 1T display as "X.XT", >= 1B as "X.XB", >= 1M as "X.XM", >= 1K as "X.XK"
/// - Integer values display without decimal places
/// - Other values display with 2 decimal places
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.1}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a year range as shown next to the range controls.
pub fn format_year_range((start, end): (i32, i32)) -> String {
    format!("Years: {} \u{2013} {}", start, end)
}

/// Evenly spaced integer ticks across `[start, end]`, at most `max_ticks` of them.
pub fn year_ticks(start: i32, end: i32, max_ticks: usize) -> Vec<i32> {
    if end <= start || max_ticks < 2 {
        return vec![start];
    }

    let span = (end - start) as usize;
    let step = span.div_ceil(max_ticks - 1).max(1);
    let mut ticks: Vec<i32> = (start..=end).step_by(step).collect();
    if ticks.last() != Some(&end) {
        ticks.push(end);
    }
    ticks
}
