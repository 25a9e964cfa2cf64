use std::time::Duration;

/// Format as `m:ss`. Partial seconds are dropped.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Round to the nearest whole second, halves up.
pub fn round_to_second(d: Duration) -> Duration {
    let mut secs = d.as_secs();
    if d.subsec_millis() >= 500 {
        secs = secs.saturating_add(1);
    }
    Duration::from_secs(secs)
}

/// Progress bar fill in `[0, 100]`. Zero while the duration is unknown.
pub fn progress_percent(position: Duration, duration: Option<Duration>) -> f64 {
    let Some(total) = duration.filter(|d| !d.is_zero()) else {
        return 0.0;
    };
    let pct = position.as_secs_f64() / total.as_secs_f64() * 100.0;
    if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 }
}

/// Map a click `offset` cells into a bar `width` cells wide to a seek fraction.
pub fn seek_fraction(offset: u16, width: u16) -> Option<f64> {
    if width == 0 {
        return None;
    }
    Some((f64::from(offset) / f64::from(width)).clamp(0.0, 1.0))
}
