//! Current-time indicator position within the visible hour window.

use std::time::Duration;

use chrono::Timelike;

use crate::layout::LayoutConfig;

/// How often a presentation layer should recompute the indicator.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Minutes from the top of the visible window, or `None` when `now`'s hour is
/// outside `[visible_start_hour, visible_end_hour]`.
///
/// Accepts anything with a wall-clock time: `NaiveTime`, `NaiveDateTime`,
/// `DateTime<Local>`.
pub fn now_offset<T: Timelike>(now: &T, visible_start_hour: u32, visible_end_hour: u32) -> Option<u32> {
    LayoutConfig::with_hours(visible_start_hour, visible_end_hour).offset_of(now)
}

/// The indicator position as a fraction of the visible window height.
pub fn now_fraction<T: Timelike>(now: &T, config: &LayoutConfig) -> Option<f64> {
    config
        .offset_of(now)
        .map(|offset| f64::from(offset) / f64::from(config.visible_minutes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn fraction_at_window_midpoint() {
        let config = LayoutConfig::with_hours(8, 15);
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(now_fraction(&noon, &config), Some(0.5));
    }
}
