// Derived metrics for the dashboard widgets

/// Percent change from the previous window; 0 when there is nothing to compare to
pub fn wow_change(current_total: u64, prev_total: u64) -> f64 {
    if prev_total == 0 {
        return 0.0;
    }
    (current_total as f64 - prev_total as f64) / prev_total as f64 * 100.0
}

/// `count / total * 100` rounded to one decimal, 0.0 for an empty total
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Rounded mean, 0 for no days
pub fn average_per_day(total_points: u64, active_days: usize) -> u64 {
    if active_days == 0 {
        return 0;
    }
    (total_points as f64 / active_days as f64).round() as u64
}

/// Activity counts for the four most recent weeks, newest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyTotals {
    pub weeks: [u64; 4],
}

impl WeeklyTotals {
    /// Split nested cumulative windows (1, 2, 3 weeks and a month) into per-week counts
    pub fn from_windows(week: u64, two_weeks: u64, three_weeks: u64, month: u64) -> Self {
        Self {
            weeks: [
                week,
                two_weeks.saturating_sub(week),
                three_weeks.saturating_sub(two_weeks),
                month.saturating_sub(three_weeks),
            ],
        }
    }

    pub fn total(&self) -> u64 {
        self.weeks.iter().sum()
    }

    pub fn peak(&self) -> u64 {
        self.weeks.iter().copied().max().unwrap_or(0)
    }

    /// Whether week `i` (0 = newest) ties for the peak
    pub fn is_peak(&self, i: usize) -> bool {
        self.weeks.get(i).is_some_and(|&w| w == self.peak())
    }
}
