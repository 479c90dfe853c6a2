// Streak calculation from a contributor's daily activity

use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

use crate::models::entry::DailyActivity;

/// Result of streak calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakResult {
    pub current: u32,
    pub longest: u32,
}

/// Distinct active days; source order and duplicates don't matter
fn active_days(daily: &[DailyActivity]) -> BTreeSet<NaiveDate> {
    daily.iter().map(|d| d.date).collect()
}

/// Consecutive active days ending today or yesterday.
/// 0 when neither today nor yesterday had activity.
pub fn current_streak(daily: &[DailyActivity], today: NaiveDate) -> u32 {
    let days = active_days(daily);
    let yesterday = today - Duration::days(1);

    let mut check_date = if days.contains(&today) {
        today
    } else if days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    while days.contains(&check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive active days anywhere in the series
pub fn longest_streak(daily: &[DailyActivity]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<NaiveDate> = None;

    for day in active_days(daily) {
        current = match prev {
            Some(p) if day == p + Duration::days(1) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        prev = Some(day);
    }

    longest
}

pub fn calculate_streak(daily: &[DailyActivity], today: NaiveDate) -> StreakResult {
    let current = current_streak(daily, today);
    StreakResult {
        current,
        // Current can never be longer than longest
        longest: longest_streak(daily).max(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn days_ago(n: i64) -> DailyActivity {
        DailyActivity {
            date: today() - Duration::days(n),
            points: 5,
            count: 1,
        }
    }

    #[test]
    fn test_empty_activity() {
        assert_eq!(calculate_streak(&[], today()), StreakResult::default());
    }

    #[test]
    fn test_single_day_today() {
        let result = calculate_streak(&[days_ago(0)], today());
        assert_eq!(result.current, 1);
        assert_eq!(result.longest, 1);
    }

    #[test]
    fn test_streak_yesterday() {
        // No activity today but yesterday - streak is still alive
        assert_eq!(current_streak(&[days_ago(1)], today()), 1);
    }

    #[test]
    fn test_only_three_days_ago() {
        assert_eq!(current_streak(&[days_ago(3)], today()), 0);
        assert_eq!(current_streak(&[days_ago(2)], today()), 0);
    }

    #[test]
    fn test_unsorted_with_duplicates() {
        let daily = vec![days_ago(2), days_ago(0), days_ago(1), days_ago(0), days_ago(2)];
        let result = calculate_streak(&daily, today());
        assert_eq!(result.current, 3);
        assert_eq!(result.longest, 3);
    }

    #[test]
    fn test_broken_streak() {
        let daily = vec![
            days_ago(0),
            days_ago(1),
            days_ago(5),
            days_ago(6),
            days_ago(7),
        ];
        let result = calculate_streak(&daily, today());
        assert_eq!(result.current, 2);
        assert_eq!(result.longest, 3);
    }

    #[test]
    fn test_streak_from_yesterday_backwards() {
        let daily = vec![days_ago(1), days_ago(2), days_ago(3), days_ago(5)];
        assert_eq!(current_streak(&daily, today()), 3);
    }
}
