use chrono::{Datelike, NaiveDate};

use super::clock::Clock;
use super::key::{DayKey, MonthKey};

/// Number of days in the month, 28..=31. `month` is 0-based.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    let (next_year, next_month) = if month >= 11 {
        (i32::from(year) + 1, 1)
    } else {
        (i32::from(year), u32::from(month) + 2)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day() as u8)
        .unwrap_or(31)
}

/// Weekday of the first day of the month, 0 = Sunday. `month` is 0-based.
pub fn first_weekday_of_month(year: u16, month: u8) -> u8 {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month) + 1, 1)
        .map(|first| first.weekday().num_days_from_sunday() as u8)
        .unwrap_or(0)
}

/// The month currently shown in the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarNavigator {
    viewed: MonthKey,
}

impl CalendarNavigator {
    pub fn new(viewed: MonthKey) -> Self {
        Self { viewed }
    }

    /// Start on the month containing the clock's current date.
    pub fn today(clock: &dyn Clock) -> Self {
        Self::new(MonthKey::containing(clock.today()))
    }

    pub fn viewed(&self) -> MonthKey {
        self.viewed
    }

    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.viewed.year(), self.viewed.month())
    }

    pub fn first_weekday(&self) -> u8 {
        first_weekday_of_month(self.viewed.year(), self.viewed.month())
    }

    pub fn go_to_previous_month(&mut self) {
        self.viewed = self.viewed.pred().unwrap_or(self.viewed);
    }

    pub fn go_to_next_month(&mut self) {
        self.viewed = self.viewed.succ().unwrap_or(self.viewed);
    }

    pub fn go_to_today(&mut self, clock: &dyn Clock) {
        self.viewed = MonthKey::containing(clock.today());
    }

    pub fn go_to(&mut self, month: MonthKey) {
        self.viewed = month;
    }

    pub fn is_today(&self, day: DayKey, clock: &dyn Clock) -> bool {
        day.to_date() == Some(clock.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;

    fn month(year: u16, month: u8) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn days_in_february() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn days_in_other_months() {
        assert_eq!(days_in_month(2024, 0), 31);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 11), 31);
    }

    #[test]
    fn first_weekday() {
        // 1 January 2024 was a Monday, 1 September 2024 a Sunday.
        assert_eq!(first_weekday_of_month(2024, 0), 1);
        assert_eq!(first_weekday_of_month(2024, 8), 0);
        // 1 June 2024 was a Saturday.
        assert_eq!(first_weekday_of_month(2024, 5), 6);
    }

    #[test]
    fn navigation_rolls_year_boundaries() {
        let mut nav = CalendarNavigator::new(month(2024, 0));
        nav.go_to_previous_month();
        assert_eq!(nav.viewed(), month(2023, 11));
        nav.go_to_next_month();
        nav.go_to_next_month();
        assert_eq!(nav.viewed(), month(2024, 1));

        let mut nav = CalendarNavigator::new(month(2024, 11));
        nav.go_to_next_month();
        assert_eq!(nav.viewed(), month(2025, 0));
    }

    #[test]
    fn navigation_saturates_at_year_zero() {
        let mut nav = CalendarNavigator::new(month(0, 0));
        nav.go_to_previous_month();
        assert_eq!(nav.viewed(), month(0, 0));
    }

    #[test]
    fn go_to_today_uses_clock() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut nav = CalendarNavigator::new(month(2020, 3));
        nav.go_to_today(&clock);
        assert_eq!(nav.viewed(), month(2026, 9));
        assert!(nav.is_today(nav.viewed().day(19).unwrap(), &clock));
        assert!(!nav.is_today(nav.viewed().day(18).unwrap(), &clock));
    }
}
