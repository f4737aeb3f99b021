use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::calendar;

/// Separator between key fields. Never appears inside a field: years are
/// unsigned and months/days are plain digits.
pub const KEY_SEPARATOR: char = '-';

static MONTH_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>[0-9]{1,5})-(?P<month>[0-9]{1,2})$").unwrap()
});

static DAY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>[0-9]{1,5})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("malformed key `{0}`")]
    Malformed(String),
    #[error("month index out of range in key `{0}`")]
    Month(String),
    #[error("day out of range in key `{0}`")]
    Day(String),
}

/// A calendar month: year plus 0-based month index.
///
/// Serialized as `"{year}-{month}"`, e.g. `"2024-1"` for February 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: u16,
    month: u8,
}

impl MonthKey {
    /// Returns `None` when `month` is not in `0..=11`.
    pub fn new(year: u16, month: u8) -> Option<Self> {
        (month < 12).then_some(Self { year, month })
    }

    /// Month containing `date`, saturating outside the representable year range.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: u16::try_from(date.year().max(0)).unwrap_or(u16::MAX),
            month: date.month0() as u8,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// 0-based month index (0 = January).
    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn days_in_month(&self) -> u8 {
        calendar::days_in_month(self.year, self.month)
    }

    /// Key for `day` of this month, or `None` when the month has no such day.
    pub fn day(&self, day: u8) -> Option<DayKey> {
        (day >= 1 && day <= self.days_in_month()).then_some(DayKey { month: *self, day })
    }

    pub fn first_day(&self) -> DayKey {
        DayKey { month: *self, day: 1 }
    }

    pub fn last_day(&self) -> DayKey {
        DayKey {
            month: *self,
            day: self.days_in_month(),
        }
    }

    /// The previous month, or `None` before January of year 0.
    pub fn pred(&self) -> Option<Self> {
        if self.month > 0 {
            Some(Self { year: self.year, month: self.month - 1 })
        } else {
            Some(Self { year: self.year.checked_sub(1)?, month: 11 })
        }
    }

    /// The next month, or `None` after December of the last representable year.
    pub fn succ(&self) -> Option<Self> {
        if self.month < 11 {
            Some(Self { year: self.year, month: self.month + 1 })
        } else {
            Some(Self { year: self.year.checked_add(1)?, month: 0 })
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.year, KEY_SEPARATOR, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = MONTH_KEY_RE
            .captures(s)
            .ok_or_else(|| KeyParseError::Malformed(s.to_string()))?;
        let year = caps["year"]
            .parse::<u16>()
            .map_err(|_| KeyParseError::Malformed(s.to_string()))?;
        let month = caps["month"]
            .parse::<u8>()
            .map_err(|_| KeyParseError::Malformed(s.to_string()))?;
        Self::new(year, month).ok_or_else(|| KeyParseError::Month(s.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = KeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// A calendar day: month plus 1-based day of month.
///
/// Serialized as `"{year}-{month}-{day}"`, e.g. `"2024-0-15"`. Ordering is
/// chronological, so day 2 sorts before day 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey {
    month: MonthKey,
    day: u8,
}

impl DayKey {
    /// Returns `None` unless the fields name a real calendar day.
    pub fn new(year: u16, month: u8, day: u8) -> Option<Self> {
        MonthKey::new(year, month)?.day(day)
    }

    pub fn month_key(&self) -> MonthKey {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.month.year
    }

    /// 0-based month index (0 = January).
    pub fn month(&self) -> u8 {
        self.month.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()) + 1,
            u32::from(self.day),
        )
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.month, KEY_SEPARATOR, self.day)
    }
}

impl FromStr for DayKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DAY_KEY_RE
            .captures(s)
            .ok_or_else(|| KeyParseError::Malformed(s.to_string()))?;
        let year = caps["year"]
            .parse::<u16>()
            .map_err(|_| KeyParseError::Malformed(s.to_string()))?;
        let month = caps["month"]
            .parse::<u8>()
            .map_err(|_| KeyParseError::Malformed(s.to_string()))?;
        let day = caps["day"]
            .parse::<u8>()
            .map_err(|_| KeyParseError::Malformed(s.to_string()))?;
        let month = MonthKey::new(year, month).ok_or_else(|| KeyParseError::Month(s.to_string()))?;
        month.day(day).ok_or_else(|| KeyParseError::Day(s.to_string()))
    }
}

impl TryFrom<String> for DayKey {
    type Error = KeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_format_matches_stored_documents() {
        let key = DayKey::new(2024, 0, 15).unwrap();
        assert_eq!(key.to_string(), "2024-0-15");
        assert_eq!(key.month_key().to_string(), "2024-0");
    }

    #[test]
    fn parse_day_key() {
        let key: DayKey = "2024-11-31".parse().unwrap();
        assert_eq!((key.year(), key.month(), key.day()), (2024, 11, 31));
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        for bad in ["", "2024", "2024-0", "2024-0-", "-2024-0-1", "2024--0-1", "2024-0-1-1", "a-b-c", "2024-0-+1"] {
            assert!(bad.parse::<DayKey>().is_err(), "{bad:?} should not parse");
        }
        assert!("2024-0-1".parse::<MonthKey>().is_err());
        assert!("2024".parse::<MonthKey>().is_err());
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert_eq!(
            "2024-12".parse::<MonthKey>(),
            Err(KeyParseError::Month("2024-12".into()))
        );
        assert_eq!(
            "2023-1-29".parse::<DayKey>(),
            Err(KeyParseError::Day("2023-1-29".into()))
        );
        assert!("2024-1-29".parse::<DayKey>().is_ok());
        assert!("2024-0-0".parse::<DayKey>().is_err());
    }

    #[test]
    fn ordering_is_numeric() {
        let month = MonthKey::new(2024, 0).unwrap();
        let mut keys = vec![month.day(2).unwrap(), month.day(10).unwrap(), month.day(1).unwrap()];
        keys.sort();
        let days: Vec<u8> = keys.iter().map(|k| k.day()).collect();
        assert_eq!(days, vec![1, 2, 10]);

        let dec = MonthKey::new(2023, 11).unwrap().day(31).unwrap();
        assert!(dec < month.first_day());
    }

    #[test]
    fn month_rollover() {
        let jan = MonthKey::new(2024, 0).unwrap();
        assert_eq!(jan.pred(), MonthKey::new(2023, 11));
        let dec = MonthKey::new(2024, 11).unwrap();
        assert_eq!(dec.succ(), MonthKey::new(2025, 0));
        assert_eq!(MonthKey::new(0, 0).unwrap().pred(), None);
        assert_eq!(MonthKey::new(u16::MAX, 11).unwrap().succ(), None);
    }

    #[test]
    fn serde_uses_string_form() {
        let key = DayKey::new(2024, 1, 29).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-1-29\"");
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DayKey>("\"2024-1-30\"").is_err());
    }
}
