use crate::domain::CalendarDate;
use anyhow::{Context, anyhow};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// The (year, month) pair shown by the calendar, month in `[0, 11]`.
///
/// Years are kept one year inside chrono's range so that the 42-cell
/// window around any representable month is itself representable.
/// Rollover arithmetic saturates at those bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewMonth {
    first: NaiveDate,
}

fn min_year() -> i32 {
    NaiveDate::MIN.year() + 1
}

fn max_year() -> i32 {
    NaiveDate::MAX.year() - 1
}

impl ViewMonth {
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        if month0 > 11 || year < min_year() || year > max_year() {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month0 + 1, 1).map(|first| Self { first })
    }

    /// The month containing `date`, clamped into the supported year range.
    pub fn containing(date: CalendarDate) -> Self {
        let year = date.year().clamp(min_year(), max_year());
        let month0 = if year == date.year() { date.month0() } else { 0 };
        Self::new(year, month0).expect("clamped year and month are in range")
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> CalendarDate {
        self.first.into()
    }

    /// Shift by `months`, carrying into the year. Out-of-range results
    /// leave the month unchanged.
    pub fn offset(self, months: i32) -> Self {
        let total = i64::from(self.year()) * 12 + i64::from(self.month0()) + i64::from(months);
        let year = total.div_euclid(12);
        let month0 = total.rem_euclid(12) as u32;

        i32::try_from(year)
            .ok()
            .and_then(|year| Self::new(year, month0))
            .unwrap_or(self)
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = if self.month0() == 11 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month0() + 2)
        };
        let first_of_next =
            NaiveDate::from_ymd_opt(year, month, 1).expect("Invalid month end calculation");
        (first_of_next - self.first).num_days() as u32
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month0() == self.month0()
    }

    /// The given day of this month, clamped to the month's last day.
    pub fn day(&self, day: u32) -> CalendarDate {
        let day = day.clamp(1, self.days_in_month());
        self.first_day()
            .checked_add_days(i64::from(day - 1))
            .expect("day lies within the month")
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month0() + 1)
    }
}

impl FromStr for ViewMonth {
    type Err = anyhow::Error;

    /// Parses `YYYY-MM` with a one-based month, as typed on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| anyhow!("Expected YYYY-MM, got '{}'", s))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{}'", s))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in '{}'", s))?;

        month
            .checked_sub(1)
            .and_then(|month0| Self::new(year, month0))
            .ok_or_else(|| anyhow!("Month out of range in '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(year: i32, month0: u32) -> ViewMonth {
        ViewMonth::new(year, month0).unwrap()
    }

    #[test]
    fn rejects_month_outside_range() {
        assert!(ViewMonth::new(2025, 12).is_none());
        assert!(ViewMonth::new(2025, 11).is_some());
    }

    #[test]
    fn next_wraps_december_to_january() {
        assert_eq!(vm(2025, 11).next(), vm(2026, 0));
        assert_eq!(vm(2025, 5).next(), vm(2025, 6));
    }

    #[test]
    fn previous_wraps_january_to_december() {
        assert_eq!(vm(2026, 0).previous(), vm(2025, 11));
        assert_eq!(vm(0, 0).previous(), vm(-1, 11));
    }

    #[test]
    fn offset_saturates_at_supported_bounds() {
        let last = vm(max_year(), 11);
        assert_eq!(last.next(), last);
        let first = vm(min_year(), 0);
        assert_eq!(first.previous(), first);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(vm(2024, 1).days_in_month(), 29);
        assert_eq!(vm(2025, 1).days_in_month(), 28);
        assert_eq!(vm(1900, 1).days_in_month(), 28);
        assert_eq!(vm(2000, 1).days_in_month(), 29);
        assert_eq!(vm(2025, 3).days_in_month(), 30);
        assert_eq!(vm(2025, 11).days_in_month(), 31);
    }

    #[test]
    fn day_clamps_to_month_end() {
        assert_eq!(vm(2025, 1).day(31), CalendarDate::from_ymd(2025, 1, 28).unwrap());
        assert_eq!(vm(2025, 1).day(0), CalendarDate::from_ymd(2025, 1, 1).unwrap());
    }

    #[test]
    fn parses_one_based_month_strings() {
        assert_eq!("2025-12".parse::<ViewMonth>().unwrap(), vm(2025, 11));
        assert_eq!("2026-1".parse::<ViewMonth>().unwrap(), vm(2026, 0));
        assert!("2025-13".parse::<ViewMonth>().is_err());
        assert!("2025-00".parse::<ViewMonth>().is_err());
        assert!("december".parse::<ViewMonth>().is_err());
        assert_eq!(vm(2026, 0).to_string(), "2026-01");
    }
}
