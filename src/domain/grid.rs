use crate::domain::{CalendarDate, ViewMonth};
use chrono::{Duration, NaiveDate, Weekday};

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

/// One cell of the month grid. Derived on every render, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Inclusive date range covered by a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl GridWindow {
    pub fn contains(&self, date: CalendarDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Number of fill days before the 1st when weeks begin on `first_day`.
pub fn leading_days(view: ViewMonth, first_day: Weekday) -> u32 {
    let first_weekday = view.first_day().weekday().num_days_from_sunday();
    (first_weekday + 7 - first_day.num_days_from_sunday()) % 7
}

pub fn grid_start(view: ViewMonth, first_day: Weekday) -> CalendarDate {
    let first: NaiveDate = view.first_day().into();
    (first - Duration::days(i64::from(leading_days(view, first_day)))).into()
}

pub fn grid_window(view: ViewMonth, first_day: Weekday) -> GridWindow {
    let start = grid_start(view, first_day);
    let end: NaiveDate = start.into();
    GridWindow {
        start,
        end: (end + Duration::days(GRID_CELLS as i64 - 1)).into(),
    }
}

/// Lay out the 42 cells shown for `view`, in ascending date order.
pub fn compute_grid(
    view: ViewMonth,
    today: CalendarDate,
    selected: Option<CalendarDate>,
    first_day: Weekday,
) -> Vec<DayCell> {
    let start: NaiveDate = grid_start(view, first_day).into();

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(CalendarDate::from)
        .map(|date| DayCell {
            date,
            in_current_month: view.contains(date),
            is_today: date == today,
            is_selected: selected == Some(date),
        })
        .collect()
}
