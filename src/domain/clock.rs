use crate::domain::{CalendarDate, Labels};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of the local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> CalendarDate {
        self.now().date().into()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midday on `date`.
    pub fn on(date: CalendarDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).expect("noon is a valid time");
        Self(NaiveDate::from(date).and_time(noon))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The three lines of the clock header: weekday, time of day, date.
pub fn clock_face(now: NaiveDateTime, labels: &Labels) -> [String; 3] {
    [
        labels.weekday(now.weekday()).to_string(),
        now.format("%H:%M:%S").to_string(),
        now.format("%Y-%m-%d").to_string(),
    ]
}
