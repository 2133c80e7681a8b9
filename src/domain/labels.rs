use crate::domain::ViewMonth;
use anyhow::bail;
use chrono::Weekday;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en_us" | "english" => Ok(Locale::En),
            "zh" | "zh-cn" | "zh_cn" | "chinese" => Ok(Locale::Zh),
            other => bail!("Unknown locale '{}' (expected 'en' or 'zh')", other),
        }
    }
}

/// Month and weekday names for one locale. Weekdays are Sunday-first.
#[derive(Debug)]
pub struct Labels {
    pub months: [&'static str; 12],
    pub weekdays: [&'static str; 7],
}

pub static EN: Labels = Labels {
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
};

pub static ZH: Labels = Labels {
    months: [
        "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
        "十二月",
    ],
    weekdays: ["日", "一", "二", "三", "四", "五", "六"],
};

impl Labels {
    pub fn month_name(&self, month0: u32) -> &'static str {
        self.months[month0 as usize % 12]
    }

    pub fn weekday(&self, weekday: Weekday) -> &'static str {
        self.weekdays[weekday.num_days_from_sunday() as usize]
    }

    /// Column labels for a week starting on `first_day`.
    pub fn week_header(&self, first_day: Weekday) -> [&'static str; 7] {
        let mut header = [""; 7];
        let mut day = first_day;
        for label in header.iter_mut() {
            *label = self.weekday(day);
            day = day.succ();
        }
        header
    }

    /// `"{MonthName} {Year}"`
    pub fn month_header(&self, view: ViewMonth) -> String {
        format!("{} {}", self.month_name(view.month0()), view.year())
    }
}
