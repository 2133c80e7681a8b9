use crate::application::tui::Theme;
use crate::domain::{CalendarOptions, DEFAULT_SLIDE_INTERVAL, Locale};
use anyhow::{Context, Result, anyhow, bail};
use chrono::Weekday;
use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub resume_path: PathBuf,
    pub slides_path: Option<PathBuf>,
    pub first_day: Weekday,
    pub locale: Locale,
    pub theme: String,
    pub select_today_on_start: bool,
    pub slide_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("FOLIO_DIR").map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("folio")
        });

        let log_dir = data_dir.join("logs");
        let resume_path = lookup("FOLIO_RESUME")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("resume.json"));
        let slides_path = lookup("FOLIO_SLIDES").map(PathBuf::from);

        let first_day = match lookup("FOLIO_FIRST_DAY") {
            Some(value) => value
                .trim()
                .parse::<Weekday>()
                .map_err(|_| anyhow!("Invalid FOLIO_FIRST_DAY '{}'", value))?,
            None => Weekday::Mon,
        };

        let locale = match lookup("FOLIO_LOCALE") {
            Some(value) => value.parse::<Locale>().context("Invalid FOLIO_LOCALE")?,
            None => Locale::En,
        };

        let theme = match lookup("FOLIO_THEME") {
            Some(value) => {
                let name = value.trim().to_lowercase();
                let available = Theme::available_themes();
                if !available.contains(&name) {
                    bail!(
                        "Unknown FOLIO_THEME '{}', expected one of: {}",
                        value,
                        available.join(", ")
                    );
                }
                name
            }
            None => "dark".to_string(),
        };

        let select_today_on_start = match lookup("FOLIO_SELECT_TODAY") {
            Some(value) => parse_flag(&value).context("Invalid FOLIO_SELECT_TODAY")?,
            None => false,
        };

        let slide_interval = match lookup("FOLIO_SLIDE_INTERVAL_MS") {
            Some(value) => {
                let millis: u64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid FOLIO_SLIDE_INTERVAL_MS '{}'", value))?;
                if millis == 0 {
                    bail!("FOLIO_SLIDE_INTERVAL_MS must be positive");
                }
                Duration::from_millis(millis)
            }
            None => DEFAULT_SLIDE_INTERVAL,
        };

        Ok(Self {
            data_dir,
            log_dir,
            resume_path,
            slides_path,
            first_day,
            locale,
            theme,
            select_today_on_start,
            slide_interval,
        })
    }

    pub fn calendar_options(&self) -> CalendarOptions {
        CalendarOptions {
            first_day: self.first_day,
            locale: self.locale,
            select_today_on_start: self.select_today_on_start,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("Expected a boolean, got '{}'", other),
    }
}
