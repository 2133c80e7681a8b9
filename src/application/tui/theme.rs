use crate::domain::Accent;
use crossterm::style::Color as CrosstermColor;
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Calendar cells
    pub in_month: ColorPair,
    pub fill_day: ColorPair,
    pub weekend: ColorPair,
    pub today: ColorPair,
    pub selected: ColorPair,
    pub cursor: ColorPair,

    // UI elements
    pub header: ColorPair,
    pub week_header: ColorPair,
    pub border: ColorPair,
    pub clock: ColorPair,

    // Text
    pub normal_text: ColorPair,
    pub help_text: ColorPair,
    pub dimmed: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }
}

/// Convert crossterm color to ratatui color
pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
    match color {
        CrosstermColor::Black => RatatuiColor::Black,
        CrosstermColor::DarkRed => RatatuiColor::Red,
        CrosstermColor::DarkGreen => RatatuiColor::Green,
        CrosstermColor::DarkYellow => RatatuiColor::Yellow,
        CrosstermColor::DarkBlue => RatatuiColor::Blue,
        CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
        CrosstermColor::DarkCyan => RatatuiColor::Cyan,
        CrosstermColor::Grey => RatatuiColor::Gray,
        CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
        CrosstermColor::Red => RatatuiColor::LightRed,
        CrosstermColor::Green => RatatuiColor::LightGreen,
        CrosstermColor::Yellow => RatatuiColor::LightYellow,
        CrosstermColor::Blue => RatatuiColor::LightBlue,
        CrosstermColor::Magenta => RatatuiColor::LightMagenta,
        CrosstermColor::Cyan => RatatuiColor::LightCyan,
        CrosstermColor::White => RatatuiColor::White,
        CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
        CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
        _ => RatatuiColor::White,
    }
}

pub fn accent_color(accent: Accent) -> RatatuiColor {
    RatatuiColor::Rgb(accent.r, accent.g, accent.b)
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                in_month: ColorPair::new(CrosstermColor::White),
                fill_day: ColorPair::new(CrosstermColor::DarkGrey),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                cursor: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 40, g: 40, b: 40 },
                ),

                header: ColorPair::new(CrosstermColor::DarkCyan),
                week_header: ColorPair::new(CrosstermColor::DarkCyan),
                border: ColorPair::new(CrosstermColor::DarkCyan),
                clock: ColorPair::new(CrosstermColor::White),

                normal_text: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::DarkCyan),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                in_month: ColorPair::new(CrosstermColor::Black),
                fill_day: ColorPair::new(CrosstermColor::Grey),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),
                today: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Yellow),
                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                cursor: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 225, g: 225, b: 225 },
                ),

                header: ColorPair::new(CrosstermColor::DarkBlue),
                week_header: ColorPair::new(CrosstermColor::DarkBlue),
                border: ColorPair::new(CrosstermColor::DarkBlue),
                clock: ColorPair::new(CrosstermColor::Black),

                normal_text: ColorPair::new(CrosstermColor::Black),
                help_text: ColorPair::new(CrosstermColor::DarkBlue),
                dimmed: ColorPair::new(CrosstermColor::Grey),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                in_month: ColorPair::new(CrosstermColor::White),
                fill_day: ColorPair::new(CrosstermColor::DarkGrey),
                weekend: ColorPair::new(CrosstermColor::White),
                today: ColorPair::new(CrosstermColor::White),
                selected: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                cursor: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 28, g: 28, b: 28 },
                ),

                header: ColorPair::new(CrosstermColor::White),
                week_header: ColorPair::new(CrosstermColor::Grey),
                border: ColorPair::new(CrosstermColor::White),
                clock: ColorPair::new(CrosstermColor::White),

                normal_text: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::Grey),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }
}
