use crate::domain::grid::{DAYS_PER_WEEK, GridWindow, compute_grid, grid_window};
use crate::domain::{CalendarDate, Clock, DayCell, Locale, ViewMonth};
use chrono::Weekday;

/// Everything a renderer needs to draw one state of the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarFrame {
    /// `"{MonthName} {Year}"`
    pub header: String,
    pub week_header: [&'static str; 7],
    pub view: ViewMonth,
    pub today: CalendarDate,
    pub selected: Option<CalendarDate>,
    pub window: GridWindow,
    pub cells: Vec<DayCell>,
}

impl CalendarFrame {
    /// Cells grouped into weeks.
    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn cell(&self, date: CalendarDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Receives a fresh frame after every controller command.
pub trait RenderSink {
    fn render(&mut self, frame: &CalendarFrame);
}

/// Keeps the most recent frame for a renderer that draws on its own schedule.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    latest: Option<CalendarFrame>,
    renders: usize,
}

impl FrameBuffer {
    pub fn latest(&self) -> Option<&CalendarFrame> {
        self.latest.as_ref()
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl RenderSink for FrameBuffer {
    fn render(&mut self, frame: &CalendarFrame) {
        self.latest = Some(frame.clone());
        self.renders += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOptions {
    pub first_day: Weekday,
    pub locale: Locale,
    pub select_today_on_start: bool,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            first_day: Weekday::Mon,
            locale: Locale::En,
            select_today_on_start: false,
        }
    }
}

/// Owns the view month and the selection, and re-renders after each command.
pub struct CalendarController<S: RenderSink> {
    view: ViewMonth,
    selected: Option<CalendarDate>,
    options: CalendarOptions,
    clock: Box<dyn Clock>,
    sink: S,
}

impl<S: RenderSink> CalendarController<S> {
    /// Starts on the current month and renders once.
    pub fn new(options: CalendarOptions, clock: Box<dyn Clock>, sink: S) -> Self {
        let today = clock.today();
        let mut controller = Self {
            view: ViewMonth::containing(today),
            selected: options.select_today_on_start.then_some(today),
            options,
            clock,
            sink,
        };
        controller.render();
        controller
    }

    pub fn go_to_previous_month(&mut self) {
        self.view = self.view.previous();
        log::debug!("Calendar moved back to {}", self.view);
        self.render();
    }

    pub fn go_to_next_month(&mut self) {
        self.view = self.view.next();
        log::debug!("Calendar moved forward to {}", self.view);
        self.render();
    }

    /// Shows the current month and selects today.
    pub fn go_to_today(&mut self) {
        let today = self.clock.today();
        self.view = ViewMonth::containing(today);
        self.selected = Some(today);
        log::debug!("Calendar jumped to today ({})", today);
        self.render();
    }

    /// Shows `view` without touching the selection.
    pub fn go_to_month(&mut self, view: ViewMonth) {
        self.view = view;
        log::debug!("Calendar jumped to {}", self.view);
        self.render();
    }

    /// Selects `date`. The view stays put even when `date` is a fill day.
    pub fn select_date(&mut self, date: CalendarDate) {
        self.selected = Some(date);
        log::debug!("Selected {}", date);
        self.render();
    }

    pub fn render(&mut self) {
        let frame = self.frame();
        self.sink.render(&frame);
    }

    pub fn frame(&self) -> CalendarFrame {
        let today = self.clock.today();
        let labels = self.options.locale.labels();
        CalendarFrame {
            header: labels.month_header(self.view),
            week_header: labels.week_header(self.options.first_day),
            view: self.view,
            today,
            selected: self.selected,
            window: grid_window(self.view, self.options.first_day),
            cells: compute_grid(self.view, today, self.selected, self.options.first_day),
        }
    }

    pub fn view(&self) -> ViewMonth {
        self.view
    }

    pub fn selected(&self) -> Option<CalendarDate> {
        self.selected
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
