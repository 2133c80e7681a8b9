use super::theme::{Theme, accent_color};
use crate::domain::{
    CalendarController, CalendarDate, CalendarFrame, Carousel, DayCell, FrameBuffer, GridWindow,
    Project, Resume, Slider, clock_face,
};
use anyhow::Result;
use chrono::Weekday;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::time::{Duration, Instant};

const TICK_RATE: Duration = Duration::from_millis(250);

const TOP_HEIGHT: u16 = 3;
const CALENDAR_HEIGHT: u16 = 9; // week header + 6 weeks + borders
const STATUS_HEIGHT: u16 = 2;
const PROJECT_HEIGHT: u16 = 4;
const HELP_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 1;
const SCREEN_WIDTH: u16 = 64;

/// The interactive calendar page: clock header, month grid, slider caption,
/// projects carousel and footer.
pub struct CalendarScreen<'a> {
    controller: CalendarController<FrameBuffer>,
    /// Cell the keyboard is on; Enter selects it
    cursor: CalendarDate,
    slider: Slider,
    projects: Option<Carousel<Project>>,
    resume: &'a Resume,
    theme: Theme,
    show_help: bool,
    should_exit: bool,
}

impl<'a> CalendarScreen<'a> {
    pub fn new(
        controller: CalendarController<FrameBuffer>,
        slider: Slider,
        resume: &'a Resume,
        theme: Theme,
    ) -> Self {
        let window = rendered_window(&controller);
        let cursor = controller
            .selected()
            .unwrap_or_else(|| controller.clock().today());
        let cursor = if window.contains(cursor) {
            cursor
        } else {
            controller.view().first_day()
        };

        Self {
            controller,
            cursor,
            slider,
            projects: Carousel::new(resume.projects.clone()),
            resume,
            theme,
            show_help: false,
            should_exit: false,
        }
    }

    pub fn controller(&self) -> &CalendarController<FrameBuffer> {
        &self.controller
    }

    pub fn cursor(&self) -> CalendarDate {
        self.cursor
    }

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                self.should_exit = true;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.should_exit = true;
            }

            // Cursor
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => self.move_cursor(-1),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => self.move_cursor(1),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => self.move_cursor(-7),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => self.move_cursor(7),

            // Month navigation
            (KeyCode::PageUp, _) | (KeyCode::Char('<'), _) => {
                self.controller.go_to_previous_month();
                self.cursor = self.controller.view().day(self.cursor.day());
            }
            (KeyCode::PageDown, _) | (KeyCode::Char('>'), _) => {
                self.controller.go_to_next_month();
                self.cursor = self.controller.view().day(self.cursor.day());
            }
            (KeyCode::Char('t'), _) => {
                self.controller.go_to_today();
                self.cursor = self.controller.clock().today();
            }
            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => {
                self.controller.select_date(self.cursor);
            }

            // Slider and projects
            (KeyCode::Char('['), _) => self.slider.previous(now),
            (KeyCode::Char(']'), _) => self.slider.next(now),
            (KeyCode::Char('s'), _) => self.slider.toggle_pause(now),
            (KeyCode::Char(','), _) => {
                if let Some(projects) = self.projects.as_mut() {
                    projects.previous();
                }
            }
            (KeyCode::Char('.'), _) => {
                if let Some(projects) = self.projects.as_mut() {
                    projects.next();
                }
            }

            (KeyCode::Char('?'), _) => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }
    }

    /// Periodic work between key events.
    pub fn on_tick(&mut self, now: Instant) {
        self.slider.tick(now);

        // Re-render when the date rolls over so the today marker follows.
        let today = self.controller.clock().today();
        let stale = self
            .controller
            .sink()
            .latest()
            .is_none_or(|frame| frame.today != today);
        if stale {
            self.controller.render();
        }
    }

    /// Move the cursor, paging the month when it walks off the grid.
    fn move_cursor(&mut self, days: i64) {
        let Some(target) = self.cursor.checked_add_days(days) else {
            return;
        };
        let window = rendered_window(&self.controller);
        if target > window.end {
            self.controller.go_to_next_month();
        } else if target < window.start {
            self.controller.go_to_previous_month();
        }

        if rendered_window(&self.controller).contains(target) {
            self.cursor = target;
        }
    }

    fn current_frame(&self) -> CalendarFrame {
        self.controller
            .sink()
            .latest()
            .cloned()
            .unwrap_or_else(|| self.controller.frame())
    }

    /// Calculate centered area with both horizontal and vertical centering
    fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
        let width = std::cmp::min(available.width, needed_width);
        let height = std::cmp::min(available.height, needed_height);

        Rect {
            x: available.x + (available.width - width) / 2,
            y: available.y + (available.height - height) / 2,
            width,
            height,
        }
    }

    fn cell_style(cell: &DayCell, cursor: CalendarDate, theme: &Theme) -> Style {
        let colors = &theme.colors;
        let is_weekend = matches!(cell.date.weekday(), Weekday::Sat | Weekday::Sun);

        let style = if cell.is_selected {
            colors.selected.to_ratatui_with_modifier(Modifier::BOLD)
        } else if cell.is_today {
            colors.today.to_ratatui_with_modifier(Modifier::BOLD)
        } else if cell.date == cursor {
            colors.cursor.to_ratatui()
        } else if !cell.in_current_month {
            colors.fill_day.to_ratatui()
        } else if is_weekend {
            colors.weekend.to_ratatui()
        } else {
            colors.in_month.to_ratatui()
        };

        if cell.date == cursor {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    fn create_month_table(
        calendar: &CalendarFrame,
        cursor: CalendarDate,
        theme: &Theme,
    ) -> Table<'static> {
        let week_header = theme.colors.week_header.to_ratatui();
        let header = Row::new(
            calendar
                .week_header
                .iter()
                .map(|label| Cell::from(format!("{:>3} ", label)).style(week_header)),
        )
        .height(1);

        let rows: Vec<Row> = calendar
            .rows()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .iter()
                    .map(|cell| {
                        let text = if cell.date == cursor {
                            format!("[{:>2}]", cell.date.day())
                        } else {
                            format!(" {:>2} ", cell.date.day())
                        };
                        Cell::from(text).style(Self::cell_style(cell, cursor, theme))
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        Table::new(rows, [Constraint::Length(4); 7])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.colors.border.to_ratatui())
                    .title(calendar.header.clone())
                    .title_style(theme.colors.header.to_ratatui_with_modifier(Modifier::BOLD))
                    .title_alignment(Alignment::Center),
            )
            .column_spacing(1)
    }

    fn create_top_bar(&self, theme: &Theme) -> Paragraph<'static> {
        let lines = if self.slider.shows_clock() {
            let labels = self.controller.options().locale.labels();
            clock_face(self.controller.clock().now(), labels)
                .into_iter()
                .map(|text| Line::from(Span::styled(text, theme.colors.clock.to_ratatui())))
                .collect()
        } else {
            vec![
                Line::from(Span::styled(
                    self.resume.name.clone(),
                    theme.colors.normal_text.to_ratatui_with_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    self.resume.subtitle.clone(),
                    theme.colors.dimmed.to_ratatui(),
                )),
                Line::from(Span::styled(
                    self.resume.contact_line().join(" | "),
                    theme.colors.dimmed.to_ratatui(),
                )),
            ]
        };

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn create_status(&self, calendar: &CalendarFrame, accent: Style) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let selection = match calendar.selected {
            Some(date) => format!("Selected {}", date.naive().format("%A, %B %d, %Y")),
            None => "No date selected".to_string(),
        };

        let slide = self.slider.current();
        let mut caption = format!(
            "{} ({}/{})",
            slide.title,
            self.slider.index() + 1,
            self.slider.len()
        );
        if self.slider.is_paused() {
            caption.push_str(" ⏸");
        }

        Paragraph::new(vec![
            Line::from(Span::styled(selection, colors.normal_text.to_ratatui())),
            Line::from(Span::styled(caption, accent)),
        ])
        .alignment(Alignment::Center)
    }

    fn create_project_panel(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let Some(projects) = &self.projects else {
            return Paragraph::new(Line::from(Span::styled(
                "No projects to show",
                colors.dimmed.to_ratatui(),
            )))
            .alignment(Alignment::Center);
        };

        let project = projects.current();
        let mut lines = vec![Line::from(vec![
            Span::styled(
                project.name.clone(),
                colors.normal_text.to_ratatui_with_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}  ({}/{})", project.time, projects.index() + 1, projects.len()),
                colors.dimmed.to_ratatui(),
            ),
        ])];
        lines.extend(project.bullets.iter().take(3).map(|bullet| {
            Line::from(Span::styled(format!("• {}", bullet), colors.normal_text.to_ratatui()))
        }));

        Paragraph::new(lines).alignment(Alignment::Left)
    }

    fn create_help_text(theme: &Theme) -> Paragraph<'static> {
        let style = theme.colors.help_text.to_ratatui();
        Paragraph::new(vec![
            Line::from(Span::styled(
                "←→↑↓/hjkl=Move • PgUp/PgDn or </>=Month • t=Today • Enter=Select",
                style,
            )),
            Line::from(Span::styled(
                "[/]=Slide • s=Pause • ,/.=Project • ?=Help • q=Quit",
                style,
            )),
        ])
        .alignment(Alignment::Center)
    }

    fn create_footer(&self, year: i32) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            format!("© {} {}", year, self.resume.name),
            self.theme.colors.dimmed.to_ratatui(),
        )))
        .alignment(Alignment::Center)
    }

    pub fn draw(&self, frame: &mut Frame) {
        let calendar = self.current_frame();
        let theme = &self.theme;
        let accent = Style::default().fg(accent_color(self.slider.current().color));

        let help_height = if self.show_help { HELP_HEIGHT } else { 0 };
        let total_height = TOP_HEIGHT
            + CALENDAR_HEIGHT
            + STATUS_HEIGHT
            + PROJECT_HEIGHT
            + help_height
            + FOOTER_HEIGHT;
        let area = Self::calculate_centered_area(frame.area(), SCREEN_WIDTH, total_height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TOP_HEIGHT),
                Constraint::Length(CALENDAR_HEIGHT),
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Length(PROJECT_HEIGHT),
                Constraint::Length(help_height),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        frame.render_widget(self.create_top_bar(theme), chunks[0]);

        // The grid is 7 columns of 4 plus spacing, centred inside its block.
        let table_area = Self::calculate_centered_area(chunks[1], 7 * 4 + 6 + 2, CALENDAR_HEIGHT);
        frame.render_widget(
            Self::create_month_table(&calendar, self.cursor, theme),
            table_area,
        );

        frame.render_widget(self.create_status(&calendar, accent), chunks[2]);
        frame.render_widget(self.create_project_panel(), chunks[3]);
        if self.show_help {
            frame.render_widget(Self::create_help_text(theme), chunks[4]);
        }
        frame.render_widget(self.create_footer(calendar.today.year()), chunks[5]);
    }

    /// Run the calendar loop until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        log::info!(
            "Calendar opened on {} with the {} theme",
            self.controller.view(),
            self.theme.name
        );

        while !self.should_exit {
            terminal.draw(|frame| self.draw(frame))?;

            if poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key, Instant::now());
                    }
                    // Resize and other events just trigger a redraw
                    _ => {}
                }
            }

            self.on_tick(Instant::now());
        }

        log::info!("Calendar closed");
        Ok(())
    }
}

/// Grid bounds of the frame the controller last rendered.
fn rendered_window(controller: &CalendarController<FrameBuffer>) -> GridWindow {
    match controller.sink().latest() {
        Some(frame) => frame.window,
        None => controller.frame().window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CalendarOptions, DEFAULT_SLIDE_INTERVAL, FixedClock, ViewMonth, default_slides,
    };
    use ratatui::backend::TestBackend;

    fn date(year: i32, month0: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month0, day).unwrap()
    }

    fn resume() -> Resume {
        let mut resume = Resume::fallback();
        resume.projects = vec![
            Project {
                name: "Reservoir Monitor".to_string(),
                time: "Jan 2024 - May 2024".to_string(),
                bullets: vec!["Charts".to_string()],
            },
            Project {
                name: "Route Planner".to_string(),
                ..Project::default()
            },
        ];
        resume
    }

    fn screen(resume: &Resume, today: CalendarDate) -> CalendarScreen<'_> {
        let controller = CalendarController::new(
            CalendarOptions::default(),
            Box::new(FixedClock::on(today)),
            FrameBuffer::default(),
        );
        let slides = Carousel::new(default_slides()).unwrap();
        let slider = Slider::new(slides, DEFAULT_SLIDE_INTERVAL, Instant::now());
        CalendarScreen::new(controller, slider, resume, Theme::default())
    }

    fn press(screen: &mut CalendarScreen<'_>, code: KeyCode) {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn cursor_starts_on_today() {
        let resume = resume();
        let screen = screen(&resume, date(2025, 11, 10));
        assert_eq!(screen.cursor(), date(2025, 11, 10));
    }

    #[test]
    fn enter_selects_cursor_cell() {
        let resume = resume();
        let mut screen = screen(&resume, date(2025, 11, 10));
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.controller().selected(), Some(date(2025, 11, 11)));
    }

    #[test]
    fn paging_months_keeps_day_of_month() {
        let resume = resume();
        let mut screen = screen(&resume, date(2025, 11, 31));
        press(&mut screen, KeyCode::PageDown);
        assert_eq!(screen.controller().view(), ViewMonth::new(2026, 0).unwrap());
        assert_eq!(screen.cursor(), date(2026, 0, 31));
        press(&mut screen, KeyCode::PageDown);
        assert_eq!(screen.cursor(), date(2026, 1, 28));
        press(&mut screen, KeyCode::Char('<'));
        assert_eq!(screen.controller().view(), ViewMonth::new(2026, 0).unwrap());
    }

    #[test]
    fn cursor_walking_off_grid_changes_month() {
        let resume = resume();
        // December 2025's grid ends on Sunday, January 11th 2026.
        let mut screen = screen(&resume, date(2025, 11, 31));
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor(), date(2026, 0, 7));
        assert_eq!(screen.controller().view(), ViewMonth::new(2025, 11).unwrap());
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor(), date(2026, 0, 14));
        assert_eq!(screen.controller().view(), ViewMonth::new(2026, 0).unwrap());
        press(&mut screen, KeyCode::Char('t'));
        assert_eq!(screen.cursor(), date(2025, 11, 31));
        assert_eq!(screen.controller().selected(), Some(date(2025, 11, 31)));
    }

    #[test]
    fn quits_on_q_and_ctrl_c() {
        let resume = resume();
        let mut screen = screen(&resume, date(2025, 11, 10));
        press(&mut screen, KeyCode::Char('q'));
        assert!(screen.should_exit());

        let mut screen = self::screen(&resume, date(2025, 11, 10));
        screen.handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(screen.should_exit());
    }

    #[test]
    fn slider_keys_step_and_pause() {
        let resume = resume();
        let mut screen = screen(&resume, date(2025, 11, 10));
        press(&mut screen, KeyCode::Char(']'));
        assert_eq!(screen.slider().index(), 1);
        press(&mut screen, KeyCode::Char('['));
        press(&mut screen, KeyCode::Char('['));
        assert_eq!(screen.slider().index(), screen.slider().len() - 1);
        press(&mut screen, KeyCode::Char('s'));
        assert!(screen.slider().is_paused());
    }

    #[test]
    fn draws_header_projects_and_footer() {
        let resume = resume();
        let mut screen = screen(&resume, date(2025, 11, 10));
        press(&mut screen, KeyCode::Char('.'));

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("December 2025"));
        assert!(text.contains("Mon"));
        assert!(text.contains("[10]"));
        assert!(text.contains("Route Planner"));
        assert!(text.contains("© 2025 Your Name"));
        assert!(text.contains("No date selected"));
    }

    #[test]
    fn cursor_and_border_use_theme_colors() {
        let resume = resume();
        let mut screen = screen(&resume, date(2025, 11, 10));
        press(&mut screen, KeyCode::Right);

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let colors = &Theme::default().colors;

        let position_of = |symbol: &str| {
            let index = buffer
                .content()
                .iter()
                .position(|cell| cell.symbol() == symbol)
                .unwrap();
            buffer.pos_of(index)
        };

        let cursor = &buffer[position_of("[")];
        assert_eq!(Some(cursor.bg), colors.cursor.to_ratatui().bg);
        assert!(cursor.modifier.contains(Modifier::UNDERLINED));

        let corner = &buffer[position_of("┌")];
        assert_eq!(Some(corner.fg), colors.border.to_ratatui().fg);
    }

    #[test]
    fn cursor_wraps_using_rendered_window() {
        let resume = resume();
        // December 2025's grid starts on Monday, December 1st.
        let mut screen = screen(&resume, date(2025, 11, 1));
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.controller().view(), ViewMonth::new(2025, 10).unwrap());
        assert_eq!(screen.cursor(), date(2025, 10, 30));
        let frame = screen.controller().sink().latest().unwrap();
        assert!(frame.window.contains(screen.cursor()));
    }

    #[test]
    fn clock_replaces_name_after_first_slide() {
        let resume = resume();
        let mut screen = screen(&resume, date(2025, 11, 10));
        press(&mut screen, KeyCode::Char(']'));

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("12:00:00"));
        assert!(text.contains("2025-12-10"));
    }
}
