use crate::application::Config;
use crate::application::tui::{CalendarScreen, TerminalSession, TextSink, Theme, write_resume};
use crate::domain::{
    CalendarController, Carousel, Clock, FrameBuffer, RenderSink, Resume, Slide, Slider,
    SystemClock, ViewMonth, default_slides,
};
use crate::infrastructure::{
    FileSystemRepository, ResumeExtractor, ResumeRepository, resume_or_fallback,
    slides_or_default,
};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

pub struct FolioApp {
    config: Config,
    resume: Resume,
    slides: Vec<Slide>,
}

impl FolioApp {
    pub fn new(config: Config) -> Self {
        let repository = FileSystemRepository::with_slides(
            config.resume_path.clone(),
            config.slides_path.clone(),
        );
        let resume = resume_or_fallback(&repository);
        let slides = slides_or_default(&repository);

        Self {
            config,
            resume,
            slides,
        }
    }

    /// Use an already loaded resume, e.g. one given on the command line.
    pub fn with_resume(config: Config, resume: Resume) -> Self {
        Self {
            config,
            resume,
            slides: default_slides(),
        }
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    fn controller<S: RenderSink>(
        &self,
        clock: Box<dyn Clock>,
        sink: S,
        month: Option<ViewMonth>,
    ) -> CalendarController<S> {
        let mut controller = CalendarController::new(self.config.calendar_options(), clock, sink);
        if let Some(month) = month {
            controller.go_to_month(month);
        }
        controller
    }

    pub fn run_tui(&self, month: Option<ViewMonth>) -> Result<()> {
        let controller = self.controller(Box::new(SystemClock), FrameBuffer::default(), month);

        let slides = Carousel::new(self.slides.clone())
            .or_else(|| Carousel::new(default_slides()))
            .context("No slides available")?;
        let slider = Slider::new(slides, self.config.slide_interval, Instant::now());

        let mut screen = CalendarScreen::new(
            controller,
            slider,
            &self.resume,
            Theme::by_name(&self.config.theme),
        );

        let mut session = TerminalSession::enter()?;
        let result = screen.run(session.terminal());
        session.restore()?;
        result
    }

    /// Print one month as text, without a terminal UI.
    pub fn print_month<W: Write>(
        &self,
        clock: Box<dyn Clock>,
        month: Option<ViewMonth>,
        out: W,
    ) -> Result<W> {
        let controller = self.controller(clock, FrameBuffer::default(), month);

        // Only the final state is printed.
        let mut sink = TextSink::new(out);
        sink.render(&controller.frame());
        sink.finish().context("Failed to print calendar")
    }

    pub fn print_resume<W: Write>(&self, out: &mut W) -> Result<()> {
        write_resume(out, &self.resume).context("Failed to print resume")
    }
}

/// Resume fields the extracted text doesn't carry.
#[derive(Debug, Default)]
pub struct ExtractOverrides {
    pub subtitle: Option<String>,
    pub github: Option<String>,
}

/// Extract a resume from plain text and save it as JSON at `output`.
pub fn extract_resume(input: &Path, output: &Path, overrides: ExtractOverrides) -> Result<Resume> {
    let mut resume = ResumeExtractor::new()?.extract_file(input)?;
    if let Some(subtitle) = overrides.subtitle {
        resume.subtitle = subtitle;
    }
    if let Some(github) = overrides.github {
        resume.contact.github = github;
    }

    FileSystemRepository::new(output.to_path_buf()).save_resume(&resume)?;
    Ok(resume)
}
