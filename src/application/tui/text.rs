use crate::domain::{CalendarFrame, DayCell, RenderSink, Resume};
use std::io::{self, Write};

/// Prints each rendered month as plain text.
///
/// `[dd]` marks the selection, `<dd>` today and `(dd)` a fill day.
pub struct TextSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Hand back the writer, or the first write error.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn cell_text(cell: &DayCell) -> String {
        let day = cell.date.day();
        if cell.is_selected {
            format!("[{:>2}]", day)
        } else if cell.is_today {
            format!("<{:>2}>", day)
        } else if !cell.in_current_month {
            format!("({:>2})", day)
        } else {
            format!(" {:>2} ", day)
        }
    }

    fn write_frame(&mut self, frame: &CalendarFrame) -> io::Result<()> {
        writeln!(self.out, "{:^34}", frame.header)?;

        let header: Vec<String> = frame
            .week_header
            .iter()
            .map(|label| format!("{:>3} ", label))
            .collect();
        writeln!(self.out, "{}", header.join(" ").trim_end())?;

        for week in frame.rows() {
            let cells: Vec<String> = week.iter().map(Self::cell_text).collect();
            writeln!(self.out, "{}", cells.join(" ").trim_end())?;
        }
        Ok(())
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn render(&mut self, frame: &CalendarFrame) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_frame(frame) {
            log::warn!("Failed to print calendar: {}", e);
            self.error = Some(e);
        }
    }
}

/// Print the resume the way the page binds it: heading, contact, summary,
/// education, projects, skills.
pub fn write_resume<W: Write>(out: &mut W, resume: &Resume) -> io::Result<()> {
    writeln!(out, "=== {} ===", resume.name)?;
    if !resume.subtitle.is_empty() {
        writeln!(out, "{}", resume.subtitle)?;
    }
    let contact = resume.contact_line();
    if !contact.is_empty() {
        writeln!(out, "{}", contact.join(" | "))?;
    }
    if !resume.summary.is_empty() {
        writeln!(out, "\n{}", resume.summary)?;
    }

    if !resume.education.is_empty() {
        writeln!(out, "\nEDUCATION")?;
        for education in &resume.education {
            writeln!(out, "  {} — {}", education.school, education.degree)?;
        }
    }

    if !resume.projects.is_empty() {
        writeln!(out, "\nPROJECTS")?;
        for project in &resume.projects {
            writeln!(out, "  {} ({})", project.name, project.time)?;
            for bullet in &project.bullets {
                writeln!(out, "    • {}", bullet)?;
            }
        }
    }

    let skills = &resume.skills;
    if !skills.is_empty() {
        writeln!(out, "\nSKILLS")?;
        for (label, values) in [
            ("Languages", &skills.languages),
            ("Frameworks", &skills.frameworks),
            ("Tools", &skills.tools),
        ] {
            if !values.is_empty() {
                writeln!(out, "  {}: {}", label, values.join(", "))?;
            }
        }
    }

    if !resume.resume_url.is_empty() {
        writeln!(out, "\nFull resume: {}", resume.resume_url)?;
    }
    Ok(())
}
