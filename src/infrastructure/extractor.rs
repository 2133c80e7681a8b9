use crate::domain::{Contact, DEFAULT_RESUME_URL, Education, Project, Resume, Skills};
use anyhow::{Context, Result};
use chrono::Utc;
use regex::Regex;
use std::path::Path;

const CONTACT_SCAN_LINES: usize = 8;
const MAX_EDUCATION: usize = 2;
const MAX_PROJECTS: usize = 6;

const BULLET_PREFIXES: [char; 6] = ['■', '◼', '•', '-', '–', '—'];
const HEADER_TRIM: [char; 5] = [' ', '-', '–', '—', '\t'];

const MONTHS: &str = "Jan|January|Feb|February|Mar|March|Apr|April|May|Jun|June|Jul|July|\
                      Aug|August|Sep|Sept|September|Oct|October|Nov|November|Dec|December";

// ============================================================================
// Resume extractor
// ============================================================================

/// Turns the plain text of a one-page resume into a [`Resume`].
///
/// The text is expected to start with the name, carry a `|`-separated contact
/// line near the top, and use `SUMMARY`, `EDUCATION`, `PROJECTS` and
/// `TECHNICAL SKILLS` headings. Missing sections come out empty.
pub struct ResumeExtractor {
    month: Regex,
    year: Regex,
    phone: Regex,
    camel_break: Regex,
    school: Regex,
    degree: Regex,
    spaces: Regex,
    skills: SkillLabels,
}

struct SkillLabels {
    languages: Regex,
    frameworks: Regex,
    databases: Regex,
    cloud: Regex,
    tools: Regex,
}

fn skill_label(label: &str) -> Result<Regex> {
    // `.` stops at the end of the line
    Ok(Regex::new(&format!(r"(?i)(?:{})\s*:\s*(.+)", label))?)
}

impl ResumeExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            month: Regex::new(&format!(r"(?i)\b({})\b", MONTHS))?,
            year: Regex::new(r"\b(19|20)\d{2}\b")?,
            phone: Regex::new(r"\+?\d[\d\s-]{8,}")?,
            camel_break: Regex::new(r"([a-z])([A-Z])")?,
            school: Regex::new(r"\b(University|College|Institute)\b")?,
            degree: Regex::new(r"(?i)\b(Master|Bachelor|PhD|Doctor)\b")?,
            spaces: Regex::new(r"\s{2,}")?,
            skills: SkillLabels {
                languages: skill_label("Languages")?,
                frameworks: skill_label(
                    r"Frameworks\s*&\s*Libraries|Frameworks\s*/\s*Libraries|Frameworks",
                )?,
                databases: skill_label(r"Databases\s*&\s*Caching|Databases")?,
                cloud: skill_label(r"Cloud\s*&\s*DevOps|Cloud")?,
                tools: skill_label(r"Tools\s*&\s*Testing|Tools")?,
            },
        })
    }

    /// Read a text file and extract it, stamping the source and time.
    pub fn extract_file(&self, path: &Path) -> Result<Resume> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut resume = self.extract(&text);
        resume.generated_at = Some(Utc::now().to_rfc3339());
        resume.source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        log::info!(
            "Extracted {} education and {} project entries from {}",
            resume.education.len(),
            resume.projects.len(),
            path.display()
        );
        Ok(resume)
    }

    pub fn extract(&self, text: &str) -> Resume {
        let text = text.replace('\u{a0}', " ");
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let summary_at = find_heading(&lines, "SUMMARY");
        let education_at = find_heading(&lines, "EDUCATION");
        let projects_at = find_heading(&lines, "PROJECTS");
        let skills_at = find_heading(&lines, "TECHNICAL SKILLS");

        Resume {
            name: self.split_name(lines.first().copied().unwrap_or("Your Name")),
            summary: section(&lines, summary_at, education_at).join(" "),
            resume_url: DEFAULT_RESUME_URL.to_string(),
            contact: self.parse_contact(&lines),
            education: self.parse_education(&section(&lines, education_at, projects_at)),
            projects: self.parse_projects(&section(&lines, projects_at, skills_at)),
            skills: self.parse_skills(&section(&lines, skills_at, None)),
            ..Resume::default()
        }
    }

    /// "AdaLovelace" -> "Ada Lovelace". Names with a space are kept.
    fn split_name(&self, name: &str) -> String {
        if !name.contains(' ') && self.camel_break.is_match(name) {
            self.camel_break.replace_all(name, "$1 $2").trim().to_string()
        } else {
            name.trim().to_string()
        }
    }

    fn parse_contact(&self, lines: &[&str]) -> Contact {
        let mut contact = Contact::default();
        let Some(line) = lines
            .iter()
            .take(CONTACT_SCAN_LINES)
            .find(|line| line.contains('|'))
        else {
            return contact;
        };

        for part in line.split('|').map(str::trim) {
            if part.contains('@') {
                contact.email = part.to_string();
            } else if part.contains("linkedin.com") {
                contact.linkedin = part.to_string();
            } else if self.phone.is_match(part) {
                contact.phone = part.replace(' ', "");
            } else {
                contact.location = part.to_string();
            }
        }
        contact
    }

    fn parse_education(&self, lines: &[&str]) -> Vec<Education> {
        let mut groups: Vec<Vec<&str>> = Vec::new();

        for &line in lines {
            // Degree lines often name the school too
            let starts_school = self.school.is_match(line) && !self.degree.is_match(line);
            match groups.last_mut() {
                Some(group) if !starts_school => group.push(line),
                _ => groups.push(vec![line]),
            }
        }

        groups
            .into_iter()
            .take(MAX_EDUCATION)
            .map(|group| Education {
                school: self.collapse_spaces(group[0]),
                degree: self.collapse_spaces(&group[1..].join(" ")),
            })
            .collect()
    }

    fn parse_projects(&self, lines: &[&str]) -> Vec<Project> {
        let mut projects: Vec<Project> = Vec::new();

        for &line in lines {
            let is_bullet = line.starts_with(BULLET_PREFIXES);

            // "Name  Jan 2024 - May 2024": everything before the month is the name
            if !is_bullet && self.year.is_match(line) {
                if let Some(month) = self.month.find(line) {
                    projects.push(Project {
                        name: line[..month.start()].trim_matches(HEADER_TRIM).to_string(),
                        time: line[month.start()..].trim().to_string(),
                        bullets: Vec::new(),
                    });
                    continue;
                }
            }

            let Some(project) = projects.last_mut() else {
                continue;
            };
            if is_bullet {
                let bullet = line.trim_start_matches(BULLET_PREFIXES).trim();
                project.bullets.push(bullet.to_string());
            } else if let Some(last) = project.bullets.last_mut() {
                *last = format!("{} {}", last, line).trim().to_string();
            }
        }

        projects.truncate(MAX_PROJECTS);
        for project in &mut projects {
            project.bullets.retain(|bullet| !bullet.trim().is_empty());
        }
        projects
    }

    fn parse_skills(&self, lines: &[&str]) -> Skills {
        let text = lines.join("\n");
        let grab = |label: &Regex| -> Vec<String> {
            label
                .captures(&text)
                .and_then(|captures| captures.get(1))
                .map(|value| {
                    value
                        .as_str()
                        .split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut tools = grab(&self.skills.databases);
        tools.extend(grab(&self.skills.cloud));
        tools.extend(grab(&self.skills.tools));

        Skills {
            languages: grab(&self.skills.languages),
            frameworks: grab(&self.skills.frameworks),
            tools,
        }
    }

    fn collapse_spaces(&self, value: &str) -> String {
        self.spaces.replace_all(value.trim(), " ").into_owned()
    }
}

/// Uppercase letters and digits only, so "Technical Skills:" matches.
fn normalize_heading(line: &str) -> String {
    line.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

fn find_heading(lines: &[&str], heading: &str) -> Option<usize> {
    let target = normalize_heading(heading);
    lines
        .iter()
        .position(|line| normalize_heading(line) == target)
}

/// Lines after the heading at `start`, up to the next heading or the end.
fn section<'a>(lines: &[&'a str], start: Option<usize>, end: Option<usize>) -> Vec<&'a str> {
    let Some(start) = start else {
        return Vec::new();
    };
    let end = end.unwrap_or(lines.len());
    lines
        .get(start + 1..end)
        .map(<[&str]>::to_vec)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RESUME_TEXT: &str = "\
AdaLovelace
London, UK | +44 20 7946 0958 | ada@example.com | linkedin.com/in/ada
Summary
Engineer who builds engines.
Writes the first programs.
EDUCATION
University of London London, UK
Master of Mathematics, Royal Institute
Cambridge College
Bachelor of Arts
Third College Of Elsewhere
PROJECTS
Analytical Engine Jan 2024 – May 2024
■ Designed the mill
and the store together
• Shipped in May 2024
Difference Engine — Sep 2023 - Dec 2023
- Printed tables
Technical Skills:
■ Languages: Rust, Python,  SQL
■ Frameworks & Libraries: Axum, ratatui
■ Databases & Caching: PostgreSQL, Redis
■ Cloud & DevOps: AWS
■ Tools & Testing: Git, cargo-nextest
";

    fn extract(text: &str) -> Resume {
        ResumeExtractor::new().unwrap().extract(text)
    }

    #[test]
    fn splits_joined_name() {
        let extractor = ResumeExtractor::new().unwrap();
        assert_eq!(extractor.split_name("AdaLovelace"), "Ada Lovelace");
        assert_eq!(extractor.split_name("Ada Lovelace"), "Ada Lovelace");
        assert_eq!(extractor.split_name("ada"), "ada");
        assert_eq!(extract(RESUME_TEXT).name, "Ada Lovelace");
    }

    #[test]
    fn classifies_contact_line() {
        let contact = extract(RESUME_TEXT).contact;
        assert_eq!(contact.location, "London, UK");
        assert_eq!(contact.phone, "+442079460958");
        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(contact.linkedin, "linkedin.com/in/ada");
        assert!(contact.github.is_empty());
    }

    #[test]
    fn contact_line_must_be_near_the_top() {
        let mut text = String::from("Ada\n");
        for i in 0..8 {
            text.push_str(&format!("line {}\n", i));
        }
        text.push_str("ada@example.com | London\n");
        assert_eq!(extract(&text).contact, Contact::default());
    }

    #[test]
    fn finds_sections_by_normalized_heading() {
        let resume = extract(RESUME_TEXT);
        assert_eq!(
            resume.summary,
            "Engineer who builds engines. Writes the first programs."
        );
        assert_eq!(resume.resume_url, "./resume.pdf");
        assert!(resume.generated_at.is_none());
    }

    #[test]
    fn degree_line_does_not_start_a_school() {
        let education = extract(RESUME_TEXT).education;
        assert_eq!(education.len(), 2);
        assert_eq!(education[0].school, "University of London London, UK");
        assert_eq!(education[0].degree, "Master of Mathematics, Royal Institute");
        assert_eq!(education[1].school, "Cambridge College");
        assert_eq!(education[1].degree, "Bachelor of Arts");
    }

    #[test]
    fn project_headers_bullets_and_continuations() {
        let projects = extract(RESUME_TEXT).projects;
        assert_eq!(projects.len(), 2);

        assert_eq!(projects[0].name, "Analytical Engine");
        assert_eq!(projects[0].time, "Jan 2024 – May 2024");
        assert_eq!(
            projects[0].bullets,
            vec!["Designed the mill and the store together", "Shipped in May 2024"]
        );

        assert_eq!(projects[1].name, "Difference Engine");
        assert_eq!(projects[1].time, "Sep 2023 - Dec 2023");
        assert_eq!(projects[1].bullets, vec!["Printed tables"]);
    }

    #[test]
    fn keeps_at_most_six_projects() {
        let mut text = String::from("Ada\nPROJECTS\n");
        for i in 0..8 {
            text.push_str(&format!("Project {} Mar 2020\n- bullet\n", i));
        }
        let projects = extract(&text).projects;
        assert_eq!(projects.len(), 6);
        assert_eq!(projects[5].name, "Project 5");
    }

    #[test]
    fn merges_databases_and_cloud_into_tools() {
        let skills = extract(RESUME_TEXT).skills;
        assert_eq!(skills.languages, vec!["Rust", "Python", "SQL"]);
        assert_eq!(skills.frameworks, vec!["Axum", "ratatui"]);
        assert_eq!(
            skills.tools,
            vec!["PostgreSQL", "Redis", "AWS", "Git", "cargo-nextest"]
        );
    }

    #[test]
    fn missing_sections_are_empty() {
        let resume = extract("Grace Hopper\nCompilers and more");
        assert_eq!(resume.name, "Grace Hopper");
        assert!(resume.summary.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.projects.is_empty());
        assert!(resume.skills.is_empty());

        assert_eq!(extract("").name, "Your Name");
    }

    #[test]
    fn extract_file_stamps_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, RESUME_TEXT).unwrap();

        let resume = ResumeExtractor::new().unwrap().extract_file(&path).unwrap();
        assert_eq!(resume.source.as_deref(), Some("resume.txt"));
        assert!(resume.generated_at.is_some());

        let missing = ResumeExtractor::new()
            .unwrap()
            .extract_file(&dir.path().join("missing.txt"));
        assert!(missing.is_err());
    }
}
