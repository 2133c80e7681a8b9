use crate::domain::{Resume, Slide, default_slides};
use crate::infrastructure::{ResumeRepository, SlideRepository};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// Reads the resume and slide documents from JSON files.
pub struct FileSystemRepository {
    resume_path: PathBuf,
    slides_path: Option<PathBuf>,
}

impl FileSystemRepository {
    pub fn new(resume_path: PathBuf) -> Self {
        Self {
            resume_path,
            slides_path: None,
        }
    }

    pub fn with_slides(resume_path: PathBuf, slides_path: Option<PathBuf>) -> Self {
        Self {
            resume_path,
            slides_path,
        }
    }
}

impl ResumeRepository for FileSystemRepository {
    fn load_resume(&self) -> Result<Resume> {
        let content = std::fs::read_to_string(&self.resume_path)
            .with_context(|| format!("Failed to read {}", self.resume_path.display()))?;
        let resume = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.resume_path.display()))?;
        log::info!("Loaded resume from {}", self.resume_path.display());
        Ok(resume)
    }

    fn save_resume(&self, resume: &Resume) -> Result<()> {
        if let Some(parent) = self.resume_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(resume).context("Failed to encode resume")?;
        std::fs::write(&self.resume_path, json)
            .with_context(|| format!("Failed to write {}", self.resume_path.display()))?;
        log::info!("Saved resume to {}", self.resume_path.display());
        Ok(())
    }
}

impl SlideRepository for FileSystemRepository {
    fn load_slides(&self) -> Result<Vec<Slide>> {
        let Some(path) = &self.slides_path else {
            return Ok(default_slides());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let slides: Vec<Slide> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if slides.is_empty() {
            bail!("{} contains no slides", path.display());
        }
        Ok(slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Accent;
    use crate::infrastructure::{resume_or_fallback, slides_or_default};
    use tempfile::TempDir;

    #[test]
    fn loads_resume_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.json");
        std::fs::write(&path, r#"{"name": "Grace Hopper", "projects": [{"name": "COBOL"}]}"#)
            .unwrap();

        let repository = FileSystemRepository::new(path);
        let resume = repository.load_resume().unwrap();
        assert_eq!(resume.name, "Grace Hopper");
        assert_eq!(resume.projects[0].name, "COBOL");
    }

    #[test]
    fn saved_resume_loads_back() {
        let dir = TempDir::new().unwrap();
        let repository = FileSystemRepository::new(dir.path().join("nested").join("resume.json"));

        let mut resume = Resume::fallback();
        resume.name = "Grace Hopper".to_string();
        resume.generated_at = Some("2025-01-01T00:00:00+00:00".to_string());
        repository.save_resume(&resume).unwrap();

        assert_eq!(repository.load_resume().unwrap(), resume);
        let json = std::fs::read_to_string(dir.path().join("nested").join("resume.json")).unwrap();
        assert!(json.contains("\"resumeUrl\""));
        assert!(json.contains("\"generated_at\""));
    }

    #[test]
    fn missing_resume_falls_back() {
        let dir = TempDir::new().unwrap();
        let repository = FileSystemRepository::new(dir.path().join("missing.json"));
        assert!(repository.load_resume().is_err());
        assert_eq!(resume_or_fallback(&repository), Resume::fallback());
    }

    #[test]
    fn malformed_resume_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repository = FileSystemRepository::new(path);
        let err = repository.load_resume().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
        assert_eq!(resume_or_fallback(&repository), Resume::fallback());
    }

    #[test]
    fn slides_default_without_path() {
        let dir = TempDir::new().unwrap();
        let repository = FileSystemRepository::new(dir.path().join("resume.json"));
        assert_eq!(repository.load_slides().unwrap(), default_slides());
    }

    #[test]
    fn loads_custom_slides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slides.json");
        std::fs::write(
            &path,
            r##"[{"url": "./images/sea.jpg", "title": "Sea", "color": "#2196f3"}]"##,
        )
        .unwrap();

        let repository =
            FileSystemRepository::with_slides(dir.path().join("resume.json"), Some(path));
        let slides = repository.load_slides().unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].color, Accent::new(0x21, 0x96, 0xf3));
    }

    #[test]
    fn empty_slide_list_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slides.json");
        std::fs::write(&path, "[]").unwrap();

        let repository =
            FileSystemRepository::with_slides(dir.path().join("resume.json"), Some(path));
        assert!(repository.load_slides().is_err());
        assert_eq!(slides_or_default(&repository), default_slides());
    }
}
