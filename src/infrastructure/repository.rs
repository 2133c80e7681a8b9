use crate::domain::{Resume, Slide, default_slides};
use anyhow::Result;

pub trait ResumeRepository {
    fn load_resume(&self) -> Result<Resume>;
    fn save_resume(&self, resume: &Resume) -> Result<()>;
}

pub trait SlideRepository {
    fn load_slides(&self) -> Result<Vec<Slide>>;
}

/// Load the resume, falling back to the static content on any failure.
pub fn resume_or_fallback(repository: &dyn ResumeRepository) -> Resume {
    match repository.load_resume() {
        Ok(resume) => resume,
        Err(e) => {
            log::warn!("Using fallback resume content: {:#}", e);
            Resume::fallback()
        }
    }
}

/// Load the slides, falling back to the built-in table on any failure.
pub fn slides_or_default(repository: &dyn SlideRepository) -> Vec<Slide> {
    match repository.load_slides() {
        Ok(slides) => slides,
        Err(e) => {
            log::warn!("Using built-in slides: {:#}", e);
            default_slides()
        }
    }
}
