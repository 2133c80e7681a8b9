use serde::{Deserialize, Serialize};

pub const DEFAULT_RESUME_URL: &str = "./resume.pdf";

// ============================================================================
// Resume document
// ============================================================================

/// The resume JSON document bound into the page. Every field is optional
/// on disk and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    #[serde(rename = "generated_at", skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub name: String,
    pub subtitle: String,
    pub summary: String,
    pub resume_url: String,
    pub contact: Contact,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub skills: Skills,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    /// Free-form date range, e.g. "Jan 2024 – May 2024".
    pub time: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
}

impl Resume {
    /// Statically authored content shown when the document can't be loaded.
    pub fn fallback() -> Self {
        Self {
            name: "Your Name".to_string(),
            subtitle: "Software Engineer".to_string(),
            summary: "Resume details are not available right now.".to_string(),
            resume_url: DEFAULT_RESUME_URL.to_string(),
            ..Self::default()
        }
    }

    /// Non-empty contact fields in display order.
    pub fn contact_line(&self) -> Vec<&str> {
        let contact = &self.contact;
        [
            contact.email.as_str(),
            contact.phone.as_str(),
            contact.location.as_str(),
            contact.linkedin.as_str(),
            contact.github.as_str(),
        ]
        .into_iter()
        .filter(|field| !field.trim().is_empty())
        .collect()
    }
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.frameworks.is_empty() && self.tools.is_empty()
    }
}
