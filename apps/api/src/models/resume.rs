use serde::{Deserialize, Serialize};

/// A persisted resume record. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub template_id: String,
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<LanguageProficiency>,
}

/// Creation payload: the resume shape without `id`.
/// Collections default to empty when a client sends a partial draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResumeDraft {
    pub title: String,
    pub template_id: String,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub languages: Vec<LanguageProficiency>,
}

/// Partial update. Each present field replaces the stored one wholesale;
/// collections are never diffed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResumePatch {
    pub title: Option<String>,
    pub template_id: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub skills: Option<Vec<SkillCategory>>,
    pub projects: Option<Vec<Project>>,
    pub certifications: Option<Vec<Certification>>,
    pub languages: Option<Vec<LanguageProficiency>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// Cleared on normalization when `current` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub current: bool,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SkillCategory {
    pub id: String,
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageProficiency {
    pub id: String,
    pub language: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Proficiency {
    Basic,
    Conversational,
    Fluent,
    Native,
}

impl Proficiency {
    pub const ALL: [&'static str; 4] = ["Basic", "Conversational", "Fluent", "Native"];
}

impl Resume {
    pub fn from_draft(id: String, draft: ResumeDraft) -> Self {
        Resume {
            id,
            title: draft.title,
            template_id: draft.template_id,
            personal_info: draft.personal_info,
            experience: draft.experience,
            education: draft.education,
            skills: draft.skills,
            projects: draft.projects,
            certifications: draft.certifications,
            languages: draft.languages,
        }
    }
}

impl ResumeDraft {
    /// An ongoing entry has no end date: `current` wins over `endDate`.
    pub fn normalize(mut self) -> Self {
        for entry in &mut self.experience {
            entry.normalize();
        }
        for entry in &mut self.education {
            entry.normalize();
        }
        self
    }
}

impl ResumePatch {
    pub fn normalize(mut self) -> Self {
        for entry in self.experience.iter_mut().flatten() {
            entry.normalize();
        }
        for entry in self.education.iter_mut().flatten() {
            entry.normalize();
        }
        self
    }

    /// Overwrites exactly the fields present in the patch.
    pub fn apply_to(self, resume: &mut Resume) {
        if let Some(title) = self.title {
            resume.title = title;
        }
        if let Some(template_id) = self.template_id {
            resume.template_id = template_id;
        }
        if let Some(personal_info) = self.personal_info {
            resume.personal_info = personal_info;
        }
        if let Some(experience) = self.experience {
            resume.experience = experience;
        }
        if let Some(education) = self.education {
            resume.education = education;
        }
        if let Some(skills) = self.skills {
            resume.skills = skills;
        }
        if let Some(projects) = self.projects {
            resume.projects = projects;
        }
        if let Some(certifications) = self.certifications {
            resume.certifications = certifications;
        }
        if let Some(languages) = self.languages {
            resume.languages = languages;
        }
    }
}

impl Experience {
    fn normalize(&mut self) {
        if self.current {
            self.end_date = None;
        }
    }
}

impl Education {
    fn normalize(&mut self) {
        if self.current {
            self.end_date = None;
        }
    }
}
