// src/types/resume.rs
//! Resume document model - the sole in-memory entity edited by the form
//! controller. Created empty at session start, discarded with the session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    /// Raw upload bytes, kept so the photo survives theme/preview changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<u8>>,
    /// Data-URL preview string shown next to the upload control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_preview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Session-local identifier, used only for list keying.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub graduation_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl EducationEntry {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            institution: String::new(),
            degree: String::new(),
            graduation_year: String::new(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Session-local identifier, used only for list keying.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub duration: String,
    /// Ordered; index positions are part of the controller contract.
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

impl ExperienceEntry {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            company: String::new(),
            role: String::new(),
            duration: String::new(),
            responsibilities: vec![String::new()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalDetails {
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub personal_details: PersonalDetails,
    #[serde(default)]
    pub professional_details: ProfessionalDetails,
    #[serde(default)]
    pub objective: String,
}

/// Flat string list fields of the professional section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListField {
    Skills,
    Strengths,
    Weaknesses,
    Achievements,
}

impl ListField {
    pub fn name(&self) -> &'static str {
        match self {
            ListField::Skills => "skills",
            ListField::Strengths => "strengths",
            ListField::Weaknesses => "weaknesses",
            ListField::Achievements => "achievements",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "skills" => Some(ListField::Skills),
            "strengths" => Some(ListField::Strengths),
            "weaknesses" => Some(ListField::Weaknesses),
            "achievements" => Some(ListField::Achievements),
            _ => None,
        }
    }
}

impl ProfessionalDetails {
    pub fn list(&self, field: ListField) -> &Vec<String> {
        match field {
            ListField::Skills => &self.skills,
            ListField::Strengths => &self.strengths,
            ListField::Weaknesses => &self.weaknesses,
            ListField::Achievements => &self.achievements,
        }
    }

    pub fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Skills => &mut self.skills,
            ListField::Strengths => &mut self.strengths,
            ListField::Weaknesses => &mut self.weaknesses,
            ListField::Achievements => &mut self.achievements,
        }
    }
}

/// Transient UI state for the AI assist flows. Not part of the exported
/// document; the loading flags gate duplicate triggers and the export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiAnalysisState {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub generated_objective: String,
    #[serde(default)]
    pub analysis_suggestions: String,
    #[serde(default)]
    pub is_objective_loading: bool,
    #[serde(default)]
    pub is_analysis_loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let data = ResumeData::default();
        assert!(data.personal_details.name.is_empty());
        assert!(data.professional_details.experience.is_empty());
        assert!(data.objective.is_empty());

        let ai = AiAnalysisState::default();
        assert!(!ai.is_objective_loading);
        assert!(!ai.is_analysis_loading);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = ExperienceEntry::empty();
        let b = ExperienceEntry::empty();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_resume_data_from_toml() {
        let text = r#"
            objective = "Build things."

            [personal_details]
            name = "Jane Q. Doe"
            email = "jane@example.com"

            [professional_details]
            skills = ["Rust", "SQL"]

            [[professional_details.experience]]
            company = "Acme"
            role = "Engineer"
            duration = "2020 - 2024"
            responsibilities = ["Shipped the widget pipeline"]
        "#;

        let data: ResumeData = toml::from_str(text).expect("parse resume toml");
        assert_eq!(data.personal_details.name, "Jane Q. Doe");
        assert_eq!(data.professional_details.skills.len(), 2);
        assert_eq!(data.professional_details.experience[0].company, "Acme");
    }
}
