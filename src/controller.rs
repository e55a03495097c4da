// src/controller.rs
//! Form controller. One [`ResumeSession`] owns the document, the transient
//! assist state, the mounted preview and the toast queue, and re-renders
//! the preview after every mutation so the exporter always captures the
//! current document.

use std::collections::VecDeque;

use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::flows;
use crate::ai::TextModel;
use crate::error::{BuilderError, Result};
use crate::export::{self, ExportArtifact, ExportMeta};
use crate::photo;
use crate::preview::{render, PreviewTheme, Stage, PREVIEW_NODE_ID};
use crate::types::{
    AiAnalysisState, EducationEntry, ExperienceEntry, ListField, PersonalDetails, ResumeData,
};
use crate::validation::validate_resume;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// One transient toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

pub struct ResumeSession<M: TextModel> {
    data: ResumeData,
    ai_state: AiAnalysisState,
    stage: Stage,
    theme: PreviewTheme,
    model: M,
    notifications: VecDeque<Notification>,
}

impl<M: TextModel> ResumeSession<M> {
    pub fn new(model: M) -> Self {
        Self::with_theme(model, PreviewTheme::default())
    }

    pub fn with_theme(model: M, theme: PreviewTheme) -> Self {
        let mut session = Self {
            data: ResumeData::default(),
            ai_state: AiAnalysisState::default(),
            stage: Stage::new(),
            theme,
            model,
            notifications: VecDeque::new(),
        };
        session.rerender();
        session
    }

    /// Replace the whole document, e.g. when loading from a file.
    pub fn load(&mut self, data: ResumeData) {
        self.data = data;
        self.rerender();
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    pub fn ai_state(&self) -> &AiAnalysisState {
        &self.ai_state
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    fn rerender(&mut self) {
        let tree = render(&self.data, &self.theme);
        self.stage.mount(PREVIEW_NODE_ID, tree);
    }

    fn notify(&mut self, kind: NotificationKind, title: &str, message: String) {
        self.notifications.push_back(Notification {
            kind,
            title: title.to_string(),
            message,
        });
    }

    /// Drain the pending toasts, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // Document mutations. Each one re-renders the mounted preview.

    pub fn update_personal_details(&mut self, details: PersonalDetails) {
        // Raw photo bytes only travel through upload_photo.
        let photo = self.data.personal_details.photo.take();
        let preview = self.data.personal_details.photo_preview.take();
        self.data.personal_details = details;
        if self.data.personal_details.photo.is_none() {
            self.data.personal_details.photo = photo;
            self.data.personal_details.photo_preview = preview;
        }
        self.rerender();
    }

    pub fn update_objective(&mut self, objective: String) {
        self.data.objective = objective;
        self.rerender();
    }

    pub fn set_job_description(&mut self, text: String) {
        self.ai_state.job_description = text;
    }

    pub fn upload_photo(&mut self, bytes: Vec<u8>) -> Result<()> {
        let format = photo::validate_photo(&bytes)?;
        self.data.personal_details.photo_preview =
            Some(photo::preview_data_url(&bytes, format));
        self.data.personal_details.photo = Some(bytes);
        self.rerender();
        Ok(())
    }

    pub fn remove_photo(&mut self) {
        self.data.personal_details.photo = None;
        self.data.personal_details.photo_preview = None;
        self.rerender();
    }

    pub fn add_education(&mut self) -> Uuid {
        let entry = EducationEntry::empty();
        let id = entry.id;
        self.data.professional_details.education.push(entry);
        self.rerender();
        id
    }

    pub fn update_education(&mut self, id: Uuid, mut entry: EducationEntry) -> Result<()> {
        let slot = self
            .data
            .professional_details
            .education
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(BuilderError::UnknownEntry {
                kind: "education",
                id,
            })?;
        entry.id = id;
        *slot = entry;
        self.rerender();
        Ok(())
    }

    pub fn remove_education(&mut self, id: Uuid) -> Result<()> {
        let education = &mut self.data.professional_details.education;
        let before = education.len();
        education.retain(|e| e.id != id);
        if education.len() == before {
            return Err(BuilderError::UnknownEntry {
                kind: "education",
                id,
            });
        }
        self.rerender();
        Ok(())
    }

    pub fn add_experience(&mut self) -> Uuid {
        let entry = ExperienceEntry::empty();
        let id = entry.id;
        self.data.professional_details.experience.push(entry);
        self.rerender();
        id
    }

    pub fn update_experience(&mut self, id: Uuid, mut entry: ExperienceEntry) -> Result<()> {
        let slot = self.experience_mut(id)?;
        entry.id = id;
        *slot = entry;
        self.rerender();
        Ok(())
    }

    pub fn remove_experience(&mut self, id: Uuid) -> Result<()> {
        let experience = &mut self.data.professional_details.experience;
        let before = experience.len();
        experience.retain(|e| e.id != id);
        if experience.len() == before {
            return Err(BuilderError::UnknownEntry {
                kind: "experience",
                id,
            });
        }
        self.rerender();
        Ok(())
    }

    fn experience_mut(&mut self, id: Uuid) -> Result<&mut ExperienceEntry> {
        self.data
            .professional_details
            .experience
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(BuilderError::UnknownEntry {
                kind: "experience",
                id,
            })
    }

    pub fn add_responsibility(&mut self, exp_id: Uuid) -> Result<()> {
        self.experience_mut(exp_id)?
            .responsibilities
            .push(String::new());
        self.rerender();
        Ok(())
    }

    pub fn update_responsibility(&mut self, exp_id: Uuid, index: usize, text: String) -> Result<()> {
        let entry = self.experience_mut(exp_id)?;
        let slot = entry
            .responsibilities
            .get_mut(index)
            .ok_or(BuilderError::IndexOutOfRange(index))?;
        *slot = text;
        self.rerender();
        Ok(())
    }

    pub fn remove_responsibility(&mut self, exp_id: Uuid, index: usize) -> Result<()> {
        let entry = self.experience_mut(exp_id)?;
        if index >= entry.responsibilities.len() {
            return Err(BuilderError::IndexOutOfRange(index));
        }
        entry.responsibilities.remove(index);
        self.rerender();
        Ok(())
    }

    pub fn add_list_item(&mut self, field: ListField, item: String) {
        self.data.professional_details.list_mut(field).push(item);
        self.rerender();
    }

    pub fn update_list_item(&mut self, field: ListField, index: usize, item: String) -> Result<()> {
        let list = self.data.professional_details.list_mut(field);
        let slot = list
            .get_mut(index)
            .ok_or(BuilderError::IndexOutOfRange(index))?;
        *slot = item;
        self.rerender();
        Ok(())
    }

    pub fn remove_list_item(&mut self, field: ListField, index: usize) -> Result<()> {
        let list = self.data.professional_details.list_mut(field);
        if index >= list.len() {
            return Err(BuilderError::IndexOutOfRange(index));
        }
        list.remove(index);
        self.rerender();
        Ok(())
    }

    pub fn replace_list(&mut self, field: ListField, items: Vec<String>) {
        *self.data.professional_details.list_mut(field) = items;
        self.rerender();
    }

    // Assist flows.

    fn experience_summary(&self) -> String {
        self.data
            .professional_details
            .experience
            .iter()
            .map(|e| {
                format!(
                    "{} at {}: {}",
                    e.role,
                    e.company,
                    e.responsibilities.join(". ")
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn objective_input(&self) -> flows::ObjectiveInput {
        let professional = &self.data.professional_details;
        let analysis = &self.ai_state.analysis_suggestions;
        flows::ObjectiveInput {
            skills: professional.skills.join(", "),
            experience: self.experience_summary(),
            strengths: professional.strengths.join(", "),
            weaknesses: professional.weaknesses.join(", "),
            job_analysis: (!analysis.is_empty()).then(|| analysis.clone()),
        }
    }

    pub async fn generate_objective(&mut self) -> Result<()> {
        if self.ai_state.is_objective_loading {
            return Err(BuilderError::OperationInFlight("objective generation"));
        }
        self.ai_state.is_objective_loading = true;

        let input = self.objective_input();
        let result = flows::generate_objective(&self.model, &input).await;
        self.ai_state.is_objective_loading = false;

        match result {
            Ok(out) => {
                self.ai_state.generated_objective = out.objective.clone();
                self.data.objective = out.objective;
                self.rerender();
                self.notify(
                    NotificationKind::Success,
                    "Objective Generated",
                    "A new objective was written from your profile.".to_string(),
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "objective generation failed");
                self.notify(
                    NotificationKind::Error,
                    "Objective Generation Failed",
                    e.to_string(),
                );
                Err(e)
            }
        }
    }

    pub async fn analyze_job_description(&mut self) -> Result<()> {
        if self.ai_state.job_description.trim().is_empty() {
            self.notify(
                NotificationKind::Error,
                "Job Description Required",
                "Paste a job description before running the analysis.".to_string(),
            );
            return Err(BuilderError::EmptyInput("job description"));
        }
        if self.ai_state.is_analysis_loading {
            return Err(BuilderError::OperationInFlight("job analysis"));
        }
        self.ai_state.is_analysis_loading = true;

        let input = flows::JobAnalysisInput {
            job_description: self.ai_state.job_description.clone(),
            resume_summary: format!(
                "Objective: {}. Skills: {}. Experience: {}",
                self.data.objective,
                self.data.professional_details.skills.join(", "),
                self.experience_summary()
            ),
        };
        let result = flows::analyze_job_description(&self.model, &input).await;
        self.ai_state.is_analysis_loading = false;

        match result {
            Ok(out) => {
                self.ai_state.analysis_suggestions = out.suggestions;
                self.notify(
                    NotificationKind::Success,
                    "Analysis Complete",
                    "Tailoring suggestions are ready.".to_string(),
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "job analysis failed");
                self.notify(NotificationKind::Error, "Analysis Failed", e.to_string());
                Err(e)
            }
        }
    }

    fn enhancement_input(&mut self, exp_id: Uuid, index: usize) -> Result<flows::EnhanceInput> {
        let entry = self.experience_mut(exp_id)?;
        let role = entry.role.clone();
        let responsibility = entry
            .responsibilities
            .get(index)
            .cloned()
            .ok_or(BuilderError::IndexOutOfRange(index))?;

        let analysis = &self.ai_state.analysis_suggestions;
        Ok(flows::EnhanceInput {
            responsibility,
            role: (!role.is_empty()).then_some(role),
            job_analysis: (!analysis.is_empty()).then(|| analysis.clone()),
        })
    }

    /// Run the enhancement flow for one responsibility. Suggestions are
    /// returned to the caller; nothing changes until one is applied.
    pub async fn enhance_responsibility(
        &mut self,
        exp_id: Uuid,
        index: usize,
    ) -> Result<Vec<String>> {
        let input = match self.enhancement_input(exp_id, index) {
            Ok(input) => input,
            Err(e) => {
                self.notify(NotificationKind::Error, "Enhancement Failed", e.to_string());
                return Err(e);
            }
        };

        match flows::enhance_responsibility(&self.model, &input).await {
            Ok(out) => {
                self.notify(
                    NotificationKind::Success,
                    "Suggestions Ready",
                    format!(
                        "{} suggestion(s) for this responsibility.",
                        out.suggested_responsibilities.len()
                    ),
                );
                Ok(out.suggested_responsibilities)
            }
            Err(e) => {
                warn!(error = %e, "responsibility enhancement failed");
                self.notify(NotificationKind::Error, "Enhancement Failed", e.to_string());
                Err(e)
            }
        }
    }

    pub fn apply_enhancement(&mut self, exp_id: Uuid, index: usize, text: String) -> Result<()> {
        self.update_responsibility(exp_id, index, text)
    }

    // Export.

    pub fn export(&mut self) -> Result<ExportArtifact> {
        let errors = validate_resume(&self.data);
        if !errors.is_empty() {
            self.notify(
                NotificationKind::Error,
                "Validation Failed",
                format!("{} field(s) need attention before exporting.", errors.len()),
            );
            return Err(BuilderError::Validation(errors));
        }
        if self.ai_state.is_objective_loading || self.ai_state.is_analysis_loading {
            return Err(BuilderError::OperationInFlight("an assist flow"));
        }

        self.rerender();
        let meta = ExportMeta {
            subject_name: self.data.personal_details.name.clone(),
        };
        match export::export_pdf(&mut self.stage, PREVIEW_NODE_ID, &meta) {
            Ok(artifact) => {
                info!(filename = %artifact.filename, pages = artifact.page_count, "resume exported");
                self.notify(
                    NotificationKind::Success,
                    "Resume Exported",
                    format!("Saved as {}.", artifact.filename),
                );
                Ok(artifact)
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.notify(NotificationKind::Error, "Export Failed", e.to_string());
                Err(e)
            }
        }
    }
}
