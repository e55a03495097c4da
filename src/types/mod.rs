pub mod resume;

pub use resume::{
    AiAnalysisState, EducationEntry, ExperienceEntry, ListField, PersonalDetails,
    ProfessionalDetails, ResumeData,
};
