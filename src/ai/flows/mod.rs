// src/ai/flows/mod.rs
//! The three assist flows. Each flow builds one prompt, calls the model
//! through [`TextModel`](crate::ai::TextModel) and parses the reply into a
//! typed output. Flows hold no state of their own.

pub mod enhance;
pub mod job_analysis;
pub mod objective;

pub use enhance::{enhance_responsibility, EnhanceInput, EnhanceOutput};
pub use job_analysis::{analyze_job_description, JobAnalysisInput, JobAnalysisOutput};
pub use objective::{generate_objective, ObjectiveInput, ObjectiveOutput};
