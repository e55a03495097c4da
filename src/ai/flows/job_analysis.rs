// src/ai/flows/job_analysis.rs
//! Compares a pasted job description against the current resume and returns
//! tailoring suggestions as one block of text.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::client::{parse_model_json, TextModel};
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct JobAnalysisInput {
    pub job_description: String,
    /// Flattened summary of the current resume content.
    pub resume_summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobAnalysisOutput {
    pub suggestions: String,
}

fn build_prompt(input: &JobAnalysisInput) -> String {
    format!(
        "You are a career coach. Compare the candidate's resume with the job \
         description below and suggest concrete changes that would make the \
         resume a stronger match. Focus on skills to highlight, phrasing to \
         adjust and gaps to address.\n\n\
         Job description:\n{}\n\n\
         Resume summary:\n{}\n\n\
         Respond with JSON only, in the form {{\"suggestions\": \"...\"}}.",
        input.job_description, input.resume_summary
    )
}

pub async fn analyze_job_description<M: TextModel>(
    model: &M,
    input: &JobAnalysisInput,
) -> Result<JobAnalysisOutput> {
    let prompt = build_prompt(input);
    debug!(
        description_len = input.job_description.len(),
        "analyzing job description"
    );
    let reply = model.complete(&prompt).await?;
    parse_model_json(&reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::StubModel;

    #[tokio::test]
    async fn test_analyze_parses_suggestions() {
        let model = StubModel::replying("{\"suggestions\": \"Lead with Rust experience.\"}");
        let out = analyze_job_description(
            &model,
            &JobAnalysisInput {
                job_description: "Senior Rust engineer".into(),
                resume_summary: "Skills: Rust".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(out.suggestions, "Lead with Rust experience.");
    }

    #[test]
    fn test_prompt_contains_both_sides() {
        let prompt = build_prompt(&JobAnalysisInput {
            job_description: "the job text".into(),
            resume_summary: "the resume text".into(),
        });
        assert!(prompt.contains("the job text"));
        assert!(prompt.contains("the resume text"));
    }
}
