// src/ai/flows/objective.rs
//! Generates the resume objective from the candidate's profile, optionally
//! targeted at a previously analyzed job description.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::client::{parse_model_json, TextModel};
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveInput {
    pub skills: String,
    pub experience: String,
    pub strengths: String,
    pub weaknesses: String,
    /// Suggestions from a prior job-description analysis, if any.
    pub job_analysis: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveOutput {
    pub objective: String,
}

fn build_prompt(input: &ObjectiveInput) -> String {
    let mut prompt = String::from(
        "You are an expert resume writer. Write a concise, compelling resume \
         objective (2-3 sentences) for a candidate with the following profile.\n\n",
    );
    prompt.push_str(&format!("Skills: {}\n", input.skills));
    prompt.push_str(&format!("Experience: {}\n", input.experience));
    prompt.push_str(&format!("Strengths: {}\n", input.strengths));
    prompt.push_str(&format!("Weaknesses: {}\n", input.weaknesses));

    if let Some(analysis) = &input.job_analysis {
        prompt.push_str(&format!(
            "\nThe candidate is applying for a specific job. Tailor the \
             objective to these points from the job description analysis:\n{}\n",
            analysis
        ));
    }

    prompt.push_str(
        "\nRespond with JSON only, in the form {\"objective\": \"...\"}. \
         Do not mention weaknesses in the objective.",
    );
    prompt
}

/// One model call; a malformed reply propagates as an error.
pub async fn generate_objective<M: TextModel>(
    model: &M,
    input: &ObjectiveInput,
) -> Result<ObjectiveOutput> {
    let prompt = build_prompt(input);
    debug!(targeted = input.job_analysis.is_some(), "generating objective");
    let reply = model.complete(&prompt).await?;
    parse_model_json(&reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::StubModel;

    fn input(job_analysis: Option<String>) -> ObjectiveInput {
        ObjectiveInput {
            skills: "Rust, SQL".into(),
            experience: "Engineer at Acme: Built services".into(),
            strengths: "focus".into(),
            weaknesses: "delegation".into(),
            job_analysis,
        }
    }

    #[test]
    fn test_prompt_targeted_variant() {
        let plain = build_prompt(&input(None));
        assert!(!plain.contains("job description analysis"));

        let targeted = build_prompt(&input(Some("Emphasize ownership.".into())));
        assert!(targeted.contains("job description analysis"));
        assert!(targeted.contains("Emphasize ownership."));
    }

    #[tokio::test]
    async fn test_generate_objective_parses_reply() {
        let model = StubModel::replying("```json\n{\"objective\": \"Seasoned engineer.\"}\n```");
        let out = generate_objective(&model, &input(None)).await.unwrap();
        assert_eq!(out.objective, "Seasoned engineer.");
    }

    #[tokio::test]
    async fn test_generate_objective_rejects_malformed_reply() {
        let model = StubModel::replying("sorry, no JSON today");
        assert!(generate_objective(&model, &input(None)).await.is_err());
    }
}
