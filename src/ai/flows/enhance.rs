// src/ai/flows/enhance.rs
//! Rewrites one experience responsibility into stronger phrasings.
//!
//! The flow degrades instead of failing: if the primary request yields
//! nothing usable it retries once with a simplified prompt, and if that
//! also fails the original text comes back as the sole suggestion. Callers
//! always receive at least one suggestion.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::client::{parse_model_json, TextModel};
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct EnhanceInput {
    pub responsibility: String,
    /// Role the responsibility belongs to, for context.
    pub role: Option<String>,
    /// Suggestions from a prior job-description analysis, if any.
    pub job_analysis: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnhanceOutput {
    pub suggested_responsibilities: Vec<String>,
}

#[derive(Deserialize)]
struct SecondaryReply {
    suggestion: String,
}

fn build_primary_prompt(input: &EnhanceInput) -> String {
    let mut prompt = String::from(
        "You are an expert resume writer. Rewrite the following resume \
         responsibility into 2-3 stronger, achievement-oriented variants. \
         Keep each variant to one sentence.\n\n",
    );
    if let Some(role) = &input.role {
        prompt.push_str(&format!("Role: {}\n", role));
    }
    prompt.push_str(&format!("Responsibility: {}\n", input.responsibility));
    if let Some(analysis) = &input.job_analysis {
        prompt.push_str(&format!(
            "\nWhere natural, align the variants with this job analysis:\n{}\n",
            analysis
        ));
    }
    prompt.push_str(
        "\nRespond with JSON only, in the form \
         {\"suggested_responsibilities\": [\"...\", \"...\"]}.",
    );
    prompt
}

fn build_secondary_prompt(input: &EnhanceInput) -> String {
    format!(
        "Rewrite this resume bullet point to be stronger: \"{}\". \
         Respond with JSON only, in the form {{\"suggestion\": \"...\"}}.",
        input.responsibility
    )
}

/// Always returns at least one suggestion.
pub async fn enhance_responsibility<M: TextModel>(
    model: &M,
    input: &EnhanceInput,
) -> Result<EnhanceOutput> {
    let primary = model.complete(&build_primary_prompt(input)).await;
    match primary.and_then(|reply| parse_model_json::<EnhanceOutput>(&reply)) {
        Ok(out) if !out.suggested_responsibilities.is_empty() => return Ok(out),
        Ok(_) => debug!("primary enhancement returned no suggestions"),
        Err(e) => warn!(error = %e, "primary enhancement failed, trying simplified request"),
    }

    let secondary = model.complete(&build_secondary_prompt(input)).await;
    if let Ok(reply) = secondary {
        if let Ok(parsed) = parse_model_json::<SecondaryReply>(&reply) {
            if !parsed.suggestion.trim().is_empty() {
                return Ok(EnhanceOutput {
                    suggested_responsibilities: vec![parsed.suggestion],
                });
            }
        }
    }

    warn!("enhancement fell back to the original text");
    Ok(EnhanceOutput {
        suggested_responsibilities: vec![input.responsibility.clone()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::{FailingModel, ScriptedModel, StubModel};

    fn input() -> EnhanceInput {
        EnhanceInput {
            responsibility: "Managed the team backlog".into(),
            role: Some("Engineering Manager".into()),
            job_analysis: None,
        }
    }

    #[tokio::test]
    async fn test_primary_success() {
        let model = StubModel::replying(
            "{\"suggested_responsibilities\": [\"Owned backlog triage\", \"Drove sprint planning\"]}",
        );
        let out = enhance_responsibility(&model, &input()).await.unwrap();
        assert_eq!(out.suggested_responsibilities.len(), 2);
    }

    #[tokio::test]
    async fn test_falls_back_to_secondary() {
        let model = ScriptedModel::new(vec![
            "not json".into(),
            "{\"suggestion\": \"Ran backlog triage end to end\"}".into(),
        ]);
        let out = enhance_responsibility(&model, &input()).await.unwrap();
        assert_eq!(
            out.suggested_responsibilities,
            vec!["Ran backlog triage end to end".to_string()]
        );
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_primary_list_triggers_fallback() {
        let model = ScriptedModel::new(vec![
            "{\"suggested_responsibilities\": []}".into(),
            "{\"suggestion\": \"Led backlog grooming\"}".into(),
        ]);
        let out = enhance_responsibility(&model, &input()).await.unwrap();
        assert_eq!(
            out.suggested_responsibilities,
            vec!["Led backlog grooming".to_string()]
        );
    }

    #[tokio::test]
    async fn test_total_failure_returns_original() {
        let model = FailingModel;
        let out = enhance_responsibility(&model, &input()).await.unwrap();
        assert_eq!(
            out.suggested_responsibilities,
            vec!["Managed the team backlog".to_string()]
        );
    }
}
