use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{extract_json_object, strip_json_fences, LlmClient};
use crate::models::style_profile::{StyleAnalysis, StyleProfileRow};
use crate::style::prompts::{STYLE_ANALYSIS_PROMPT_TEMPLATE, STYLE_ANALYSIS_SYSTEM};
use crate::style::store::StyleProfileStore;

const ANALYSIS_MAX_TOKENS: u32 = 4096;

/// Runs style analysis over an employee's sample texts and replaces the
/// stored profile with the result. A single LLM call; any failure surfaces
/// to the caller and leaves the previous profile untouched.
pub async fn analyze_style(
    llm: &LlmClient,
    profiles: &dyn StyleProfileStore,
    employee_id: Uuid,
    sample_texts: &str,
) -> Result<StyleProfileRow, AppError> {
    let prompt = STYLE_ANALYSIS_PROMPT_TEMPLATE.replace("{sample_texts}", sample_texts);

    let response = llm
        .call(&prompt, STYLE_ANALYSIS_SYSTEM, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Analysis(format!("Style analysis call failed: {e}")))?;

    let text = response
        .text()
        .ok_or_else(|| AppError::Analysis("Model response contained no text block".into()))?;

    let analysis = parse_style_analysis(text)?;

    let row = profiles
        .upsert(employee_id, &analysis.quantitative, &analysis.qualitative)
        .await?;

    info!(
        "Analyzed style for employee {employee_id} (profile {})",
        row.id
    );
    Ok(row)
}

/// Parses the model's answer into a [`StyleAnalysis`]. Tolerates code fences
/// and prose around the JSON object; fields the model omitted stay `None`.
pub fn parse_style_analysis(text: &str) -> Result<StyleAnalysis, AppError> {
    let region = extract_json_object(strip_json_fences(text))
        .ok_or_else(|| AppError::Analysis("No JSON object found in model response".into()))?;

    serde_json::from_str(region).map_err(|e| {
        AppError::Analysis(format!("Style profile did not match the expected shape: {e}"))
    })
}
