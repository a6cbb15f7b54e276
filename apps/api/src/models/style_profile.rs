use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Sentence-length buckets as percentages. Keys are camelCase because the
/// analyzer prompts the model for exactly this JSON shape and the JSONB
/// column stores it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentenceLengthDistribution {
    pub under3_words: Option<f64>,
    pub words4to8: Option<f64>,
    pub words9to15: Option<f64>,
    pub words16to25: Option<f64>,
    pub over25_words: Option<f64>,
}

/// Measured writing metrics. Every field is optional on read: profiles may
/// have been analyzed by an older model that omitted fields, and the prompt
/// builder substitutes defaults for anything missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuantitativeProfile {
    pub avg_words_per_post: Option<f64>,
    pub avg_words_per_sentence: Option<f64>,
    pub avg_sentences_per_paragraph: Option<f64>,
    pub avg_lines_per_paragraph: Option<f64>,
    pub avg_emojis_per_post: Option<f64>,
    pub emoji_to_text_ratio: Option<f64>,
    pub top_emojis: Option<Vec<String>>,
    pub top_words: Option<Vec<String>>,
    pub avg_line_breaks_per_post: Option<f64>,
    pub avg_paragraph_breaks_per_post: Option<f64>,
    pub sentence_length_distribution: Option<SentenceLengthDistribution>,
}

/// Free-text style characterization produced by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualitativeProfile {
    pub tonality: Option<String>,
    pub rhythm: Option<String>,
    pub communication_style: Option<String>,
    pub beliefs: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StyleProfileRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub quantitative: Json<QuantitativeProfile>,
    pub qualitative: Json<QualitativeProfile>,
}

/// The payload the analyzer parses out of the model response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleAnalysis {
    pub quantitative: QuantitativeProfile,
    pub qualitative: QualitativeProfile,
}
