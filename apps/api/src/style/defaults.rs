//! Default resolution for style profiles.
//!
//! Stored profiles are optional in every field (older analyses may predate a
//! field, and the model occasionally omits one). Prompt building never reads
//! the raw profile: it goes through [`resolve_style`], which substitutes a
//! named default for everything missing so no `null` or empty placeholder can
//! leak into a prompt.

use crate::models::style_profile::{QualitativeProfile, QuantitativeProfile};

pub const DEFAULT_AVG_WORDS_PER_POST: f64 = 150.0;
pub const DEFAULT_AVG_WORDS_PER_SENTENCE: f64 = 12.0;
pub const DEFAULT_AVG_SENTENCES_PER_PARAGRAPH: f64 = 3.0;
pub const DEFAULT_AVG_EMOJIS_PER_POST: f64 = 2.0;
pub const DEFAULT_AVG_LINE_BREAKS_PER_POST: f64 = 5.0;
pub const DEFAULT_AVG_PARAGRAPH_BREAKS_PER_POST: f64 = 3.0;

pub const DEFAULT_TONALITY: &str = "Professionell";
pub const DEFAULT_RHYTHM: &str = "Ausgewogen";
pub const DEFAULT_COMMUNICATION_STYLE: &str = "Direkt";
pub const DEFAULT_BELIEFS: &str = "Authentizität";

/// Employee-level fallbacks used by the prompt builder.
pub const DEFAULT_TONE_DESCRIPTION: &str = "Professionell und authentisch";
/// Name fallbacks, declined for the two grammatical cases the prompt uses.
pub const FALLBACK_NAME_ACCUSATIVE: &str = "den Mitarbeiter";
pub const FALLBACK_NAME_DATIVE: &str = "dem Mitarbeiter";

/// Placeholder when an analyzed list (top emojis, top words) is empty.
pub const EMPTY_LIST_PLACEHOLDER: &str = "(keine spezifischen)";

/// Sentence-length distribution with every bucket filled in. Missing buckets
/// resolve to 0 — an absent distribution means "no signal", not "average".
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDistribution {
    pub under3_words: f64,
    pub words4to8: f64,
    pub words9to15: f64,
    pub words16to25: f64,
    pub over25_words: f64,
}

/// A style profile with every prompt-relevant field populated. Lists are
/// already rendered to the comma-joined form the prompt interpolates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyleProfile {
    pub avg_words_per_post: f64,
    pub avg_words_per_sentence: f64,
    pub avg_sentences_per_paragraph: f64,
    pub avg_emojis_per_post: f64,
    pub avg_line_breaks_per_post: f64,
    pub avg_paragraph_breaks_per_post: f64,
    pub distribution: ResolvedDistribution,
    pub top_emojis: String,
    pub top_words: String,
    pub tonality: String,
    pub rhythm: String,
    pub communication_style: String,
    pub beliefs: String,
}

/// Resolves a stored profile into a fully-populated one.
///
/// Numeric zero is a measured value and survives resolution; only a missing
/// field gets its default.
pub fn resolve_style(
    quantitative: &QuantitativeProfile,
    qualitative: &QualitativeProfile,
) -> ResolvedStyleProfile {
    let dist = quantitative
        .sentence_length_distribution
        .clone()
        .unwrap_or_default();

    ResolvedStyleProfile {
        avg_words_per_post: quantitative
            .avg_words_per_post
            .unwrap_or(DEFAULT_AVG_WORDS_PER_POST),
        avg_words_per_sentence: quantitative
            .avg_words_per_sentence
            .unwrap_or(DEFAULT_AVG_WORDS_PER_SENTENCE),
        avg_sentences_per_paragraph: quantitative
            .avg_sentences_per_paragraph
            .unwrap_or(DEFAULT_AVG_SENTENCES_PER_PARAGRAPH),
        avg_emojis_per_post: quantitative
            .avg_emojis_per_post
            .unwrap_or(DEFAULT_AVG_EMOJIS_PER_POST),
        avg_line_breaks_per_post: quantitative
            .avg_line_breaks_per_post
            .unwrap_or(DEFAULT_AVG_LINE_BREAKS_PER_POST),
        avg_paragraph_breaks_per_post: quantitative
            .avg_paragraph_breaks_per_post
            .unwrap_or(DEFAULT_AVG_PARAGRAPH_BREAKS_PER_POST),
        distribution: ResolvedDistribution {
            under3_words: dist.under3_words.unwrap_or(0.0),
            words4to8: dist.words4to8.unwrap_or(0.0),
            words9to15: dist.words9to15.unwrap_or(0.0),
            words16to25: dist.words16to25.unwrap_or(0.0),
            over25_words: dist.over25_words.unwrap_or(0.0),
        },
        top_emojis: resolve_list(&quantitative.top_emojis),
        top_words: resolve_list(&quantitative.top_words),
        tonality: resolve_text(&qualitative.tonality, DEFAULT_TONALITY),
        rhythm: resolve_text(&qualitative.rhythm, DEFAULT_RHYTHM),
        communication_style: resolve_text(
            &qualitative.communication_style,
            DEFAULT_COMMUNICATION_STYLE,
        ),
        beliefs: resolve_text(&qualitative.beliefs, DEFAULT_BELIEFS),
    }
}

fn resolve_list(list: &Option<Vec<String>>) -> String {
    match list {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => EMPTY_LIST_PLACEHOLDER.to_string(),
    }
}

fn resolve_text(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
