//! Renders the generation system prompt from an employee and a resolved
//! style profile.
//!
//! Every value interpolated here has already been through default
//! resolution (`style::defaults`), so the rendered prompt never contains
//! `null`, an empty list, or a leftover placeholder. The two standing rules
//! (Swiss orthography, varied openers) are part of the template and appear
//! in every prompt.

use crate::generation::prompts::GENERATION_SYSTEM_TEMPLATE;
use crate::models::employee::EmployeeRow;
use crate::style::defaults::{
    ResolvedStyleProfile, DEFAULT_TONE_DESCRIPTION, FALLBACK_NAME_ACCUSATIVE, FALLBACK_NAME_DATIVE,
};

pub fn build_generation_prompt(employee: &EmployeeRow, style: &ResolvedStyleProfile) -> String {
    let name_accusative = if employee.name.is_empty() {
        FALLBACK_NAME_ACCUSATIVE
    } else {
        &employee.name
    };
    let name_dative = if employee.name.is_empty() {
        FALLBACK_NAME_DATIVE
    } else {
        &employee.name
    };
    let tone_description = if employee.tone_description.is_empty() {
        DEFAULT_TONE_DESCRIPTION
    } else {
        &employee.tone_description
    };

    GENERATION_SYSTEM_TEMPLATE
        .replace("{employee_name_dat}", name_dative)
        .replace("{employee_name}", name_accusative)
        .replace("{tone_description}", tone_description)
        .replace("{avg_words_per_post}", &fmt_num(style.avg_words_per_post))
        .replace(
            "{avg_words_per_sentence}",
            &fmt_num(style.avg_words_per_sentence),
        )
        .replace(
            "{avg_sentences_per_paragraph}",
            &fmt_num(style.avg_sentences_per_paragraph),
        )
        .replace("{avg_emojis_per_post}", &fmt_num(style.avg_emojis_per_post))
        .replace(
            "{avg_line_breaks_per_post}",
            &fmt_num(style.avg_line_breaks_per_post),
        )
        .replace(
            "{avg_paragraph_breaks_per_post}",
            &fmt_num(style.avg_paragraph_breaks_per_post),
        )
        .replace("{dist_under3}", &fmt_num(style.distribution.under3_words))
        .replace("{dist_4to8}", &fmt_num(style.distribution.words4to8))
        .replace("{dist_9to15}", &fmt_num(style.distribution.words9to15))
        .replace("{dist_16to25}", &fmt_num(style.distribution.words16to25))
        .replace("{dist_over25}", &fmt_num(style.distribution.over25_words))
        .replace("{top_emojis}", &style.top_emojis)
        .replace("{top_words}", &style.top_words)
        .replace("{tonality}", &style.tonality)
        .replace("{rhythm}", &style.rhythm)
        .replace("{communication_style}", &style.communication_style)
        .replace("{beliefs}", &style.beliefs)
}

/// Whole numbers render without a decimal point ("150", not "150.0").
fn fmt_num(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style_profile::{
        QualitativeProfile, QuantitativeProfile, SentenceLengthDistribution,
    };
    use crate::style::defaults::{resolve_style, EMPTY_LIST_PLACEHOLDER};
    use chrono::Utc;
    use uuid::Uuid;

    fn employee(name: &str, tone_description: &str) -> EmployeeRow {
        EmployeeRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: "anna@example.ch".to_string(),
            linkedin_profile: String::new(),
            google_drive_folder_id: String::new(),
            tone_description: tone_description.to_string(),
            sample_texts_key: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn analyzed_profile() -> ResolvedStyleProfile {
        let quantitative = QuantitativeProfile {
            avg_words_per_post: Some(120.0),
            avg_words_per_sentence: Some(11.5),
            avg_sentences_per_paragraph: Some(2.0),
            avg_emojis_per_post: Some(1.0),
            avg_line_breaks_per_post: Some(6.0),
            avg_paragraph_breaks_per_post: Some(3.0),
            top_emojis: Some(vec!["🚀".into(), "💡".into()]),
            top_words: Some(vec!["Team".into(), "Zukunft".into()]),
            sentence_length_distribution: Some(SentenceLengthDistribution {
                under3_words: Some(10.0),
                words4to8: Some(35.0),
                words9to15: Some(30.0),
                words16to25: Some(20.0),
                over25_words: Some(5.0),
            }),
            ..Default::default()
        };
        let qualitative = QualitativeProfile {
            tonality: Some("Motivierend".into()),
            rhythm: Some("Kurze Absätze".into()),
            communication_style: Some("Storytelling".into()),
            beliefs: Some("Teamgeist".into()),
        };
        resolve_style(&quantitative, &qualitative)
    }

    #[test]
    fn test_prompt_renders_analyzed_profile() {
        let prompt = build_generation_prompt(
            &employee("Anna Muster", "Locker und nahbar"),
            &analyzed_profile(),
        );

        assert!(prompt.contains("LinkedIn-Ghostwriter für Anna Muster."));
        assert!(prompt.contains("Locker und nahbar"));
        assert!(prompt.contains("- Ziel-Wortanzahl: 120 Wörter (±10%)"));
        assert!(prompt.contains("- Wörter pro Satz: ~11.5"));
        assert!(prompt.contains("- 35% kurze Sätze (4-8 Wörter)"));
        assert!(prompt.contains("- Diese Emojis nutzen: 🚀, 💡"));
        assert!(prompt.contains("- Diese Wörter/Phrasen einbauen: Team, Zukunft"));
        assert!(prompt.contains("- Tonalität: Motivierend"));
        assert!(prompt.contains("nach Anna Muster klingen"));
        assert!(prompt.contains("im Stil von Anna Muster:"));
    }

    #[test]
    fn test_prompt_renders_defaults_for_empty_profile() {
        let resolved = resolve_style(
            &QuantitativeProfile::default(),
            &QualitativeProfile::default(),
        );
        let prompt = build_generation_prompt(&employee("Anna Muster", ""), &resolved);

        assert!(prompt.contains("- Ziel-Wortanzahl: 150 Wörter (±10%)"));
        assert!(prompt.contains("- Wörter pro Satz: ~12"));
        assert!(prompt.contains("- Sätze pro Absatz: ~3"));
        assert!(prompt.contains("- Emojis pro Post: ~2"));
        assert!(prompt.contains("- Zeilenumbrüche: ~5"));
        assert!(prompt.contains("- 0% sehr kurze Sätze (1-3 Wörter)"));
        assert!(prompt.contains(&format!("- Diese Emojis nutzen: {EMPTY_LIST_PLACEHOLDER}")));
        assert!(prompt.contains("Professionell und authentisch"));
        assert!(prompt.contains("- Tonalität: Professionell"));
        assert!(prompt.contains("- Rhythmus & Struktur: Ausgewogen"));
        assert!(prompt.contains("- Kommunikationsstil: Direkt"));
        assert!(prompt.contains("- Beliefs/Werte transportieren: Authentizität"));
    }

    #[test]
    fn test_prompt_declines_fallback_name() {
        let prompt = build_generation_prompt(&employee("", ""), &analyzed_profile());

        assert!(prompt.contains("LinkedIn-Ghostwriter für den Mitarbeiter."));
        assert!(prompt.contains("nach dem Mitarbeiter klingen"));
        assert!(prompt.contains("im Stil von dem Mitarbeiter:"));
    }

    #[test]
    fn test_prompt_always_carries_standing_rules() {
        let prompt = build_generation_prompt(&employee("Anna Muster", ""), &analyzed_profile());

        assert!(prompt.contains("Schweizer Rechtschreibung (ss statt ß"));
        assert!(prompt.contains("Kein Post sollte gleich beginnen wie ein anderer"));
    }

    #[test]
    fn test_no_placeholder_or_null_survives() {
        for name in ["Anna Muster", ""] {
            let prompt = build_generation_prompt(&employee(name, ""), &analyzed_profile());
            assert!(!prompt.contains('{'), "unreplaced placeholder in prompt");
            assert!(!prompt.contains("null"));
        }
    }
}
