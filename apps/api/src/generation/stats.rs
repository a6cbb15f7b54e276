//! Post statistics shown next to the review editor.
//!
//! The counts are deliberately simple text measures, not linguistic ones:
//! - words: maximal non-whitespace runs
//! - emojis: characters in the common emoji blocks (one per character, so a
//!   flag counts as its two regional indicators)
//! - paragraphs: non-blank chunks between blank lines
//! - sentences: non-blank segments between `.`, `!`, `?` runs

use serde::Serialize;
use std::ops::RangeInclusive;

const EMOJI_RANGES: [RangeInclusive<char>; 6] = [
    '\u{1F600}'..='\u{1F64F}', // emoticons
    '\u{1F300}'..='\u{1F5FF}', // misc symbols and pictographs
    '\u{1F680}'..='\u{1F6FF}', // transport and map
    '\u{1F1E0}'..='\u{1F1FF}', // regional indicators
    '\u{2600}'..='\u{26FF}',   // misc symbols
    '\u{2700}'..='\u{27BF}',   // dingbats
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostStats {
    pub word_count: usize,
    pub emoji_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
}

pub fn post_stats(content: &str) -> PostStats {
    PostStats {
        word_count: content.split_whitespace().count(),
        emoji_count: content.chars().filter(|c| is_emoji(*c)).count(),
        paragraph_count: content
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count(),
        sentence_count: content
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count(),
    }
}

fn is_emoji(c: char) -> bool {
    EMOJI_RANGES.iter().any(|range| range.contains(&c))
}
