//! Relevance scoring for a single text field.
//!
//! Scoring walks a cascade of strategies and stops at the first one that
//! matches. Tier score ranges never overlap, so a lower tier can never
//! outscore a higher one:
//!
//! | Tier        | Score      |
//! |-------------|------------|
//! | Substring   | 100 – 130  |
//! | WordStart   | 80         |
//! | Subsequence | 40 – 79    |
//! | Typo        | 10 – 25    |

use crate::fuzzy::{closest_word_distance, subsequence};
use serde::{Deserialize, Serialize};

const SUBSTRING_BASE: f64 = 100.0;
const LEADING_BONUS: f64 = 30.0;
const NEAR_START_BONUS: f64 = 15.0;
const NEAR_START_CHARS: usize = 5;

const WORD_START_SCORE: f64 = 80.0;

const SUBSEQUENCE_BASE: f64 = 40.0;
const COVERAGE_WEIGHT: f64 = 30.0;
const ADJACENT_BONUS: f64 = 5.0;
/// Must stay below `WORD_START_SCORE`.
const SUBSEQUENCE_CAP: f64 = 79.0;

const TYPO_BASE: f64 = 30.0;
const TYPO_PENALTY: f64 = 5.0;
const TYPO_MIN_QUERY_CHARS: usize = 3;
const TYPO_MAX_QUERY_CHARS: usize = 12;

/// Strategy that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// No match
    None = 0,
    /// Edit-distance match against a word prefix
    Typo = 1,
    /// Query characters appear in order
    Subsequence = 2,
    /// Every query word starts a text word
    WordStart = 3,
    /// Query appears verbatim
    Substring = 4,
}

impl MatchTier {
    /// Stable lowercase name, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::None => "none",
            MatchTier::Typo => "typo",
            MatchTier::Subsequence => "subsequence",
            MatchTier::WordStart => "word_start",
            MatchTier::Substring => "substring",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one text field against a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether any strategy matched
    pub matched: bool,
    /// Confidence score (0 when unmatched)
    pub score: f64,
    /// Strategy that matched
    pub tier: MatchTier,
}

impl MatchResult {
    /// The unmatched result.
    pub const NONE: Self = Self {
        matched: false,
        score: 0.0,
        tier: MatchTier::None,
    };

    fn hit(tier: MatchTier, score: f64) -> Self {
        Self {
            matched: true,
            score,
            tier,
        }
    }
}

/// Calculate relevance of `text` for `query`.
///
/// Both sides are lowercased first. An empty or whitespace-only query never
/// matches.
///
/// # Example
/// ```
/// use glasscart_search::{calculate_relevance, MatchTier};
///
/// let result = calculate_relevance("Wireless Bluetooth Headphones", "wireless");
/// assert_eq!(result.tier, MatchTier::Substring);
/// assert_eq!(result.score, 130.0);
/// ```
pub fn calculate_relevance(text: &str, query: &str) -> MatchResult {
    if query.trim().is_empty() {
        return MatchResult::NONE;
    }

    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    if let Some(score) = substring_score(&text_lower, &query_lower) {
        return MatchResult::hit(MatchTier::Substring, score);
    }

    if covers_word_starts(&text_lower, &query_lower) {
        return MatchResult::hit(MatchTier::WordStart, WORD_START_SCORE);
    }

    let text_chars: Vec<char> = text_lower.chars().collect();
    let query_chars: Vec<char> = query_lower.chars().collect();

    if let Some(score) = subsequence_chars_score(&text_chars, &query_chars) {
        return MatchResult::hit(MatchTier::Subsequence, score);
    }

    if let Some(score) = typo_score(&text_lower, &query_chars) {
        return MatchResult::hit(MatchTier::Typo, score);
    }

    MatchResult::NONE
}

fn substring_score(text: &str, query: &str) -> Option<f64> {
    let byte_idx = text.find(query)?;
    let char_idx = text[..byte_idx].chars().count();

    let bonus = if char_idx == 0 {
        LEADING_BONUS
    } else if char_idx < NEAR_START_CHARS {
        NEAR_START_BONUS
    } else {
        0.0
    };

    Some(SUBSTRING_BASE + bonus)
}

fn covers_word_starts(text: &str, query: &str) -> bool {
    let text_words: Vec<&str> = text.split_whitespace().collect();
    let mut query_words = query.split_whitespace().peekable();

    query_words.peek().is_some()
        && query_words.all(|qw| text_words.iter().any(|tw| tw.starts_with(qw)))
}

/// Subsequence-tier score of `query` in `text`, case-insensitively.
///
/// `None` when the query characters do not all appear in order, or when the
/// query is blank. Scores fall in `[40, 79]`.
pub fn subsequence_score(text: &str, query: &str) -> Option<f64> {
    if query.trim().is_empty() {
        return None;
    }
    let text_chars: Vec<char> = text.to_lowercase().chars().collect();
    let query_chars: Vec<char> = query.to_lowercase().chars().collect();
    subsequence_chars_score(&text_chars, &query_chars)
}

fn subsequence_chars_score(text: &[char], query: &[char]) -> Option<f64> {
    let found = subsequence(text, query)?;
    let coverage = query.len() as f64 / text.len() as f64;
    let score = SUBSEQUENCE_BASE + coverage * COVERAGE_WEIGHT + found.adjacent as f64 * ADJACENT_BONUS;
    Some(score.min(SUBSEQUENCE_CAP))
}

fn typo_score(text: &str, query: &[char]) -> Option<f64> {
    if !(TYPO_MIN_QUERY_CHARS..=TYPO_MAX_QUERY_CHARS).contains(&query.len()) {
        return None;
    }

    let distance = closest_word_distance(text, query)?;
    (distance <= query.len() / 3).then(|| TYPO_BASE - distance as f64 * TYPO_PENALTY)
}
