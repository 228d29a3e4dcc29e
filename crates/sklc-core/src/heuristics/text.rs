//! Lexicon and regex heuristics over free-text answers.
//!
//! Each heuristic scores a handful of independent criteria, sums their
//! weighted credit and clamps the total to [0, 1]. Blank text scores 0.0.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{count_present, count_sentences, tiered_credit, Pattern};

static PAST_TENSE: LazyLock<Regex> = LazyLock::new(|| Regex::new("(았|었|했)").unwrap());
static POLITE_ENDINGS: LazyLock<Regex> = LazyLock::new(|| Regex::new("(요|습니다)").unwrap());
static CASUAL_ENDINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(어\?|어\.|했어|냈어|돼\?)").unwrap());

// ---------------------------------------------------------------------------
// Self introduction
// ---------------------------------------------------------------------------

/// Parameters for `heuristic_self_intro_v1`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelfIntroParams {
    pub weights: SelfIntroWeights,
    pub lexicons: SelfIntroLexicons,
    /// Sentences needed for full sentence credit.
    pub min_sentences: usize,
    /// Fraction of a criterion's weight given for a partial hit.
    pub partial_credit: f64,
    /// Bonus for a long answer that also meets `min_sentences`.
    pub length_bonus: f64,
    /// The answer must be strictly longer than this many characters.
    pub length_bonus_min_chars: usize,
}

impl Default for SelfIntroParams {
    fn default() -> Self {
        Self {
            weights: SelfIntroWeights::default(),
            lexicons: SelfIntroLexicons::default(),
            min_sentences: 2,
            partial_credit: 0.5,
            length_bonus: 0.2,
            length_bonus_min_chars: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelfIntroWeights {
    pub sentences: f64,
    pub basic_verbs: f64,
    pub topic_or_hobby: f64,
}

impl Default for SelfIntroWeights {
    fn default() -> Self {
        Self {
            sentences: 0.3,
            basic_verbs: 0.3,
            topic_or_hobby: 0.2,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SelfIntroLexicons {
    pub basic_verbs: Vec<String>,
    pub topic_or_hobby: Vec<String>,
}

/// Sentence count, basic verb use, topic or hobby words, and a length bonus.
pub fn self_intro(text: &str, params: &SelfIntroParams) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let w = &params.weights;
    let sentences = count_sentences(text);
    let enough_sentences = sentences >= params.min_sentences;

    let mut score = tiered_credit(
        sentences,
        params.min_sentences,
        w.sentences,
        params.partial_credit,
    );
    score += tiered_credit(
        count_present(&params.lexicons.basic_verbs, text),
        2,
        w.basic_verbs,
        params.partial_credit,
    );
    score += tiered_credit(
        count_present(&params.lexicons.topic_or_hobby, text),
        2,
        w.topic_or_hobby,
        params.partial_credit,
    );

    if enough_sentences && text.chars().count() > params.length_bonus_min_chars {
        score += params.length_bonus;
    }

    score.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Past routine
// ---------------------------------------------------------------------------

/// Parameters for `heuristic_past_routine_v1`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PastRoutineParams {
    pub weights: PastRoutineWeights,
    pub patterns: PastRoutinePatterns,
    pub lexicons: PastRoutineLexicons,
    pub min_sentences: usize,
    /// Fraction of the sentence weight for fewer than `min_sentences`.
    pub sentence_partial_credit: f64,
    /// Fraction of the past tense weight for a single past tense marker.
    pub past_tense_partial_credit: f64,
}

impl Default for PastRoutineParams {
    fn default() -> Self {
        Self {
            weights: PastRoutineWeights::default(),
            patterns: PastRoutinePatterns::default(),
            lexicons: PastRoutineLexicons::default(),
            min_sentences: 2,
            sentence_partial_credit: 0.5,
            past_tense_partial_credit: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PastRoutineWeights {
    pub sentences: f64,
    pub past_tense: f64,
    pub content_words: f64,
}

impl Default for PastRoutineWeights {
    fn default() -> Self {
        Self {
            sentences: 0.3,
            past_tense: 0.4,
            content_words: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PastRoutinePatterns {
    pub past_tense_regex: Pattern,
}

impl Default for PastRoutinePatterns {
    fn default() -> Self {
        Self {
            past_tense_regex: Pattern::from(PAST_TENSE.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PastRoutineLexicons {
    pub content_words: Vec<String>,
    /// Content words needed for full credit; fewer earn linear credit.
    pub min_content_word_count: usize,
}

impl Default for PastRoutineLexicons {
    fn default() -> Self {
        Self {
            content_words: Vec::new(),
            min_content_word_count: 3,
        }
    }
}

/// Sentence count, past tense markers, and content vocabulary.
pub fn past_routine(text: &str, params: &PastRoutineParams) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let w = &params.weights;

    let mut score = tiered_credit(
        count_sentences(text),
        params.min_sentences,
        w.sentences,
        params.sentence_partial_credit,
    );

    let past_markers = params.patterns.past_tense_regex.find_iter(text).count();
    score += tiered_credit(past_markers, 2, w.past_tense, params.past_tense_partial_credit);

    let min_content = params.lexicons.min_content_word_count;
    let content = count_present(&params.lexicons.content_words, text);
    if content >= min_content {
        score += w.content_words;
    } else if content >= 1 {
        score += w.content_words * (content as f64 / min_content as f64);
    }

    score.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Polite rewrite (addressing a professor)
// ---------------------------------------------------------------------------

/// Parameters for `heuristic_professor_polite_rewrite_v1`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PoliteRewriteParams {
    pub weights: PoliteRewriteWeights,
    pub lexicons: PoliteRewriteLexicons,
    pub patterns: PoliteRewritePatterns,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoliteRewriteWeights {
    pub address_professor: f64,
    pub apology: f64,
    pub polite_endings: f64,
    pub request_content: f64,
    /// Added (normally negative) when a casual ending is found.
    pub penalty_casual: f64,
}

impl Default for PoliteRewriteWeights {
    fn default() -> Self {
        Self {
            address_professor: 0.2,
            apology: 0.2,
            polite_endings: 0.4,
            request_content: 0.2,
            penalty_casual: -0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoliteRewriteLexicons {
    pub professor_terms: Vec<String>,
    pub apology_terms: Vec<String>,
    pub request_keywords: Vec<String>,
    /// Request keywords that must survive the rewrite.
    pub min_request_keywords: usize,
}

impl Default for PoliteRewriteLexicons {
    fn default() -> Self {
        Self {
            professor_terms: vec!["교수님".to_string()],
            apology_terms: vec!["죄송".to_string(), "실례".to_string()],
            request_keywords: Vec::new(),
            min_request_keywords: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoliteRewritePatterns {
    pub polite_endings_regex: Pattern,
    pub casual_endings_regex: Pattern,
}

impl Default for PoliteRewritePatterns {
    fn default() -> Self {
        Self {
            polite_endings_regex: Pattern::from(POLITE_ENDINGS.clone()),
            casual_endings_regex: Pattern::from(CASUAL_ENDINGS.clone()),
        }
    }
}

/// Honorific address, apology, polite endings and preserved request
/// content, minus a penalty for casual endings.
pub fn polite_rewrite(text: &str, params: &PoliteRewriteParams) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let w = &params.weights;
    let lex = &params.lexicons;
    let mut score = 0.0;

    if count_present(&lex.professor_terms, text) > 0 {
        score += w.address_professor;
    }
    if count_present(&lex.apology_terms, text) > 0 {
        score += w.apology;
    }
    if params.patterns.polite_endings_regex.is_match(text) {
        score += w.polite_endings;
    }
    if count_present(&lex.request_keywords, text) >= lex.min_request_keywords {
        score += w.request_content;
    }
    if params.patterns.casual_endings_regex.is_match(text) {
        score += w.penalty_casual;
    }

    score.clamp(0.0, 1.0)
}
