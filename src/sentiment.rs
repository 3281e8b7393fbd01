//! Rule-based lexicon sentiment scorer.
//!
//! Each token is looked up in a fixed valence lexicon (`sentiment_lexicon.json`,
//! valences in `[-4.0, 4.0]`) and adjusted by a handful of heuristics:
//!
//! - booster/dampener words in the three preceding tokens ("very", "slightly")
//! - negation in the three preceding tokens ("not", "never", "isn't")
//! - ALL-CAPS emphasis when the text mixes cases
//! - contrastive "but": sentiment before it is halved, after it is boosted
//! - trailing `!`/`?` emphasis
//!
//! The summed valence is squashed into `[-1.0, 1.0]` with `s / sqrt(s² + 15)`.
//! The scorer holds no mutable state and is safe to share across threads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon")
});

/// Words with optional inner apostrophes, so "isn't" stays one token.
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("valid token pattern"));

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const ALPHA: f64 = 15.0;

/// Decay applied to boosters one and two tokens further away.
const WINDOW_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

/// Full polarity breakdown for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Normalized sum of valences in `[-1.0, 1.0]`, rounded to 4 places.
    pub compound: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Lexicon valence for a lower-cased word, if it carries any.
    #[inline]
    fn word_valence(&self, w: &str) -> Option<f64> {
        LEXICON.get(w).copied()
    }

    /// Score `text`. Single-character tokens are ignored; text with no
    /// remaining tokens scores all zeros.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens: Vec<&str> = TOKEN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| t.chars().count() > 1)
            .collect();
        if tokens.is_empty() {
            return PolarityScores::default();
        }
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_diff = mixed_case(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            sentiments.push(self.token_valence(i, &tokens, &lowered, cap_diff));
        }
        apply_but_rule(&lowered, &mut sentiments);

        let punct = punctuation_emphasis(text);
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += punct;
        } else if sum < 0.0 {
            sum -= punct;
        }

        let (pos, neg, neu) = proportions(&sentiments, punct);
        PolarityScores {
            neg: round_to(neg, 3),
            neu: round_to(neu, 3),
            pos: round_to(pos, 3),
            compound: round_to(normalize(sum), 4),
        }
    }

    fn token_valence(&self, i: usize, tokens: &[&str], lowered: &[String], cap_diff: bool) -> f64 {
        let word = lowered[i].as_str();
        if booster(word).is_some() {
            return 0.0;
        }
        let Some(base) = self.word_valence(word) else {
            return 0.0;
        };

        let mut valence = base;
        if cap_diff && is_all_caps(tokens[i]) {
            valence += C_INCR * base.signum();
        }

        for (start, decay) in WINDOW_DECAY.iter().enumerate() {
            if i <= start {
                break;
            }
            let j = i - start - 1;
            let prev = lowered[j].as_str();
            if self.word_valence(prev).is_some() {
                continue;
            }
            valence += scalar_inc_dec(prev, tokens[j], valence, cap_diff) * decay;
            if is_negator(prev) {
                valence *= N_SCALAR;
            }
        }
        valence
    }
}

fn booster(word: &str) -> Option<f64> {
    match word {
        "absolutely" | "amazingly" | "completely" | "considerably" | "decidedly" | "deeply"
        | "enormously" | "entirely" | "especially" | "exceptionally" | "extremely"
        | "fabulously" | "greatly" | "highly" | "hugely" | "incredibly" | "intensely"
        | "majorly" | "more" | "most" | "particularly" | "purely" | "quite" | "really"
        | "remarkably" | "so" | "substantially" | "thoroughly" | "totally" | "tremendously"
        | "truly" | "unbelievably" | "utterly" | "very" => Some(B_INCR),
        "almost" | "barely" | "hardly" | "less" | "little" | "marginally" | "occasionally"
        | "partly" | "scarcely" | "slightly" | "somewhat" => Some(B_DECR),
        _ => None,
    }
}

fn is_negator(word: &str) -> bool {
    matches!(
        word,
        "not"
            | "no"
            | "never"
            | "neither"
            | "nor"
            | "nothing"
            | "nowhere"
            | "none"
            | "nobody"
            | "cannot"
            | "without"
            | "aint"
            | "dont"
            | "isnt"
            | "wasnt"
            | "wont"
            | "cant"
    ) || word.ends_with("n't")
        || word.ends_with("n’t")
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

/// True when some, but not all, tokens are shouted.
fn mixed_case(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn scalar_inc_dec(lower: &str, raw: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_diff && is_all_caps(raw) {
        scalar += C_INCR * valence.signum();
    }
    scalar
}

fn apply_but_rule(lowered: &[String], sentiments: &mut [f64]) {
    let Some(but) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (j, s) in sentiments.iter_mut().enumerate() {
        if j < but {
            *s *= 0.5;
        } else if j > but {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let questions = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

fn proportions(sentiments: &[f64], punct: f64) -> (f64, f64, f64) {
    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += punct;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= punct;
    }
    let total = pos_sum + neg_sum.abs() + neu_count;
    if total == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    (pos_sum / total, neg_sum.abs() / total, neu_count / total)
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    // `+ 0.0` folds -0.0 into 0.0.
    (value * factor).round() / factor + 0.0
}
