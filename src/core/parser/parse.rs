//! Reverse Prompt Parser
//!
//! Reconstructs slot settings from an assembled prompt string. A pure
//! function of the input text and the match index: tokens are split on
//! commas, stripped of weight syntax and color prefixes, then resolved
//! through an ordered strategy cascade with a fixed confidence per tier.
//! Parsing never fails — anything unresolvable lands in the unmatched list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::index::{Candidate, MatchIndex};
use crate::core::slots::slot_def;

// ============================================================================
// Tuning
// ============================================================================

/// Tokens discarded before matching; they count toward neither matched nor
/// total tokens.
pub const SUBJECT_MARKERS: &[&str] = &["1girl", "1boy", "girl", "boy", "solo"];

/// Minimum similarity ratio for the fuzzy fallback.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Fuzzy matching is only attempted for token texts longer than this.
const FUZZY_MIN_CHARS: usize = 3;

/// Confidence tiers for the fixed-confidence strategies, in evaluation
/// order. The fuzzy fallback reports its computed ratio instead.
type StrategyFn = fn(&MatchIndex, &str) -> Option<Vec<Candidate>>;
const STRATEGIES: &[(StrategyFn, f64)] = &[
    (MatchIndex::exact_candidates, 1.0),
    (MatchIndex::normalized_candidates, 0.95),
    (MatchIndex::word_candidates, 0.85),
];

// ============================================================================
// Output Types
// ============================================================================

/// One reconstructed slot setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSlot {
    /// Resolved catalog item id.
    pub value_id: String,
    /// Canonical color token stripped from the token text, when the slot
    /// supports color.
    pub color: Option<String>,
    /// Weight recovered from `(text:weight)` syntax, 1.0 otherwise.
    pub weight: f32,
    /// Always true for parsed slots; mirrors the slot-state shape.
    pub enabled: bool,
    /// Confidence of the winning match strategy.
    pub confidence: f64,
}

/// Full parse result. Slot entries appear in the order they were matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    pub slots: IndexMap<String, ParsedSlot>,
    /// Token texts that resolved to nothing (or only to already-filled
    /// slots), in input order.
    pub unmatched: Vec<String>,
    pub matched_count: usize,
    pub total_tokens: usize,
    /// matched / total, rounded to three decimals; 0 when no tokens remain
    /// after skipping.
    pub confidence: f64,
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, PartialEq)]
struct Token {
    text: String,
    weight: f32,
}

/// Split a prompt on commas and strip `(text:weight)` syntax. A malformed
/// weight leaves the token text untouched with the default weight.
fn tokenize(prompt: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for part in prompt.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let mut text = part;
        let mut weight = 1.0_f32;

        if part.starts_with('(') && part.ends_with(')') && part.contains(':') {
            let inner = &part[1..part.len() - 1];
            if let Some(colon) = inner.rfind(':') {
                if colon > 0 {
                    if let Ok(parsed) = inner[colon + 1..].trim().parse::<f32>() {
                        weight = parsed;
                        text = &inner[..colon];
                    }
                }
            }
        }

        // Collapse internal whitespace runs.
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            tokens.push(Token { text, weight });
        }
    }

    tokens
}

// ============================================================================
// Parser
// ============================================================================

/// Reverse parser over a prebuilt match index. Stateless across calls.
pub struct PromptParser<'a> {
    index: &'a MatchIndex,
}

impl<'a> PromptParser<'a> {
    pub fn new(index: &'a MatchIndex) -> Self {
        Self { index }
    }

    /// Parse a prompt string into slot settings.
    pub fn parse(&self, prompt: &str, use_fuzzy: bool) -> ParseReport {
        let mut slots: IndexMap<String, ParsedSlot> = IndexMap::new();
        let mut unmatched: Vec<String> = Vec::new();
        let mut matched_count = 0usize;

        for token in tokenize(prompt) {
            let lower = token.text.to_lowercase();
            if SUBJECT_MARKERS.contains(&lower.as_str()) {
                continue;
            }

            // Strip a leading color ("red dress" → color red, text "dress").
            let (color, item_text) = match self.index.color_prefix(&lower) {
                Some((canonical, skip)) => {
                    (Some(canonical.to_string()), lower[skip..].trim().to_string())
                }
                None => (None, lower),
            };

            let resolved = self.resolve(&item_text, use_fuzzy);

            let Some((candidates, confidence)) = resolved else {
                unmatched.push(token.text);
                continue;
            };

            // First candidate slot not already filled wins; candidates are
            // in declaration order. A token whose candidate slots are all
            // filled is reported unmatched even though a match existed.
            let open = candidates.into_iter().find(|c| !slots.contains_key(c.slot));
            match open {
                Some(candidate) => {
                    let has_color = slot_def(candidate.slot)
                        .map(|def| def.has_color)
                        .unwrap_or(false);
                    slots.insert(
                        candidate.slot.to_string(),
                        ParsedSlot {
                            value_id: candidate.item_id,
                            color: if has_color { color } else { None },
                            weight: token.weight,
                            enabled: true,
                            confidence,
                        },
                    );
                    matched_count += 1;
                }
                None => unmatched.push(token.text),
            }
        }

        let total_tokens = matched_count + unmatched.len();
        let confidence = if total_tokens > 0 {
            round3(matched_count as f64 / total_tokens as f64)
        } else {
            0.0
        };

        ParseReport {
            slots,
            unmatched,
            matched_count,
            total_tokens,
            confidence,
        }
    }

    /// Ordered early-exit cascade: the first strategy returning candidates
    /// wins, at its tier's confidence. The fuzzy fallback runs last, only
    /// when enabled and the text is long enough, at its computed ratio.
    fn resolve(&self, text: &str, use_fuzzy: bool) -> Option<(Vec<Candidate>, f64)> {
        for (strategy, confidence) in STRATEGIES {
            if let Some(candidates) = strategy(self.index, text) {
                return Some((candidates, *confidence));
            }
        }

        if use_fuzzy && text.chars().count() > FUZZY_MIN_CHARS {
            return self.index.fuzzy_candidates(text, FUZZY_THRESHOLD);
        }
        None
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ============================================================================
// Tests
// ============================================================================
