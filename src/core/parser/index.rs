//! Match Index
//!
//! Read-only lookup structures built once from a [`CatalogStore`] for the
//! reverse parser:
//! - exact index: lowercased name/alias → candidate `(slot, item id)` pairs
//! - normalized index: the same keys with spaces/hyphens/underscores
//!   stripped, populated only when normalization changes the key
//! - word index: constituent words (length > 2) of multi-word names
//! - color trie: every canonical and localized color surface form
//!
//! Candidates are recorded in slot declaration order, which makes parse
//! results deterministic. The shared process-wide instance is constructed
//! exactly once behind a [`OnceCell`] guard.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::trie::ColorTrie;
use crate::core::catalog::CatalogStore;
use crate::core::slots::SLOT_DEFINITIONS;

// ============================================================================
// Candidates
// ============================================================================

/// One candidate resolution for a token: a slot and an item in its catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub slot: &'static str,
    pub item_id: String,
}

// ============================================================================
// MatchIndex
// ============================================================================

static SHARED_INDEX: OnceCell<Arc<MatchIndex>> = OnceCell::new();

/// Lookup indices for reverse prompt parsing. Immutable after construction.
#[derive(Debug, Default)]
pub struct MatchIndex {
    exact: HashMap<String, Vec<Candidate>>,
    normalized: HashMap<String, Vec<Candidate>>,
    /// Constituent words of multi-word names → candidates carrying them.
    words: HashMap<String, Vec<Candidate>>,
    color_trie: ColorTrie,
}

impl MatchIndex {
    /// Build all indices from a catalog store. Slots are walked in
    /// declaration order so candidate lists break ties deterministically.
    pub fn build(store: &CatalogStore) -> Self {
        let mut index = Self::default();

        for def in SLOT_DEFINITIONS {
            for item in store.options_for_slot(def.name) {
                index.index_name(&item.name, def.name, &item.id);
                for localized in item.name_i18n.values() {
                    if localized != &item.name {
                        index.index_name(localized, def.name, &item.id);
                    }
                }
                for alias in &item.aliases {
                    index.index_name(alias, def.name, &item.id);
                }
            }
        }

        for color in store.individual_colors() {
            index.color_trie.insert(color, color);
        }
        for (canonical, localizations) in store.color_i18n() {
            index.color_trie.insert(canonical, canonical);
            for localized in localizations.values() {
                index.color_trie.insert(localized, canonical);
            }
        }

        log::debug!(
            "Match index built: {} exact keys, {} normalized keys, {} words",
            index.exact.len(),
            index.normalized.len(),
            index.words.len()
        );
        index
    }

    /// The process-wide shared index, built on first use from the given
    /// store. Later calls return the existing instance regardless of the
    /// store passed.
    pub fn shared(store: &CatalogStore) -> Arc<MatchIndex> {
        SHARED_INDEX
            .get_or_init(|| Arc::new(Self::build(store)))
            .clone()
    }

    fn index_name(&mut self, name: &str, slot: &'static str, item_id: &str) {
        let name_lower = name.trim().to_lowercase();
        if name_lower.is_empty() {
            return;
        }

        let candidate = Candidate {
            slot,
            item_id: item_id.to_string(),
        };
        self.exact
            .entry(name_lower.clone())
            .or_default()
            .push(candidate.clone());

        let normalized = normalize(&name_lower);
        if normalized != name_lower {
            self.normalized
                .entry(normalized)
                .or_default()
                .push(candidate.clone());
        }

        let words: Vec<&str> = name_lower.split_whitespace().collect();
        if words.len() > 1 {
            for word in words {
                if word.chars().count() > 2 {
                    self.words
                        .entry(word.to_string())
                        .or_default()
                        .push(candidate.clone());
                }
            }
        }
    }

    // ========================================================================
    // Lookup Strategies
    // ========================================================================

    /// Exact lookup on the lowercased token text.
    pub fn exact_candidates(&self, text: &str) -> Option<Vec<Candidate>> {
        self.exact.get(&text.to_lowercase()).cloned()
    }

    /// Punctuation/whitespace-insensitive lookup.
    pub fn normalized_candidates(&self, text: &str) -> Option<Vec<Candidate>> {
        self.normalized.get(&normalize(&text.to_lowercase())).cloned()
    }

    /// Word-intersection lookup: every word of length > 2 must appear in the
    /// word index, and the candidate sets are intersected. Candidate order
    /// follows the first word's entries (declaration order).
    pub fn word_candidates(&self, text: &str) -> Option<Vec<Candidate>> {
        let lower = text.to_lowercase();
        let mut candidates: Option<Vec<Candidate>> = None;

        for word in lower.split_whitespace() {
            if word.chars().count() <= 2 {
                continue;
            }
            let entries = self.words.get(word).map(Vec::as_slice).unwrap_or(&[]);
            match candidates {
                None => {
                    let mut initial: Vec<Candidate> = Vec::new();
                    for entry in entries {
                        if !initial.contains(entry) {
                            initial.push(entry.clone());
                        }
                    }
                    candidates = Some(initial);
                }
                Some(ref mut kept) => {
                    kept.retain(|c| entries.contains(c));
                }
            }
        }

        candidates.filter(|c| !c.is_empty())
    }

    /// Fuzzy fallback: best normalized edit-distance ratio against every
    /// exact-index key, accepted at or above `threshold`. Ties break on key
    /// ordering so results are deterministic.
    pub fn fuzzy_candidates(&self, text: &str, threshold: f64) -> Option<(Vec<Candidate>, f64)> {
        let lower = text.to_lowercase();
        let mut best: Option<(&str, f64)> = None;

        for key in self.exact.keys() {
            let score = strsim::normalized_levenshtein(&lower, key);
            if score < threshold {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_key, best_score)) => {
                    score > best_score || (score == best_score && key.as_str() < best_key)
                }
            };
            if better {
                best = Some((key, score));
            }
        }

        best.map(|(key, score)| (self.exact[key].clone(), score))
    }

    /// Longest color prefix of the (lowercased) token text ending at a word
    /// boundary: canonical token plus byte offset past the separator.
    pub fn color_prefix(&self, text: &str) -> Option<(&str, usize)> {
        self.color_trie.find_prefix(text)
    }
}

/// Strip spaces, hyphens, and underscores for punctuation-insensitive
/// matching.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::test_fixtures::fixture_store;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize("blue-eyes"), "blueeyes");
        assert_eq!(normalize("twin_tails now"), "twintailsnow");
        assert_eq!(normalize("plain"), "plain");
    }

    #[test]
    fn test_exact_candidates() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);
        let candidates = index.exact_candidates("Blue Eyes").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].slot, "eye_color");
        assert_eq!(candidates[0].item_id, "eyes_blue");
    }

    #[test]
    fn test_alias_is_indexed() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);
        let candidates = index.exact_candidates("one-piece dress").unwrap();
        assert_eq!(candidates[0].slot, "full_body");
        assert_eq!(candidates[0].item_id, "dress_casual");
    }

    #[test]
    fn test_normalized_index_only_holds_changed_keys() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);
        assert!(index.normalized_candidates("blue-eyes").is_some());
        // Single-word names normalize to themselves and are not duplicated.
        assert!(index.normalized_candidates("dress").is_none());
    }

    #[test]
    fn test_word_intersection() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);
        // Reordered words still intersect to the one pleated-skirt item.
        let candidates = index.word_candidates("skirt pleated").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].item_id, "skirt_pleated");

        // A word missing from the index empties the intersection.
        assert!(index.word_candidates("pleated velvet skirt").is_none());
        // Words of length <= 2 are ignored entirely.
        assert!(index.word_candidates("of an it").is_none());
    }

    #[test]
    fn test_fuzzy_candidates_threshold() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);

        let (candidates, score) = index.fuzzy_candidates("blue eyez", 0.85).unwrap();
        assert_eq!(candidates[0].item_id, "eyes_blue");
        assert!(score >= 0.85 && score < 1.0);

        assert!(index.fuzzy_candidates("zzzzzz", 0.85).is_none());
    }

    #[test]
    fn test_localized_names_resolve_to_same_item() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);
        let candidates = index.exact_candidates("百褶裙").unwrap();
        assert_eq!(candidates[0].item_id, "skirt_pleated");
    }

    #[test]
    fn test_color_prefix_lookup() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);
        let (canonical, skip) = index.color_prefix("red dress").unwrap();
        assert_eq!(canonical, "red");
        assert_eq!(&"red dress"[skip..], "dress");
        // Localized color spelling maps back to the canonical token.
        let (canonical, _) = index.color_prefix("红色 dress").unwrap();
        assert_eq!(canonical, "red");
    }

    #[test]
    fn test_gesture_items_index_under_gesture_slot() {
        let store = fixture_store();
        let index = MatchIndex::build(&store);
        let candidates = index.exact_candidates("peace sign").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].slot, "gesture");
    }
}
