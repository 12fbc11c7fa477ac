//! Color Prefix Trie
//!
//! Character trie over every known color surface form (canonical tokens and
//! localized spellings), each path terminating in the canonical token. Lets
//! the parser strip a leading color from a token in time proportional to the
//! matched prefix length.

use std::collections::HashMap;

/// One trie node: child table keyed by character, plus the canonical color
/// token when a surface form ends here.
#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: Option<String>,
}

/// Prefix trie mapping color surface forms to canonical color tokens.
///
/// Surface forms are stored lowercased; callers are expected to pass
/// lowercased text to [`ColorTrie::find_prefix`].
#[derive(Debug, Default)]
pub struct ColorTrie {
    root: TrieNode,
}

impl ColorTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a surface form mapping to a canonical token.
    pub fn insert(&mut self, surface: &str, canonical: &str) {
        let surface = surface.trim().to_lowercase();
        if surface.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for ch in surface.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = Some(canonical.to_string());
    }

    /// Longest known color prefix of `text` that is immediately followed by
    /// a space. Returns the canonical token and the byte offset just past
    /// that space, or `None` when no bounded prefix matches.
    pub fn find_prefix(&self, text: &str) -> Option<(&str, usize)> {
        let bytes = text.as_bytes();
        let mut node = &self.root;
        let mut best = None;

        for (idx, ch) in text.char_indices() {
            let Some(next) = node.children.get(&ch) else {
                break;
            };
            node = next;
            if let Some(canonical) = &node.terminal {
                let end = idx + ch.len_utf8();
                if bytes.get(end) == Some(&b' ') {
                    best = Some((canonical.as_str(), end + 1));
                }
            }
        }

        best
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn trie() -> ColorTrie {
        let mut trie = ColorTrie::new();
        trie.insert("red", "red");
        trie.insert("dark red", "dark_red");
        trie.insert("红色", "red");
        trie
    }

    #[test]
    fn test_prefix_requires_word_boundary() {
        let trie = trie();
        assert_eq!(trie.find_prefix("red dress"), Some(("red", 4)));
        // No trailing space: the bare color is not a prefix match.
        assert_eq!(trie.find_prefix("red"), None);
        // Color embedded in a longer word does not match.
        assert_eq!(trie.find_prefix("redish dress"), None);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let trie = trie();
        assert_eq!(trie.find_prefix("dark red dress"), Some(("dark_red", 9)));
    }

    #[test]
    fn test_localized_surface_maps_to_canonical() {
        let trie = trie();
        let (canonical, skip) = trie.find_prefix("红色 dress").unwrap();
        assert_eq!(canonical, "red");
        assert_eq!(&"红色 dress"[skip..], "dress");
    }

    #[test]
    fn test_unknown_prefix() {
        let trie = trie();
        assert_eq!(trie.find_prefix("green dress"), None);
        assert_eq!(trie.find_prefix(""), None);
    }
}
