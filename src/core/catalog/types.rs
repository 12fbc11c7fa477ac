//! Catalog Data Models
//!
//! Serde types matching the on-disk catalog JSON format: one file per
//! category with an `items` array plus an index structure
//! (`index_by_category` or `index_by_body_part`), and a dedicated colors
//! file supplying palettes, the individual color pool, and color
//! localization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::language::Language;

// ============================================================================
// Catalog Items
// ============================================================================

/// One selectable attribute value. Created at load time, immutable after.
/// Identity is `(catalog name, id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable unique token, scoped to the owning catalog.
    pub id: String,

    /// Canonical English display text.
    pub name: String,

    /// Localized display text by language code. "en" is expected but not
    /// required; lookups fall back to `name`.
    #[serde(default)]
    pub name_i18n: HashMap<String, String>,

    /// Alternate surface forms usable for exact lookup.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Sub-category tag. Pose items tagged "gesture" surface only through
    /// the dedicated `gesture` slot.
    #[serde(default)]
    pub category: Option<String>,

    /// Whether this lower-body item covers the legs (suppresses the `legs`
    /// slot). Only meaningful for lower-body clothing.
    #[serde(default)]
    pub covers_legs: bool,

    /// Whether this pose occupies the hands. Only meaningful for poses;
    /// surfaced to hosts as a UI hint.
    #[serde(default)]
    pub uses_hands: bool,
}

impl CatalogItem {
    /// Localized display text with fallback: requested language → "en" →
    /// canonical `name` → raw `id`.
    pub fn localized_name(&self, language: Language) -> &str {
        let by_lang = |code: &str| {
            self.name_i18n
                .get(code)
                .map(String::as_str)
                .filter(|s| !s.trim().is_empty())
        };
        by_lang(language.as_str())
            .or_else(|| by_lang("en"))
            .unwrap_or(if self.name.is_empty() { &self.id } else { &self.name })
    }
}

/// On-disk shape of one category catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// All items in this catalog.
    #[serde(default)]
    pub items: Vec<CatalogItem>,

    /// Sub-key → ordered item ids (hair, eyes, body, poses).
    #[serde(default)]
    pub index_by_category: HashMap<String, Vec<String>>,

    /// Body part → ordered item ids (clothing).
    #[serde(default)]
    pub index_by_body_part: HashMap<String, Vec<String>>,
}

// ============================================================================
// Colors
// ============================================================================

/// A named, curated subset of color tokens usable for color sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub id: String,

    /// Canonical English palette name.
    #[serde(default)]
    pub name: String,

    /// Localized palette names by language code.
    #[serde(default)]
    pub name_i18n: HashMap<String, String>,

    /// Ordered canonical color tokens.
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Palette {
    /// Localized palette name with fallback: requested language → "en" →
    /// canonical `name` → raw `id`.
    pub fn localized_name(&self, language: Language) -> &str {
        let by_lang = |code: &str| {
            self.name_i18n
                .get(code)
                .map(String::as_str)
                .filter(|s| !s.trim().is_empty())
        };
        by_lang(language.as_str())
            .or_else(|| by_lang("en"))
            .unwrap_or(if self.name.is_empty() { &self.id } else { &self.name })
    }
}

/// On-disk shape of the dedicated colors file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorFile {
    /// Named palettes.
    #[serde(default)]
    pub palettes: Vec<Palette>,

    /// Flat pool of canonical color tokens for fully random color sampling.
    #[serde(default)]
    pub individual_colors: Vec<String>,

    /// Canonical color token → localized display text by language code.
    #[serde(default)]
    pub individual_colors_i18n: HashMap<String, HashMap<String, String>>,
}

// ============================================================================
// Tests
// ============================================================================
