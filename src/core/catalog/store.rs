//! In-Memory Catalog Store
//!
//! Loads all category catalogs from a data directory (or from bundled JSON
//! sources) and builds the lookup maps the rest of the engine runs on:
//! id → item, lowercase name → id, and the sub-index views backing each
//! slot's option list.
//!
//! Loading degrades gracefully: a missing or unparseable category is logged
//! and yields zero options for the slots that reference it. Only a fully
//! empty load is fatal.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use super::error::{CatalogError, CatalogResult};
use super::types::{CatalogFile, CatalogItem, ColorFile, Palette};
use crate::core::language::Language;
use crate::core::slots::{slot_def, SlotDef};

// ============================================================================
// Data File Layout
// ============================================================================

/// Category catalogs and their paths relative to the data directory.
const CATALOG_SOURCES: &[(&str, &str)] = &[
    ("clothing", "clothing/clothing_list.json"),
    ("expressions", "expressions/female_expressions.json"),
    ("hair", "hair/hair_catalog.json"),
    ("eyes", "eyes/eye_catalog.json"),
    ("body", "body/body_features.json"),
    ("poses", "poses/poses.json"),
    ("view_angles", "view_angles/view_angles.json"),
    ("backgrounds", "backgrounds/backgrounds.json"),
];

/// The dedicated colors file (palettes + individual color pool).
const COLORS_SOURCE: &str = "colors/color_palettes.json";

/// Catalog name reserved for the colors file in bundled sources.
pub const COLORS_CATALOG: &str = "colors";

// ============================================================================
// Catalog
// ============================================================================

/// One loaded category catalog with its lookup maps.
#[derive(Debug, Clone, Default)]
struct Catalog {
    items: Vec<CatalogItem>,
    /// id → position in `items`.
    by_id: HashMap<String, usize>,
    /// lowercase trimmed name/alias → id.
    id_by_name: HashMap<String, String>,
    index_by_category: HashMap<String, Vec<String>>,
    index_by_body_part: HashMap<String, Vec<String>>,
}

impl Catalog {
    fn from_file(file: CatalogFile) -> Self {
        let mut by_id = HashMap::new();
        let mut id_by_name = HashMap::new();

        for (idx, item) in file.items.iter().enumerate() {
            by_id.insert(item.id.clone(), idx);

            let mut names = vec![item.name.as_str()];
            names.extend(item.aliases.iter().map(String::as_str));
            for name in names {
                let key = name.trim().to_lowercase();
                if !key.is_empty() {
                    id_by_name.entry(key).or_insert_with(|| item.id.clone());
                }
            }
        }

        Self {
            items: file.items,
            by_id,
            id_by_name,
            index_by_category: file.index_by_category,
            index_by_body_part: file.index_by_body_part,
        }
    }

    fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|idx| &self.items[*idx])
    }
}

// ============================================================================
// CatalogStore
// ============================================================================

/// Process-wide, read-only catalog data. Built once at startup; concurrent
/// readers require no locking after construction.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: HashMap<String, Catalog>,
    /// Palettes in file order (insertion-ordered for stable listings).
    palettes: IndexMap<String, Palette>,
    individual_colors: Vec<String>,
    /// Canonical color token → localized display text by language code.
    color_i18n: HashMap<String, HashMap<String, String>>,
}

impl CatalogStore {
    /// Load all catalogs from a data directory.
    ///
    /// A missing or unparseable category file degrades that category to
    /// empty options with a warning. Fails with [`CatalogError::NoCatalogs`]
    /// only when nothing at all could be loaded.
    pub fn load(data_dir: &Path) -> CatalogResult<Self> {
        let mut store = Self::default();

        for (name, rel_path) in CATALOG_SOURCES {
            let path = data_dir.join(rel_path);
            match std::fs::read_to_string(&path) {
                Ok(contents) => store.add_catalog_source(name, &contents),
                Err(e) => {
                    let err = CatalogError::ReadFailed {
                        catalog: name.to_string(),
                        path,
                        source: e,
                    };
                    log::warn!("{err} — slots backed by it will be empty");
                }
            }
        }

        let colors_path = data_dir.join(COLORS_SOURCE);
        match std::fs::read_to_string(&colors_path) {
            Ok(contents) => store.add_colors_source(&contents),
            Err(e) => {
                log::warn!(
                    "Colors file unavailable at {}: {e} — palettes disabled",
                    colors_path.display()
                );
            }
        }

        if store.is_empty() {
            return Err(CatalogError::NoCatalogs {
                dir: data_dir.to_path_buf(),
            });
        }

        log::info!(
            "Catalog store loaded: {} catalogs, {} items, {} palettes, {} colors",
            store.catalogs.len(),
            store.item_count(),
            store.palettes.len(),
            store.individual_colors.len()
        );
        Ok(store)
    }

    /// Build a store from in-memory JSON sources, e.g. assets bundled via
    /// `include_str!`. Sources are `(catalog name, json)` pairs; the name
    /// [`COLORS_CATALOG`] routes to the colors file decoder.
    pub fn from_bundled(sources: &[(&str, &str)]) -> CatalogResult<Self> {
        let mut store = Self::default();
        for (name, json) in sources {
            if *name == COLORS_CATALOG {
                store.add_colors_source(json);
            } else {
                store.add_catalog_source(name, json);
            }
        }
        if store.is_empty() {
            return Err(CatalogError::NoCatalogs {
                dir: "<bundled>".into(),
            });
        }
        Ok(store)
    }

    fn add_catalog_source(&mut self, name: &str, json: &str) {
        match serde_json::from_str::<CatalogFile>(json) {
            Ok(file) => {
                log::debug!("Loaded catalog '{}' with {} items", name, file.items.len());
                self.catalogs.insert(name.to_string(), Catalog::from_file(file));
            }
            Err(e) => {
                let err = CatalogError::ParseFailed {
                    catalog: name.to_string(),
                    source: e,
                };
                log::warn!("{err} — slots backed by it will be empty");
            }
        }
    }

    fn add_colors_source(&mut self, json: &str) {
        match serde_json::from_str::<ColorFile>(json) {
            Ok(file) => {
                self.palettes = file
                    .palettes
                    .into_iter()
                    .map(|p| (p.id.clone(), p))
                    .collect();
                self.individual_colors = file.individual_colors;
                self.color_i18n = file.individual_colors_i18n;
            }
            Err(e) => {
                let err = CatalogError::ParseFailed {
                    catalog: COLORS_CATALOG.to_string(),
                    source: e,
                };
                log::warn!("{err} — palettes disabled");
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.catalogs.is_empty() && self.palettes.is_empty() && self.individual_colors.is_empty()
    }

    fn item_count(&self) -> usize {
        self.catalogs.values().map(|c| c.items.len()).sum()
    }

    // ========================================================================
    // Item Lookup
    // ========================================================================

    /// Resolve an item by catalog and id.
    pub fn item_by_id(&self, catalog: &str, id: &str) -> Option<&CatalogItem> {
        self.catalogs.get(catalog)?.item(id)
    }

    /// Resolve an item id by display name or alias, case-insensitively.
    pub fn item_id_by_name(&self, catalog: &str, name: &str) -> Option<&str> {
        self.catalogs
            .get(catalog)?
            .id_by_name
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Resolve a slot's item from either a canonical id or a display name.
    pub fn resolve_slot_item(
        &self,
        slot_name: &str,
        value_id: Option<&str>,
        display_value: Option<&str>,
    ) -> Option<&CatalogItem> {
        let def = slot_def(slot_name)?;
        let catalog = self.catalogs.get(def.catalog)?;

        if let Some(item) = value_id.and_then(|id| catalog.item(id)) {
            return Some(item);
        }
        let name = display_value?;
        let id = catalog.id_by_name.get(&name.trim().to_lowercase())?;
        catalog.item(id)
    }

    /// Localized display text for a slot's selected value, or `None` when
    /// the value does not resolve to a catalog item.
    pub fn resolve_slot_value_name(
        &self,
        slot_name: &str,
        value_id: Option<&str>,
        display_value: Option<&str>,
        language: Language,
    ) -> Option<&str> {
        self.resolve_slot_item(slot_name, value_id, display_value)
            .map(|item| item.localized_name(language))
    }

    // ========================================================================
    // Slot Options
    // ========================================================================

    /// All selectable options for a slot, in catalog index order. An
    /// unavailable catalog yields an empty list, never an error.
    ///
    /// Pose-category items tagged "gesture" are excluded from the generic
    /// `pose` slot so gesture content only surfaces through the dedicated
    /// `gesture` slot.
    pub fn options_for_slot(&self, slot_name: &str) -> Vec<&CatalogItem> {
        let Some(def) = slot_def(slot_name) else {
            return Vec::new();
        };
        let Some(catalog) = self.catalogs.get(def.catalog) else {
            return Vec::new();
        };

        match def.index_key {
            Some(key) => {
                let index = if def.catalog == "clothing" {
                    &catalog.index_by_body_part
                } else {
                    &catalog.index_by_category
                };
                index
                    .get(key)
                    .map(|ids| ids.iter().filter_map(|id| catalog.item(id)).collect())
                    .unwrap_or_default()
            }
            None => {
                let items = catalog.items.iter();
                if def.catalog == "poses" && slot_name == "pose" {
                    items
                        .filter(|i| i.category.as_deref() != Some("gesture"))
                        .collect()
                } else {
                    items.collect()
                }
            }
        }
    }

    /// Option listing for hosts: `(id, localized name)` pairs per slot.
    pub fn localized_options(&self, slot_name: &str, language: Language) -> Vec<(String, String)> {
        self.options_for_slot(slot_name)
            .into_iter()
            .map(|item| (item.id.clone(), item.localized_name(language).to_string()))
            .collect()
    }

    /// The slot definition table is re-exported for hosts iterating slots.
    pub fn slot_definitions(&self) -> &'static [SlotDef] {
        crate::core::slots::SLOT_DEFINITIONS
    }

    // ========================================================================
    // Clothing / Pose Attribute Maps
    // ========================================================================

    /// Whether a lower-body item covers the legs.
    pub fn lower_body_covers_legs(&self, item_id: &str) -> bool {
        self.item_by_id("clothing", item_id)
            .map(|item| item.covers_legs)
            .unwrap_or(false)
    }

    /// Map of lower-body item id → covers-legs flag, for host UIs.
    pub fn lower_body_covers_legs_by_id(&self) -> HashMap<String, bool> {
        self.options_for_slot("lower_body")
            .into_iter()
            .map(|item| (item.id.clone(), item.covers_legs))
            .collect()
    }

    /// Map of pose item id → uses-hands flag, for host UIs.
    pub fn pose_uses_hands_by_id(&self) -> HashMap<String, bool> {
        self.options_for_slot("pose")
            .into_iter()
            .map(|item| (item.id.clone(), item.uses_hands))
            .collect()
    }

    // ========================================================================
    // Colors & Palettes
    // ========================================================================

    /// All palettes, in file order.
    pub fn palettes(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.values()
    }

    /// Look up a palette by id.
    pub fn palette(&self, id: &str) -> Option<&Palette> {
        self.palettes.get(id)
    }

    /// The flat individual color pool.
    pub fn individual_colors(&self) -> &[String] {
        &self.individual_colors
    }

    /// Localization table for canonical color tokens.
    pub fn color_i18n(&self) -> &HashMap<String, HashMap<String, String>> {
        &self.color_i18n
    }

    /// Localized display text for a canonical color token, falling back to
    /// the token itself.
    pub fn localize_color<'a>(&'a self, token: &'a str, language: Language) -> &'a str {
        self.color_i18n
            .get(token)
            .and_then(|names| {
                names
                    .get(language.as_str())
                    .or_else(|| names.get("en"))
                    .map(String::as_str)
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or(token)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::test_fixtures::fixture_store;

    #[test]
    fn test_item_lookup_by_id_and_name() {
        let store = fixture_store();
        let item = store.item_by_id("clothing", "dress_casual").unwrap();
        assert_eq!(item.name, "dress");

        assert_eq!(store.item_id_by_name("clothing", "DRESS"), Some("dress_casual"));
        assert_eq!(store.item_id_by_name("clothing", " dress "), Some("dress_casual"));
        assert_eq!(store.item_id_by_name("clothing", "no such"), None);
    }

    #[test]
    fn test_alias_lookup() {
        let store = fixture_store();
        assert_eq!(
            store.item_id_by_name("clothing", "one-piece dress"),
            Some("dress_casual")
        );
    }

    #[test]
    fn test_options_for_slot_follow_index_order() {
        let store = fixture_store();
        let options: Vec<_> = store
            .options_for_slot("lower_body")
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(options, vec!["skirt_pleated", "pants_long"]);
    }

    #[test]
    fn test_unknown_slot_and_missing_catalog_yield_empty() {
        let store = fixture_store();
        assert!(store.options_for_slot("no_such_slot").is_empty());
        // expressions catalog is absent from the fixture
        assert!(store.options_for_slot("expression").is_empty());
    }

    #[test]
    fn test_pose_slot_excludes_gestures() {
        let store = fixture_store();
        let pose_ids: Vec<_> = store
            .options_for_slot("pose")
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(pose_ids, vec!["pose_standing"]);

        let gesture_ids: Vec<_> = store
            .options_for_slot("gesture")
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(gesture_ids, vec!["gesture_peace"]);
    }

    #[test]
    fn test_covers_legs_map() {
        let store = fixture_store();
        assert!(store.lower_body_covers_legs("pants_long"));
        assert!(!store.lower_body_covers_legs("skirt_pleated"));
        assert!(!store.lower_body_covers_legs("missing_id"));

        let map = store.lower_body_covers_legs_by_id();
        assert_eq!(map.get("pants_long"), Some(&true));
        assert_eq!(map.get("skirt_pleated"), Some(&false));
    }

    #[test]
    fn test_color_localization_fallback() {
        let store = fixture_store();
        assert_eq!(store.localize_color("red", Language::Zh), "红色");
        assert_eq!(store.localize_color("red", Language::En), "red");
        assert_eq!(store.localize_color("unknown_color", Language::Zh), "unknown_color");
    }

    #[test]
    fn test_resolve_slot_item_prefers_id() {
        let store = fixture_store();
        let item = store
            .resolve_slot_item("lower_body", Some("pants_long"), Some("pleated skirt"))
            .unwrap();
        assert_eq!(item.id, "pants_long");

        let by_name = store
            .resolve_slot_item("lower_body", None, Some("Pleated Skirt"))
            .unwrap();
        assert_eq!(by_name.id, "skirt_pleated");
    }

    #[test]
    fn test_empty_bundle_is_fatal() {
        let err = CatalogStore::from_bundled(&[]).unwrap_err();
        assert!(matches!(err, CatalogError::NoCatalogs { .. }));
    }

    #[test]
    fn test_malformed_catalog_degrades() {
        let store = CatalogStore::from_bundled(&[
            ("clothing", "not json at all"),
            ("hair", r#"{"items": [{"id": "h", "name": "long hair"}]}"#),
        ])
        .unwrap();
        assert!(store.options_for_slot("upper_body").is_empty());
        assert!(store.item_by_id("hair", "h").is_some());
    }
}
