//! Generation Request Orchestration
//!
//! The host-facing entry point: one request in, one assembled prompt string
//! out. A request carries the output language, palette and mode toggles, an
//! optional reproducibility seed, and per-slot lock overrides.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::config::GeneratorConfig;
use super::engine::Randomizer;
use super::prompt::assemble_prompt;
use crate::core::catalog::CatalogStore;
use crate::core::language::Language;
use crate::core::slots::{slot_def, UPPER_BODY_MODE_DISABLED};

// ============================================================================
// Request
// ============================================================================

/// One prompt generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    /// Output language for prompt text.
    pub language: Language,

    /// Palette to sample clothing colors from. Color sampling is enabled
    /// exactly when a palette is selected.
    pub palette_id: Option<String>,

    /// When true, a sampled full-body outfit suppresses upper/lower body.
    pub full_body_mode: bool,

    /// When true, waist/lower-body/full-body/legs/feet slots are disabled.
    pub upper_body_mode: bool,

    /// Seed for reproducible output. A fresh entropy seed is used when
    /// absent.
    pub seed: Option<u64>,

    /// Free text prepended before the subject marker (e.g. quality tags).
    pub prefix: Option<String>,

    /// Per-slot lock overrides: slot name → value string. Values are
    /// resolved to catalog items case-insensitively; an unresolvable string
    /// is kept verbatim as display text.
    pub locks: IndexMap<String, String>,
}

// ============================================================================
// Orchestration
// ============================================================================

/// Build the resolved configuration for a request using the supplied
/// random source: randomize everything, apply upper-body mode, then apply
/// lock overrides.
pub fn prepare_config(
    store: &CatalogStore,
    request: &GenerationRequest,
    rng: &mut impl Rng,
) -> GeneratorConfig {
    let mut config = GeneratorConfig::with_all_slots();
    config.full_body_mode = request.full_body_mode;
    config.active_palette_id = request.palette_id.clone();

    let include_color = request.palette_id.is_some();
    let randomizer = Randomizer::new(store);
    randomizer.randomize_all(
        &mut config,
        include_color,
        request.palette_id.as_deref(),
        rng,
    );

    if request.upper_body_mode {
        for slot_name in UPPER_BODY_MODE_DISABLED {
            if let Some(slot) = config.slots.get_mut(*slot_name) {
                slot.enabled = false;
            }
        }
    }

    apply_locks(store, &mut config, &request.locks);
    config
}

/// Generate a prompt string for a request. Reusing the same seed and inputs
/// reproduces the identical string.
pub fn generate(store: &CatalogStore, request: &GenerationRequest) -> String {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = prepare_config(store, request, &mut rng);
    assemble_prompt(store, &config, request.language, request.prefix.as_deref())
}

/// Apply lock override strings on top of a randomized configuration.
///
/// A lock that resolves to a catalog item sets both the id and canonical
/// display name; one that does not is kept as a literal display value and
/// never escalates to an error.
fn apply_locks(
    store: &CatalogStore,
    config: &mut GeneratorConfig,
    locks: &IndexMap<String, String>,
) {
    for (slot_name, raw_value) in locks {
        let value = raw_value.trim();
        if value.is_empty() {
            continue;
        }
        let Some(def) = slot_def(slot_name) else {
            log::debug!("Ignoring lock for unknown slot '{slot_name}'");
            continue;
        };

        let slot = config.slot_mut(slot_name);
        match store.item_id_by_name(def.catalog, value) {
            Some(id) => {
                let id = id.to_string();
                let name = store
                    .item_by_id(def.catalog, &id)
                    .map(|item| item.name.clone());
                slot.value = name.or_else(|| Some(value.to_string()));
                slot.value_id = Some(id);
            }
            None => {
                log::debug!(
                    "Lock value '{value}' for slot '{slot_name}' matches no catalog item — \
                     using it verbatim"
                );
                slot.value = Some(value.to_string());
                slot.value_id = None;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::test_fixtures::fixture_store;
    use crate::core::generator::prompt::SUBJECT_MARKER;

    #[test]
    fn test_same_seed_produces_identical_prompt() {
        let store = fixture_store();
        let request = GenerationRequest {
            seed: Some(42),
            full_body_mode: true,
            palette_id: Some("pastel".to_string()),
            ..Default::default()
        };
        let first = generate(&store, &request);
        let second = generate(&store, &request);
        assert_eq!(first, second);
        assert!(first.starts_with(SUBJECT_MARKER));
    }

    #[test]
    fn test_lock_resolves_to_catalog_item() {
        let store = fixture_store();
        let mut request = GenerationRequest {
            seed: Some(1),
            ..Default::default()
        };
        request
            .locks
            .insert("hair_color".to_string(), "Pink Hair".to_string());

        let mut rng = StdRng::seed_from_u64(1);
        let config = prepare_config(&store, &request, &mut rng);
        let slot = config.slot("hair_color").unwrap();
        assert_eq!(slot.value_id.as_deref(), Some("hair_pink"));
        assert_eq!(slot.value.as_deref(), Some("pink hair"));
    }

    #[test]
    fn test_unresolvable_lock_kept_verbatim() {
        let store = fixture_store();
        let mut request = GenerationRequest {
            seed: Some(1),
            ..Default::default()
        };
        request
            .locks
            .insert("accessory".to_string(), "heirloom pendant".to_string());

        let prompt = generate(&store, &request);
        assert!(prompt.contains("heirloom pendant"));
    }

    #[test]
    fn test_upper_body_mode_disables_lower_slots() {
        let store = fixture_store();
        let request = GenerationRequest {
            seed: Some(9),
            upper_body_mode: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let config = prepare_config(&store, &request, &mut rng);
        for slot_name in UPPER_BODY_MODE_DISABLED {
            assert!(!config.slot(slot_name).unwrap().enabled);
        }

        let prompt = generate(&store, &request);
        assert!(!prompt.contains("pleated skirt"));
        assert!(!prompt.contains("long pants"));
        assert!(!prompt.contains("dress"));
        assert!(!prompt.contains("thighhighs"));
    }

    #[test]
    fn test_prefix_flows_through_to_prompt() {
        let store = fixture_store();
        let request = GenerationRequest {
            seed: Some(3),
            prefix: Some("masterpiece".to_string()),
            ..Default::default()
        };
        let prompt = generate(&store, &request);
        assert!(prompt.starts_with("masterpiece, 1girl"));
    }

    #[test]
    fn test_empty_lock_strings_are_ignored() {
        let store = fixture_store();
        let mut request = GenerationRequest {
            seed: Some(8),
            ..Default::default()
        };
        request.locks.insert("hair_color".to_string(), "  ".to_string());

        let baseline = GenerationRequest {
            seed: Some(8),
            ..Default::default()
        };
        assert_eq!(generate(&store, &request), generate(&store, &baseline));
    }
}
