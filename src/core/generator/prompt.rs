//! Prompt Assembly
//!
//! Serializes a resolved configuration into the final prompt string: a
//! leading subject marker, slots in canonical emission order with localized
//! names, optional color prefixes, and `(text:weight)` emphasis syntax.

use super::config::GeneratorConfig;
use crate::core::catalog::CatalogStore;
use crate::core::language::Language;
use crate::core::slots::PROMPT_ORDER;

/// Fixed leading subject marker.
pub const SUBJECT_MARKER: &str = "1girl";

/// Separator between emitted segments.
const SEGMENT_SEPARATOR: &str = ", ";

/// Assemble the ordered segment list for a configuration.
///
/// Skip rules, in order: disabled slots, empty slots, upper/lower body when
/// a full-body outfit is active in full-body mode, and `legs` when the
/// selected lower-body item covers the legs.
pub fn assemble_segments(
    store: &CatalogStore,
    config: &GeneratorConfig,
    language: Language,
) -> Vec<String> {
    let mut segments = vec![SUBJECT_MARKER.to_string()];

    let full_body_active = config
        .slot("full_body")
        .map(|s| s.enabled && s.has_value())
        .unwrap_or(false);

    let lower_body_covers_legs = config
        .slot("lower_body")
        .filter(|s| s.enabled)
        .and_then(|s| s.value_id.as_deref())
        .map(|id| store.lower_body_covers_legs(id))
        .unwrap_or(false);

    for slot_name in PROMPT_ORDER {
        let Some(slot) = config.slot(slot_name) else {
            continue;
        };
        if !slot.enabled || !slot.has_value() {
            continue;
        }
        if config.full_body_mode
            && full_body_active
            && matches!(*slot_name, "upper_body" | "lower_body")
        {
            continue;
        }
        if *slot_name == "legs" && lower_body_covers_legs {
            continue;
        }

        let localized = store
            .resolve_slot_value_name(
                slot_name,
                slot.value_id.as_deref(),
                slot.value.as_deref(),
                language,
            )
            .map(str::to_string)
            .or_else(|| slot.value.clone())
            .or_else(|| slot.value_id.clone());
        let Some(text) = localized else {
            continue;
        };

        let mut segment = match (&slot.color, slot.color_enabled) {
            (Some(color), true) => {
                format!("{} {text}", store.localize_color(color, language))
            }
            _ => text,
        };

        if slot.weight != 1.0 {
            segment = format!("({segment}:{:.1})", slot.weight);
        }

        segments.push(segment);
    }

    segments
}

/// Assemble the final prompt string, with an optional free-text prefix
/// prepended before the subject marker.
pub fn assemble_prompt(
    store: &CatalogStore,
    config: &GeneratorConfig,
    language: Language,
    prefix: Option<&str>,
) -> String {
    let body = assemble_segments(store, config, language).join(SEGMENT_SEPARATOR);
    match prefix.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{prefix}{SEGMENT_SEPARATOR}{body}"),
        None => body,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::test_fixtures::fixture_store;

    fn config_with(entries: &[(&str, &str, &str)]) -> GeneratorConfig {
        let mut config = GeneratorConfig::with_all_slots();
        for (slot_name, id, name) in entries {
            let slot = config.slot_mut(slot_name);
            slot.value_id = Some(id.to_string());
            slot.value = Some(name.to_string());
        }
        config
    }

    #[test]
    fn test_empty_config_emits_only_subject_marker() {
        let store = fixture_store();
        let config = GeneratorConfig::with_all_slots();
        assert_eq!(assemble_prompt(&store, &config, Language::En, None), "1girl");
    }

    #[test]
    fn test_emission_follows_prompt_order() {
        let store = fixture_store();
        let config = config_with(&[
            ("background", "bg_bedroom", "bedroom"),
            ("hair_color", "hair_pink", "pink hair"),
            ("eye_color", "eyes_blue", "blue eyes"),
        ]);
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, pink hair, blue eyes, bedroom"
        );
    }

    #[test]
    fn test_weight_serialization() {
        let store = fixture_store();
        let mut config = config_with(&[("eye_color", "eyes_blue", "blue eyes")]);
        config.slot_mut("eye_color").set_weight(1.3);
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, (blue eyes:1.3)"
        );

        config.slot_mut("eye_color").set_weight(1.0);
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, blue eyes"
        );
    }

    #[test]
    fn test_color_prefix_is_localized() {
        let store = fixture_store();
        let mut config = config_with(&[("full_body", "dress_casual", "dress")]);
        {
            let slot = config.slot_mut("full_body");
            slot.color = Some("red".to_string());
            slot.color_enabled = true;
        }
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, red dress"
        );
        assert_eq!(
            assemble_prompt(&store, &config, Language::Zh, None),
            "1girl, 红色 dress"
        );
    }

    #[test]
    fn test_disabled_color_is_not_emitted() {
        let store = fixture_store();
        let mut config = config_with(&[("full_body", "dress_casual", "dress")]);
        config.slot_mut("full_body").color = Some("red".to_string());
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, dress"
        );
    }

    #[test]
    fn test_full_body_mode_suppresses_upper_and_lower() {
        let store = fixture_store();
        let mut config = config_with(&[
            ("full_body", "dress_casual", "dress"),
            ("upper_body", "shirt_white", "white shirt"),
            ("lower_body", "skirt_pleated", "pleated skirt"),
        ]);
        config.full_body_mode = true;
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, dress"
        );

        config.full_body_mode = false;
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, dress, white shirt, pleated skirt"
        );
    }

    #[test]
    fn test_leg_coverage_suppresses_legs_segment() {
        let store = fixture_store();
        let mut config = config_with(&[
            ("lower_body", "pants_long", "long pants"),
            ("legs", "thighhighs", "thighhighs"),
        ]);
        config.full_body_mode = false;
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, long pants"
        );
    }

    #[test]
    fn test_localization_falls_back_to_stored_display_value() {
        let store = fixture_store();
        // A lock string that resolved to no catalog item: literal display text.
        let mut config = GeneratorConfig::with_all_slots();
        config.slot_mut("accessory").value = Some("heirloom pendant".to_string());
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, None),
            "1girl, heirloom pendant"
        );
    }

    #[test]
    fn test_localized_output_language() {
        let store = fixture_store();
        let config = config_with(&[
            ("hair_length", "hair_long", "long hair"),
            ("lower_body", "skirt_pleated", "pleated skirt"),
        ]);
        assert_eq!(
            assemble_prompt(&store, &config, Language::Zh, None),
            "1girl, 长发, 百褶裙"
        );
    }

    #[test]
    fn test_prefix_prepended_before_subject_marker() {
        let store = fixture_store();
        let config = config_with(&[("eye_color", "eyes_blue", "blue eyes")]);
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, Some("masterpiece, best quality")),
            "masterpiece, best quality, 1girl, blue eyes"
        );
        assert_eq!(
            assemble_prompt(&store, &config, Language::En, Some("   ")),
            "1girl, blue eyes"
        );
    }
}
