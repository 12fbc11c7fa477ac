//! Randomization Engine
//!
//! Samples catalog items into slots and resolves cross-slot constraints.
//! All sampling draws from a caller-supplied random source so a request can
//! be reproduced from its seed. Sampling never fails: an empty option list
//! leaves the slot null, and the slot is simply omitted from assembled
//! output.

use rand::prelude::*;

use super::config::{ColorMode, GeneratorConfig};
use crate::core::catalog::{CatalogItem, CatalogStore};
use crate::core::slots::{slot_def, slots_in_category, Category, SLOT_DEFINITIONS};

/// Fallback pool used when the colors file supplies no individual colors.
const BASIC_COLORS: &[&str] = &[
    "white", "black", "red", "blue", "pink", "purple", "green", "yellow",
];

/// Samples slot values and colors from a catalog store.
pub struct Randomizer<'a> {
    store: &'a CatalogStore,
}

impl<'a> Randomizer<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    // ========================================================================
    // Sampling
    // ========================================================================

    /// Uniform-random choice over a slot's options. `None` when the slot's
    /// catalog yields no items.
    pub fn sample_slot(&self, slot_name: &str, rng: &mut impl Rng) -> Option<&'a CatalogItem> {
        let options = self.store.options_for_slot(slot_name);
        options.choose(rng).copied()
    }

    /// Random color from a named palette. `None` for an unknown or empty
    /// palette.
    pub fn sample_palette_color(&self, palette_id: &str, rng: &mut impl Rng) -> Option<String> {
        self.store
            .palette(palette_id)
            .and_then(|palette| palette.colors.choose(rng).cloned())
    }

    /// Random color from the full individual pool, falling back to a small
    /// built-in list when the pool is empty.
    pub fn sample_pool_color(&self, rng: &mut impl Rng) -> String {
        let pool = self.store.individual_colors();
        if pool.is_empty() {
            BASIC_COLORS.choose(rng).copied().unwrap_or("white").to_string()
        } else {
            pool.choose(rng).cloned().unwrap_or_default()
        }
    }

    // ========================================================================
    // Slot Randomization
    // ========================================================================

    /// Randomize a single slot. No-op when the slot is locked. Color is
    /// sampled only for color-capable slots when requested; a selected
    /// palette takes precedence over `color_mode = random`.
    pub fn randomize_slot(
        &self,
        config: &mut GeneratorConfig,
        slot_name: &str,
        include_color: bool,
        palette_id: Option<&str>,
        rng: &mut impl Rng,
    ) {
        let Some(def) = slot_def(slot_name) else {
            return;
        };
        if config.slot(slot_name).map(|s| s.locked).unwrap_or(false) {
            return;
        }

        let sampled = self
            .sample_slot(slot_name, rng)
            .map(|item| (item.name.clone(), item.id.clone()));

        let color_mode = config.color_mode;
        let color = if include_color && def.has_color {
            if let Some(pid) = palette_id {
                self.sample_palette_color(pid, rng)
            } else if color_mode == ColorMode::Random {
                Some(self.sample_pool_color(rng))
            } else {
                None
            }
        } else {
            None
        };

        let slot = config.slot_mut(slot_name);
        match sampled {
            Some((name, id)) => {
                slot.value = Some(name);
                slot.value_id = Some(id);
            }
            None => slot.clear_value(),
        }
        if let Some(color) = color {
            slot.color = Some(color);
            slot.color_enabled = true;
        }
    }

    /// Randomize every non-locked slot in schema declaration order, then
    /// apply the cross-slot constraints: the full-body pass first, the
    /// leg-coverage pass second.
    pub fn randomize_all(
        &self,
        config: &mut GeneratorConfig,
        include_color: bool,
        palette_id: Option<&str>,
        rng: &mut impl Rng,
    ) {
        for def in SLOT_DEFINITIONS {
            self.randomize_slot(config, def.name, include_color, palette_id, rng);
        }

        if config.full_body_mode {
            self.apply_full_body_override(config);
        }
        self.apply_leg_coverage(config);
    }

    /// Randomize only the non-locked slots of one section, then re-apply
    /// the same constraint passes.
    pub fn randomize_section(
        &self,
        config: &mut GeneratorConfig,
        category: Category,
        include_color: bool,
        palette_id: Option<&str>,
        rng: &mut impl Rng,
    ) {
        for def in slots_in_category(category) {
            self.randomize_slot(config, def.name, include_color, palette_id, rng);
        }

        if config.full_body_mode {
            self.apply_full_body_override(config);
        }
        self.apply_leg_coverage(config);
    }

    // ========================================================================
    // Constraint Passes
    // ========================================================================

    /// When a full-body outfit is selected, clear the separate upper/lower
    /// body slots unless they are individually locked.
    fn apply_full_body_override(&self, config: &mut GeneratorConfig) {
        let full_body_set = config
            .slot("full_body")
            .map(|s| s.enabled && s.has_value())
            .unwrap_or(false);
        if !full_body_set {
            return;
        }

        for slot_name in ["upper_body", "lower_body"] {
            if let Some(slot) = config.slots.get_mut(slot_name) {
                if !slot.locked {
                    slot.clear_value();
                }
            }
        }
    }

    /// When the selected lower-body item covers the legs, clear the `legs`
    /// slot value.
    fn apply_leg_coverage(&self, config: &mut GeneratorConfig) {
        let covers = config
            .slot("lower_body")
            .filter(|s| s.enabled)
            .and_then(|s| s.value_id.as_deref())
            .map(|id| self.store.lower_body_covers_legs(id))
            .unwrap_or(false);
        if !covers {
            return;
        }

        if let Some(legs) = config.slots.get_mut("legs") {
            legs.clear_value();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
