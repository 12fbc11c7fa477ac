//! Generator Configuration
//!
//! The mutable per-request state: one [`SlotState`] per slot plus the
//! color-mode and full-body toggles. The whole record serializes losslessly
//! so hosts can persist named configurations and load them back.

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::slots::SLOT_DEFINITIONS;

// ============================================================================
// Color Mode
// ============================================================================

/// How colors are sampled for color-capable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// No color sampling.
    #[default]
    None,
    /// Sample from the active palette's color list.
    Palette,
    /// Sample from the full individual color pool.
    Random,
}

// ============================================================================
// Slot State
// ============================================================================

/// Weight domain bounds for prompt emphasis syntax.
pub const WEIGHT_MIN: f32 = 0.1;
pub const WEIGHT_MAX: f32 = 2.0;

/// One slot's resolved value within a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotState {
    /// Whether the slot participates in output.
    pub enabled: bool,

    /// A locked slot is never overwritten by randomization.
    pub locked: bool,

    /// Display text of the current selection. May hold a literal string
    /// with no catalog backing when a lock value failed to resolve.
    pub value: Option<String>,

    /// Canonical item id of the current selection.
    pub value_id: Option<String>,

    /// Canonical color token modifier, if sampled or set.
    pub color: Option<String>,

    /// Whether the color modifier is included in output.
    pub color_enabled: bool,

    /// Prompt weight; 1.0 emits no weight syntax.
    pub weight: f32,
}

impl Default for SlotState {
    fn default() -> Self {
        Self {
            enabled: true,
            locked: false,
            value: None,
            value_id: None,
            color: None,
            color_enabled: false,
            weight: 1.0,
        }
    }
}

impl SlotState {
    /// Set the weight, clamped to the supported domain.
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
    }

    /// Clear the selected value (keeps enablement, lock, and weight).
    pub fn clear_value(&mut self) {
        self.value = None;
        self.value_id = None;
    }

    /// Whether this slot has anything to emit.
    pub fn has_value(&self) -> bool {
        self.value_id.is_some() || self.value.is_some()
    }
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// Full generator state: per-slot states plus global toggles. Constructed
/// fresh per generation request or deserialized from a persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Display name for persisted configurations.
    #[serde(default = "default_name")]
    pub name: String,

    /// RFC 3339 creation stamp, set when the record is named for saving.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Color sampling mode.
    #[serde(default)]
    pub color_mode: ColorMode,

    /// Active palette id when `color_mode` is palette-based.
    #[serde(default)]
    pub active_palette_id: Option<String>,

    /// When true, a selected full-body outfit suppresses the separate
    /// upper/lower body slots.
    #[serde(default = "default_true")]
    pub full_body_mode: bool,

    /// Slot states keyed by slot name, in schema declaration order.
    #[serde(default)]
    pub slots: IndexMap<String, SlotState>,
}

fn default_name() -> String {
    "Untitled".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            created_at: None,
            color_mode: ColorMode::None,
            active_palette_id: None,
            full_body_mode: true,
            slots: IndexMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// A configuration with every schema slot present in declaration order.
    pub fn with_all_slots() -> Self {
        let mut config = Self::default();
        for def in SLOT_DEFINITIONS {
            config.slots.insert(def.name.to_string(), SlotState::default());
        }
        config
    }

    /// Slot state by name, inserting a default entry if absent.
    pub fn slot_mut(&mut self, slot_name: &str) -> &mut SlotState {
        self.slots.entry(slot_name.to_string()).or_default()
    }

    /// Slot state by name.
    pub fn slot(&self, slot_name: &str) -> Option<&SlotState> {
        self.slots.get(slot_name)
    }

    /// Name the record and stamp its creation time for persistence.
    pub fn into_named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.created_at = Some(Utc::now().to_rfc3339());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
