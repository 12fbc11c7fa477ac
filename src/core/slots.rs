//! Static Slot Schema
//!
//! Defines the fixed set of character prompt slots and their wiring to
//! catalogs:
//! - Which catalog backs each slot, and under which index key
//! - Whether the slot carries a color modifier
//! - The section (category) each slot belongs to
//!
//! The declaration order of [`SLOT_DEFINITIONS`] is semantic: randomization
//! iterates it, and the reverse parser breaks candidate ties by it. The
//! separate [`PROMPT_ORDER`] controls how slots are emitted into prompt text
//! (e.g. `full_body` before layered clothing items).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

/// Section a slot belongs to, used for per-section randomization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Appearance,
    Body,
    Expression,
    Clothing,
    Pose,
    Background,
}

impl Category {
    /// All categories, in section order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Appearance,
            Category::Body,
            Category::Expression,
            Category::Clothing,
            Category::Pose,
            Category::Background,
        ]
    }

    /// Stable string form matching the catalog data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Appearance => "appearance",
            Category::Body => "body",
            Category::Expression => "expression",
            Category::Clothing => "clothing",
            Category::Pose => "pose",
            Category::Background => "background",
        }
    }
}

// ============================================================================
// Slot Definitions
// ============================================================================

/// Static descriptor wiring one slot to its backing catalog.
#[derive(Debug, Clone, Copy)]
pub struct SlotDef {
    /// Slot name (e.g. `hair_color`, `upper_body`).
    pub name: &'static str,
    /// Section this slot belongs to.
    pub category: Category,
    /// Catalog that supplies this slot's options.
    pub catalog: &'static str,
    /// Sub-index key within the catalog, `None` for whole-catalog slots.
    pub index_key: Option<&'static str>,
    /// Whether the slot accepts a color modifier.
    pub has_color: bool,
}

/// All slots, in declaration order. This order is load-bearing: it is the
/// randomization iteration order and the parser's candidate tie-break order.
pub const SLOT_DEFINITIONS: &[SlotDef] = &[
    // Appearance
    SlotDef { name: "hair_style", category: Category::Appearance, catalog: "hair", index_key: Some("style"), has_color: false },
    SlotDef { name: "hair_length", category: Category::Appearance, catalog: "hair", index_key: Some("length"), has_color: false },
    SlotDef { name: "hair_color", category: Category::Appearance, catalog: "hair", index_key: Some("color"), has_color: false },
    SlotDef { name: "hair_texture", category: Category::Appearance, catalog: "hair", index_key: Some("texture"), has_color: false },
    SlotDef { name: "eye_color", category: Category::Appearance, catalog: "eyes", index_key: Some("color"), has_color: false },
    SlotDef { name: "eye_expression_quality", category: Category::Appearance, catalog: "eyes", index_key: Some("expression_quality"), has_color: false },
    SlotDef { name: "eye_shape", category: Category::Appearance, catalog: "eyes", index_key: Some("eye_shape"), has_color: false },
    SlotDef { name: "eye_pupil_state", category: Category::Appearance, catalog: "eyes", index_key: Some("pupil_state"), has_color: false },
    SlotDef { name: "eye_state", category: Category::Appearance, catalog: "eyes", index_key: Some("eye_state"), has_color: false },
    SlotDef { name: "eye_accessories", category: Category::Appearance, catalog: "eyes", index_key: Some("eye_accessories"), has_color: false },
    // Body
    SlotDef { name: "body_type", category: Category::Body, catalog: "body", index_key: Some("body_type"), has_color: false },
    SlotDef { name: "height", category: Category::Body, catalog: "body", index_key: Some("height"), has_color: false },
    SlotDef { name: "skin", category: Category::Body, catalog: "body", index_key: Some("skin"), has_color: false },
    SlotDef { name: "age_appearance", category: Category::Body, catalog: "body", index_key: Some("age_appearance"), has_color: false },
    SlotDef { name: "special_features", category: Category::Body, catalog: "body", index_key: Some("special_features"), has_color: false },
    // Expression
    SlotDef { name: "expression", category: Category::Expression, catalog: "expressions", index_key: None, has_color: false },
    // Clothing
    SlotDef { name: "head", category: Category::Clothing, catalog: "clothing", index_key: Some("head"), has_color: true },
    SlotDef { name: "neck", category: Category::Clothing, catalog: "clothing", index_key: Some("neck"), has_color: true },
    SlotDef { name: "upper_body", category: Category::Clothing, catalog: "clothing", index_key: Some("upper_body"), has_color: true },
    SlotDef { name: "waist", category: Category::Clothing, catalog: "clothing", index_key: Some("waist"), has_color: true },
    SlotDef { name: "lower_body", category: Category::Clothing, catalog: "clothing", index_key: Some("lower_body"), has_color: true },
    SlotDef { name: "full_body", category: Category::Clothing, catalog: "clothing", index_key: Some("full_body"), has_color: true },
    SlotDef { name: "outerwear", category: Category::Clothing, catalog: "clothing", index_key: Some("outerwear"), has_color: true },
    SlotDef { name: "hands", category: Category::Clothing, catalog: "clothing", index_key: Some("hands"), has_color: true },
    SlotDef { name: "legs", category: Category::Clothing, catalog: "clothing", index_key: Some("legs"), has_color: true },
    SlotDef { name: "feet", category: Category::Clothing, catalog: "clothing", index_key: Some("feet"), has_color: true },
    SlotDef { name: "accessory", category: Category::Clothing, catalog: "clothing", index_key: Some("accessory"), has_color: true },
    // Pose
    SlotDef { name: "pose", category: Category::Pose, catalog: "poses", index_key: None, has_color: false },
    SlotDef { name: "gesture", category: Category::Pose, catalog: "poses", index_key: Some("gesture"), has_color: false },
    SlotDef { name: "view_angle", category: Category::Pose, catalog: "view_angles", index_key: None, has_color: false },
    // Background
    SlotDef { name: "background", category: Category::Background, catalog: "backgrounds", index_key: None, has_color: false },
];

/// Emission order for prompt assembly. Appearance reads color-first for hair,
/// and `full_body` is emitted before the layered clothing items it overrides.
pub const PROMPT_ORDER: &[&str] = &[
    "hair_color", "hair_length", "hair_style", "hair_texture",
    "eye_color", "eye_expression_quality", "eye_shape", "eye_pupil_state",
    "eye_state", "eye_accessories",
    "body_type", "height", "skin", "age_appearance", "special_features",
    "expression",
    "full_body", "head", "neck", "upper_body", "waist", "lower_body",
    "outerwear", "hands", "legs", "feet", "accessory",
    "view_angle", "pose", "gesture",
    "background",
];

/// Slots that upper-body mode removes from the output entirely.
pub const UPPER_BODY_MODE_DISABLED: &[&str] =
    &["waist", "lower_body", "full_body", "legs", "feet"];

// ============================================================================
// Lookup
// ============================================================================

static SLOT_TABLE: Lazy<HashMap<&'static str, (usize, &'static SlotDef)>> = Lazy::new(|| {
    SLOT_DEFINITIONS
        .iter()
        .enumerate()
        .map(|(idx, def)| (def.name, (idx, def)))
        .collect()
});

/// Look up a slot definition by name.
pub fn slot_def(name: &str) -> Option<&'static SlotDef> {
    SLOT_TABLE.get(name).map(|(_, def)| *def)
}

/// Position of a slot in declaration order, used for candidate tie-breaking.
pub fn declaration_index(name: &str) -> Option<usize> {
    SLOT_TABLE.get(name).map(|(idx, _)| *idx)
}

/// All slot names belonging to one category, in declaration order.
pub fn slots_in_category(category: Category) -> impl Iterator<Item = &'static SlotDef> {
    SLOT_DEFINITIONS.iter().filter(move |def| def.category == category)
}

// ============================================================================
// Tests
// ============================================================================
