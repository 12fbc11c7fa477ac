//! Shared in-memory catalog fixtures for unit tests.

use super::store::CatalogStore;

pub(crate) const HAIR_JSON: &str = r#"{
    "items": [
        {"id": "hair_blonde", "name": "blonde hair"},
        {"id": "hair_pink", "name": "pink hair"},
        {"id": "hair_long", "name": "long hair", "name_i18n": {"zh": "长发"}},
        {"id": "hair_twintails", "name": "twintails"}
    ],
    "index_by_category": {
        "color": ["hair_blonde", "hair_pink"],
        "length": ["hair_long"],
        "style": ["hair_twintails"]
    }
}"#;

pub(crate) const EYES_JSON: &str = r#"{
    "items": [
        {"id": "eyes_blue", "name": "blue eyes", "name_i18n": {"zh": "蓝色眼睛"}},
        {"id": "eyes_red", "name": "red eyes"}
    ],
    "index_by_category": {
        "color": ["eyes_blue", "eyes_red"]
    }
}"#;

pub(crate) const CLOTHING_JSON: &str = r#"{
    "items": [
        {"id": "shirt_white", "name": "white shirt"},
        {"id": "skirt_pleated", "name": "pleated skirt", "name_i18n": {"zh": "百褶裙"}},
        {"id": "pants_long", "name": "long pants", "covers_legs": true},
        {"id": "dress_casual", "name": "dress", "aliases": ["one-piece dress"]},
        {"id": "thighhighs", "name": "thighhighs"}
    ],
    "index_by_body_part": {
        "upper_body": ["shirt_white"],
        "lower_body": ["skirt_pleated", "pants_long"],
        "full_body": ["dress_casual"],
        "legs": ["thighhighs"]
    }
}"#;

pub(crate) const POSES_JSON: &str = r#"{
    "items": [
        {"id": "pose_standing", "name": "standing"},
        {"id": "gesture_peace", "name": "peace sign", "category": "gesture", "uses_hands": true}
    ],
    "index_by_category": {
        "gesture": ["gesture_peace"]
    }
}"#;

pub(crate) const VIEW_ANGLES_JSON: &str = r#"{
    "items": [
        {"id": "va_side", "name": "from side"}
    ]
}"#;

pub(crate) const BACKGROUNDS_JSON: &str = r#"{
    "items": [
        {"id": "bg_bedroom", "name": "bedroom"}
    ]
}"#;

pub(crate) const COLORS_JSON: &str = r#"{
    "palettes": [
        {"id": "pastel", "name": "Pastel", "colors": ["pink", "white"]}
    ],
    "individual_colors": ["red", "blue", "pink", "white"],
    "individual_colors_i18n": {
        "red": {"en": "red", "zh": "红色"},
        "blue": {"en": "blue", "zh": "蓝色"}
    }
}"#;

/// A small but complete store exercising every slot kind the tests touch.
/// The expressions catalog is intentionally absent so tests can observe a
/// degraded category.
pub(crate) fn fixture_store() -> CatalogStore {
    CatalogStore::from_bundled(&[
        ("hair", HAIR_JSON),
        ("eyes", EYES_JSON),
        ("clothing", CLOTHING_JSON),
        ("poses", POSES_JSON),
        ("view_angles", VIEW_ANGLES_JSON),
        ("backgrounds", BACKGROUNDS_JSON),
        ("colors", COLORS_JSON),
    ])
    .expect("fixture store must load")
}
