//! Slot randomization and prompt assembly.
//!
//! - [`config`]: per-slot state and the serializable generator configuration
//! - [`engine`]: seeded sampling and cross-slot constraint resolution
//! - [`prompt`]: assembly of the final prompt string
//! - [`request`]: host-facing generation request orchestration

pub mod config;
pub mod engine;
pub mod prompt;
pub mod request;

pub use config::{ColorMode, GeneratorConfig, SlotState};
pub use engine::Randomizer;
pub use prompt::{assemble_prompt, assemble_segments, SUBJECT_MARKER};
pub use request::{generate, prepare_config, GenerationRequest};
