//! Core engine: catalogs, slot schema, randomization, prompt assembly, and
//! reverse parsing.

pub mod catalog;
pub mod generator;
pub mod language;
pub mod parser;
pub mod slots;
