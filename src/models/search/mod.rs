// src/models/search/mod.rs

pub mod index;

pub use index::IndexDefinition;
