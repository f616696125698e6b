// src/services/search_service/mod.rs

pub mod decode;
pub mod search;

pub use decode::{decode_index_definition, decode_index_list, display_value};
pub use search::{get_index_definition, list_indexes};
