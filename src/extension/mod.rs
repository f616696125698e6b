// src/extension/mod.rs

pub mod extension_api;

pub use extension_api::ExtensionApi;
