// src/services/gateway_service/mod.rs

pub mod gateway;
pub mod http;

pub use gateway::BackendGateway;
pub use http::Reply;
