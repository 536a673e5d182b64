//! Configuration-Driven SSH Command Gateway Library

pub mod config;
pub mod exec;
pub mod http;
pub mod observability;
pub mod routing;
pub mod security;
pub mod store;

pub use config::GatewayConfig;
pub use http::HttpServer;
