//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assignment)
//!     → handler.rs (fetch config → authorize → execute)
//!     → response.rs (uniform JSON envelope, transport status 200)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::Envelope;
pub use server::{AppState, HttpServer};
