//! HTTP API
//!
//! JSON endpoints under `/api` for guided diagnosis, recommendation
//! lookups and document analysis.

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, router, serve};
