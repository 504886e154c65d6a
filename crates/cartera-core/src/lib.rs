//! Shared service plumbing for Cartera services.
//!
//! Keep this crate free of business logic — it holds the cross-cutting
//! pieces every service mounts: health endpoints, tracing init, request-id
//! middleware, and the gateway identity extractor.

pub mod health;
pub mod identity;
pub mod middleware;
pub mod tracing;
