//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Bearer token extraction from `Authorization` headers
//! - Outbound HTTP client construction (timeouts, TLS)

pub mod bearer;
pub mod http;
