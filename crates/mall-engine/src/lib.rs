//! Search engine transport for mall-search.
//!
//! This crate provides:
//! - `EngineClient` - HTTP client implementing `SearchTransport`
//! - `EngineConfig` - Endpoint, index and write behavior
//! - `TimeoutConfig` - Connect and total timeouts
//! - `RetryPolicy` - Retry strategies

mod client;
mod config;
mod retry;
mod timeout;

pub use client::*;
pub use config::*;
pub use retry::*;
pub use timeout::*;
