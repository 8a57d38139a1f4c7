//! Transports exposing the two query operations.
//!
//! - [`http`]: axum listener, one route per operation
//! - [`stdio`]: JSON-RPC tool server for assistant integrations
//!
//! Both delegate straight to [`crate::digest::NewsService`]; neither adds
//! behavior of its own beyond argument defaults.

pub mod http;
pub mod stdio;
