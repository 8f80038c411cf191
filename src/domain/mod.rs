//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types
//! - `wire.rs`: Raw serde structs matching upstream responses
//! - `convert.rs`: Conversions from wire to domain types
//! - `client.rs`: Sub-client with fetch methods and caching

pub mod listing;
