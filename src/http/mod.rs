//! HTTP layer: `CmcHttp`, the reqwest-backed listings fetcher.

pub mod client;

pub use client::CmcHttp;
