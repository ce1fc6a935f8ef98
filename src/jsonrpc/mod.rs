//! Minimal JSON-RPC 2.0 plumbing for the bundled HTTP connections.

pub mod client;
pub mod envelope;

pub use client::HttpClient;
