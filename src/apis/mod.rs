//! Outbound API clients and shared HTTP plumbing

pub mod client;
pub mod llm;
pub mod stats;
