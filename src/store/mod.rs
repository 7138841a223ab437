// ABOUTME: Trace store module - client for the external trace collector's API.
// ABOUTME: Defines the store trait, GraphQL and in-memory implementations, and records.

mod client;
mod graphql;
mod memory;
mod types;

pub use client::*;
pub use graphql::{GraphQlConnector, GraphQlStore};
pub use memory::MemoryStore;
pub use types::*;
