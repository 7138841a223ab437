// ABOUTME: Root module for hello-phoenix - self-describing actions, a greeting
// ABOUTME: agent, and a Phoenix trace store client. Re-exports the public types.

pub mod action;
pub mod actions;
pub mod agent;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod prelude;
pub mod store;
pub mod telemetry;
pub mod testing;

pub use error::PhoenixError;
