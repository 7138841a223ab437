// ABOUTME: Action module - schemas, discovery, invocation, and the registry.
// ABOUTME: Core contract shared by model-facing and operator-facing actions.

mod descriptor;
mod invoker;
mod registry;
mod result;
mod schema;
mod traits;

pub use descriptor::*;
pub use invoker::*;
pub use registry::*;
pub use result::*;
pub use schema::*;
pub use traits::*;

#[cfg(test)]
mod result_test;
