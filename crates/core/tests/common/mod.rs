//! Shared helpers for the integration tests.
//!
//! - Fixtures: task managers and temporary projects
//! - Instrumented sinks recording status output alongside step calls

pub mod fixtures;
pub mod sinks;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use sinks::*;
