//! Routing module
//!
//! Owns the fixed route table and path matching with `:param` segments.
//! The table is built once at startup and never mutated afterwards.

mod matcher;

pub use matcher::{Endpoint, RouteMatch, Router};
