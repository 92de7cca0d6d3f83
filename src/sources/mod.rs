//! Parameter Sources Module
//!
//! Read-through caching in front of a slow key/value parameter store.

mod parameters;

pub use parameters::{InMemoryParameterStore, ParameterCache, ParameterStore};
