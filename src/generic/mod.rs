// src/generic/mod.rs
//
// The specialization engine: recursive type substitution, concreteness
// classification, and memoized class creation.

pub mod cache;
pub mod resolve;
pub mod specialize;

pub use cache::{Registry, TypeArgs};
pub use resolve::{collect_placeholders, has_unbound, resolve, Bindings};
pub use specialize::{check_argument_count, concrete_name};
