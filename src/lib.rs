// src/lib.rs
pub mod errors;
pub mod generic;
pub mod schema;
pub mod types;
