// src/schema/mod.rs
//
// The base-model framework surface the specialization engine consumes:
// field declarations, validator discovery, configuration, and class
// construction. No value validation or coercion happens here.

pub mod config;
pub mod field;
pub mod model;
pub mod validator;

pub use config::ModelConfig;
pub use field::{FieldDecl, FieldInfo};
pub use model::{ClassSpec, ModelBuilder, ModelClass, NamingHook};
pub use validator::{gather_all_validators, Validator};
