// src/schema/config.rs

/// Behavioural configuration attached to a model class.
///
/// A specialized class shares its template's configuration by reference;
/// the engine never copies or rewrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelConfig {
    /// Allow population of fields by alias as well as by name.
    pub populate_by_alias: bool,
    /// Reject unknown fields instead of ignoring them.
    pub strict: bool,
    /// Treat instances as immutable after construction.
    pub frozen: bool,
}
