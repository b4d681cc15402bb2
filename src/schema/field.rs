// src/schema/field.rs

use crate::types::TypeExpr;

/// Non-type field metadata, paired unchanged with the resolved type during
/// specialization. The engine carries metadata; it never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInfo {
    /// Alternate name accepted when populating the field.
    pub alias: Option<String>,
    /// Human-readable field documentation.
    pub description: Option<String>,
    /// Textual rendering of the default value, if any.
    pub default: Option<String>,
}

/// A declared field: a name, a type expression, and opaque metadata.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub info: FieldInfo,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            info: FieldInfo::default(),
        }
    }

    pub fn with_info(name: impl Into<String>, ty: TypeExpr, info: FieldInfo) -> Self {
        Self {
            name: name.into(),
            ty,
            info,
        }
    }
}
