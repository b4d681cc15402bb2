// src/types/mod.rs
//
// Explicit type-expression tree for model field declarations.
//
// Field types are built at declaration time as a tagged tree (placeholder /
// leaf / container application / template application) so substitution
// operates over explicit data instead of introspecting live types. Every
// variant carries its own display name.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

use crate::schema::ModelClass;

/// An abstract type parameter used inside a template's field declarations.
///
/// Placeholders are identified by name; a template's declared parameters are
/// distinct within that template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    name: Arc<str>,
}

impl Placeholder {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A concrete non-parameterized type, identified by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeafType {
    name: Arc<str>,
}

impl LeafType {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Container kinds a field type can apply to arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Ordered sequence of one element type.
    Sequence,
    /// Key/value mapping of two element types.
    Mapping,
    /// Fixed heterogeneous tuple.
    Tuple,
    /// Optional wrapper around one element type.
    Optional,
}

impl ContainerKind {
    /// Display name used when rendering the container.
    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Sequence => "list",
            ContainerKind::Mapping => "map",
            ContainerKind::Tuple => "tuple",
            ContainerKind::Optional => "optional",
        }
    }
}

/// A type expression in a field declaration.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    /// An unbound type parameter.
    Placeholder(Placeholder),
    /// A concrete leaf type.
    Leaf(LeafType),
    /// A container kind applied to argument expressions.
    Container(ContainerKind, Vec<TypeExpr>),
    /// A model class applied to argument expressions. A specialized class
    /// carries no arguments (they are baked into the class); a bare
    /// template reference may also carry none, in which case it stands for
    /// its own parameter list.
    Model(Arc<ModelClass>, Vec<TypeExpr>),
}

impl TypeExpr {
    pub fn placeholder(name: &str) -> Self {
        TypeExpr::Placeholder(Placeholder::new(name))
    }

    pub fn leaf(name: &str) -> Self {
        TypeExpr::Leaf(LeafType::new(name))
    }

    pub fn sequence(elem: TypeExpr) -> Self {
        TypeExpr::Container(ContainerKind::Sequence, vec![elem])
    }

    pub fn mapping(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Container(ContainerKind::Mapping, vec![key, value])
    }

    pub fn tuple(items: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Container(ContainerKind::Tuple, items.into_iter().collect())
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Container(ContainerKind::Optional, vec![inner])
    }

    /// A bare reference to a model class.
    pub fn model(class: &Arc<ModelClass>) -> Self {
        TypeExpr::Model(class.clone(), Vec::new())
    }

    /// A template applied to explicit argument expressions.
    pub fn model_with(class: &Arc<ModelClass>, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Model(class.clone(), args.into_iter().collect())
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            TypeExpr::Placeholder(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Arc<ModelClass>> {
        match self {
            TypeExpr::Model(class, _) => Some(class),
            _ => None,
        }
    }
}

// Model applications compare by template identity, not structure: the cache
// relies on one template producing one class per argument list, so two
// distinct templates are never interchangeable even with equal shapes.
impl PartialEq for TypeExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeExpr::Placeholder(a), TypeExpr::Placeholder(b)) => a == b,
            (TypeExpr::Leaf(a), TypeExpr::Leaf(b)) => a == b,
            (TypeExpr::Container(k, a), TypeExpr::Container(j, b)) => k == j && a == b,
            (TypeExpr::Model(m, a), TypeExpr::Model(n, b)) => Arc::ptr_eq(m, n) && a == b,
            _ => false,
        }
    }
}

impl Eq for TypeExpr {}

impl Hash for TypeExpr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            TypeExpr::Placeholder(p) => p.hash(state),
            TypeExpr::Leaf(l) => l.hash(state),
            TypeExpr::Container(kind, args) => {
                kind.hash(state);
                args.hash(state);
            }
            TypeExpr::Model(class, args) => {
                (Arc::as_ptr(class) as usize).hash(state);
                args.hash(state);
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Placeholder(p) => fmt::Display::fmt(p, f),
            TypeExpr::Leaf(l) => f.write_str(l.name()),
            TypeExpr::Container(kind, args) => {
                write!(f, "{}[{}]", kind.name(), join_args(args))
            }
            TypeExpr::Model(class, args) if args.is_empty() => f.write_str(class.name()),
            TypeExpr::Model(class, args) => {
                write!(f, "{}[{}]", class.name(), join_args(args))
            }
        }
    }
}

fn join_args(args: &[TypeExpr]) -> String {
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested_containers() {
        let expr = TypeExpr::mapping(
            TypeExpr::leaf("str"),
            TypeExpr::sequence(TypeExpr::placeholder("T")),
        );
        assert_eq!(expr.to_string(), "map[str, list[T]]");
    }

    #[test]
    fn display_optional_and_tuple() {
        let expr = TypeExpr::optional(TypeExpr::tuple([
            TypeExpr::leaf("int"),
            TypeExpr::leaf("bool"),
        ]));
        assert_eq!(expr.to_string(), "optional[tuple[int, bool]]");
    }

    #[test]
    fn structural_equality_ignores_allocation() {
        let a = TypeExpr::sequence(TypeExpr::leaf("int"));
        let b = TypeExpr::sequence(TypeExpr::leaf("int"));
        assert_eq!(a, b);
        assert_ne!(a, TypeExpr::sequence(TypeExpr::leaf("str")));
    }

    #[test]
    fn model_equality_is_by_identity() {
        let m = ModelClass::builder("Box")
            .parameters(["T"])
            .field("value", TypeExpr::placeholder("T"))
            .build();
        let n = ModelClass::builder("Box")
            .parameters(["T"])
            .field("value", TypeExpr::placeholder("T"))
            .build();
        assert_eq!(TypeExpr::model(&m), TypeExpr::model(&m.clone()));
        assert_ne!(TypeExpr::model(&m), TypeExpr::model(&n));
    }

    #[test]
    fn expressions_nest_arbitrarily_deep() {
        let mut expr = TypeExpr::placeholder("T");
        for _ in 0..64 {
            expr = TypeExpr::sequence(expr);
        }
        let rendered = expr.to_string();
        assert!(rendered.starts_with("list[list["));
        assert!(rendered.ends_with("T]]"));
    }

    #[test]
    fn placeholder_equality_is_by_name() {
        assert_eq!(Placeholder::new("T"), Placeholder::new("T"));
        assert_ne!(Placeholder::new("T"), Placeholder::new("U"));
    }
}
