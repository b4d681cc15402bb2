// src/generic/resolve.rs
//
// Recursive type-expression substitution and concreteness classification.

use smallvec::SmallVec;

use crate::errors::SpecializeError;
use crate::generic::Registry;
use crate::types::{Placeholder, TypeExpr};

/// Ordered, key-unique substitution from placeholders to type expressions
/// for one specialization. Its size always equals the template's parameter
/// count; arity is checked before construction.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: SmallVec<[(Placeholder, TypeExpr); 4]>,
}

impl Bindings {
    /// Zip a template's declared parameters with supplied arguments
    /// positionally. Both sides must already be length-checked.
    pub fn zip(parameters: &[Placeholder], args: &[TypeExpr]) -> Self {
        debug_assert_eq!(parameters.len(), args.len());
        Self {
            entries: parameters
                .iter()
                .cloned()
                .zip(args.iter().cloned())
                .collect(),
        }
    }

    pub fn get(&self, placeholder: &Placeholder) -> Option<&TypeExpr> {
        self.entries
            .iter()
            .find(|(p, _)| p == placeholder)
            .map(|(_, expr)| expr)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every placeholder maps to itself: specializing a template
    /// with its own parameters is a no-op.
    pub fn is_identity(&self) -> bool {
        self.entries
            .iter()
            .all(|(p, expr)| matches!(expr, TypeExpr::Placeholder(q) if q == p))
    }
}

/// Substitute bound parameters into a type expression.
///
/// Containers are rebuilt with the same kind applied to the resolved
/// arguments. Template applications re-enter [`Registry::specialize`], so
/// nested templates resolve through the same cache; a bare template
/// reference stands for its own parameter list. Bound placeholders are
/// replaced; everything else, including plain-model field types, passes
/// through unchanged.
///
/// There is no cycle guard: a template whose field types reach the template
/// itself through an unresolved placeholder chain recurses without bound.
pub fn resolve(
    expr: &TypeExpr,
    bindings: &Bindings,
    registry: &Registry,
) -> Result<TypeExpr, SpecializeError> {
    match expr {
        TypeExpr::Container(kind, args) => {
            let resolved = args
                .iter()
                .map(|arg| resolve(arg, bindings, registry))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeExpr::Container(*kind, resolved))
        }
        TypeExpr::Model(class, args) if class.is_template() => {
            let inner: Vec<TypeExpr> = if args.is_empty() {
                class
                    .parameters()
                    .unwrap_or_default()
                    .iter()
                    .cloned()
                    .map(TypeExpr::Placeholder)
                    .collect()
            } else {
                args.clone()
            };
            let resolved = inner
                .iter()
                .map(|arg| resolve(arg, bindings, registry))
                .collect::<Result<Vec<_>, _>>()?;
            let specialized = registry.specialize(class, resolved)?;
            Ok(TypeExpr::Model(specialized, Vec::new()))
        }
        TypeExpr::Placeholder(p) => Ok(bindings.get(p).cloned().unwrap_or_else(|| expr.clone())),
        _ => Ok(expr.clone()),
    }
}

/// True when the expression still contains an unbound placeholder: a raw
/// placeholder, an unapplied template, or a container whose arguments
/// recursively do. Plain models and concrete instantiations are bound.
pub fn has_unbound(expr: &TypeExpr) -> bool {
    match expr {
        TypeExpr::Placeholder(_) => true,
        TypeExpr::Leaf(_) => false,
        TypeExpr::Container(_, args) => args.iter().any(has_unbound),
        TypeExpr::Model(class, _) => class.is_template(),
    }
}

/// Collect the unique placeholders still present in `expr`, in first
/// appearance order with duplicates collapsed. Placeholders remaining
/// inside a non-concrete inner model count through that model's own
/// parameter list.
pub fn collect_placeholders(expr: &TypeExpr, out: &mut Vec<Placeholder>) {
    match expr {
        TypeExpr::Placeholder(p) => {
            if !out.contains(p) {
                out.push(p.clone());
            }
        }
        TypeExpr::Leaf(_) => {}
        TypeExpr::Container(_, args) => {
            for arg in args {
                collect_placeholders(arg, out);
            }
        }
        TypeExpr::Model(class, args) => {
            for arg in args {
                collect_placeholders(arg, out);
            }
            if class.is_template() {
                for p in class.parameters().unwrap_or_default() {
                    if !out.contains(p) {
                        out.push(p.clone());
                    }
                }
            }
        }
    }
}
