// src/generic/cache.rs
//
// The parameterization cache: (template, arguments) -> specialized class.

use std::sync::{Arc, Mutex, OnceLock};

use rustc_hash::FxHashMap;

use crate::schema::ModelClass;
use crate::types::TypeExpr;

/// Arguments to one specialization: a bare expression or an ordered tuple.
///
/// Both spellings of a single argument resolve to the identical class; the
/// cache keeps an entry under each key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArgs {
    One(TypeExpr),
    Many(Vec<TypeExpr>),
}

impl TypeArgs {
    /// Normalize into an ordered argument sequence.
    pub fn into_vec(self) -> Vec<TypeExpr> {
        match self {
            TypeArgs::One(expr) => vec![expr],
            TypeArgs::Many(exprs) => exprs,
        }
    }
}

impl From<TypeExpr> for TypeArgs {
    fn from(expr: TypeExpr) -> Self {
        TypeArgs::One(expr)
    }
}

impl From<Vec<TypeExpr>> for TypeArgs {
    fn from(exprs: Vec<TypeExpr>) -> Self {
        TypeArgs::Many(exprs)
    }
}

impl<const N: usize> From<[TypeExpr; N]> for TypeArgs {
    fn from(exprs: [TypeExpr; N]) -> Self {
        TypeArgs::Many(exprs.into())
    }
}

/// Cache key: template identity plus the argument expressions as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SpecializationKey {
    template: usize,
    args: TypeArgs,
}

impl SpecializationKey {
    pub(crate) fn new(template: &Arc<ModelClass>, args: &TypeArgs) -> Self {
        Self {
            template: Arc::as_ptr(template) as usize,
            args: args.clone(),
        }
    }
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Process-lifetime memoization of specialized classes.
///
/// An explicit value rather than hidden global state: callers choose its
/// lifetime, or use [`Registry::global`]. The table is mutex-guarded;
/// specialization computes outside the lock (resolution re-enters
/// `specialize` for nested templates) and then inserts if absent, so a
/// concurrent duplicate computation is discarded in favor of the class
/// already present. No eviction.
#[derive(Debug, Default)]
pub struct Registry {
    cache: Mutex<FxHashMap<SpecializationKey, Arc<ModelClass>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Registry::new)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn lookup(&self, key: &SpecializationKey) -> Option<Arc<ModelClass>> {
        self.cache.lock().unwrap().get(key).cloned()
    }

    /// Insert the freshly built class under the tuple key and, for a single
    /// argument, the scalar key as well. Returns the winning class: an
    /// entry already present takes precedence over `class`.
    pub(crate) fn insert_if_absent(
        &self,
        template: &Arc<ModelClass>,
        args: Vec<TypeExpr>,
        class: Arc<ModelClass>,
    ) -> Arc<ModelClass> {
        let mut cache = self.cache.lock().unwrap();
        let tuple_key = SpecializationKey::new(template, &TypeArgs::Many(args.clone()));
        let winner = cache.entry(tuple_key).or_insert_with(|| class).clone();
        if let [single] = args.as_slice() {
            let scalar_key = SpecializationKey::new(template, &TypeArgs::One(single.clone()));
            cache
                .entry(scalar_key)
                .or_insert_with(|| winner.clone());
        }
        winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Arc<ModelClass> {
        ModelClass::builder("Box")
            .parameters(["T"])
            .field("value", TypeExpr::placeholder("T"))
            .build()
    }

    fn dummy_class(name: &str) -> Arc<ModelClass> {
        ModelClass::builder(name)
            .field("value", TypeExpr::leaf("int"))
            .build()
    }

    #[test]
    fn first_insert_wins() {
        let registry = Registry::new();
        let tpl = template();
        let first = dummy_class("Box[int]");
        let second = dummy_class("Box[int]");

        let args = vec![TypeExpr::leaf("int")];
        let won = registry.insert_if_absent(&tpl, args.clone(), first.clone());
        assert!(Arc::ptr_eq(&won, &first));

        let won_again = registry.insert_if_absent(&tpl, args, second);
        assert!(Arc::ptr_eq(&won_again, &first));
    }

    #[test]
    fn single_argument_gets_scalar_and_tuple_keys() {
        let registry = Registry::new();
        let tpl = template();
        let class = dummy_class("Box[int]");
        registry.insert_if_absent(&tpl, vec![TypeExpr::leaf("int")], class.clone());

        let scalar = SpecializationKey::new(&tpl, &TypeArgs::One(TypeExpr::leaf("int")));
        let tuple = SpecializationKey::new(&tpl, &TypeArgs::Many(vec![TypeExpr::leaf("int")]));
        let via_scalar = registry.lookup(&scalar).unwrap();
        let via_tuple = registry.lookup(&tuple).unwrap();
        assert!(Arc::ptr_eq(&via_scalar, &class));
        assert!(Arc::ptr_eq(&via_tuple, &class));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn multi_argument_insert_has_one_key() {
        let registry = Registry::new();
        let tpl = ModelClass::builder("Pair")
            .parameters(["A", "B"])
            .field("first", TypeExpr::placeholder("A"))
            .field("second", TypeExpr::placeholder("B"))
            .build();
        let class = dummy_class("Pair[int, str]");
        registry.insert_if_absent(
            &tpl,
            vec![TypeExpr::leaf("int"), TypeExpr::leaf("str")],
            class,
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_templates_never_collide() {
        let registry = Registry::new();
        let a = template();
        let b = template();
        let class_a = dummy_class("BoxA[int]");
        let class_b = dummy_class("BoxB[int]");
        registry.insert_if_absent(&a, vec![TypeExpr::leaf("int")], class_a.clone());
        let won = registry.insert_if_absent(&b, vec![TypeExpr::leaf("int")], class_b.clone());
        assert!(Arc::ptr_eq(&won, &class_b));
        assert_eq!(registry.len(), 4);
    }
}
