// src/schema/validator.rs

use std::sync::Arc;

use crate::schema::ModelClass;

/// Validator metadata declared on a model class.
///
/// The engine gathers and carries validators across specialization; running
/// them against values is the base framework's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    name: Arc<str>,
}

impl Validator {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Gather the validators declared on `class` and its ancestors: ancestors
/// first, each class's validators in declaration order.
pub fn gather_all_validators(class: &Arc<ModelClass>) -> Vec<Validator> {
    let mut chain = Vec::new();
    let mut current = Some(class);
    while let Some(c) = current {
        chain.push(c);
        current = c.base();
    }
    let mut out = Vec::new();
    for class in chain.into_iter().rev() {
        out.extend(class.own_validators().iter().cloned());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeExpr;

    #[test]
    fn gathers_ancestors_first() {
        let base = ModelClass::builder("Base")
            .parameters(["T"])
            .field("value", TypeExpr::placeholder("T"))
            .validator("check_base")
            .build();
        let derived = ModelClass::builder("Derived")
            .base(base)
            .parameters(["T"])
            .field("extra", TypeExpr::leaf("int"))
            .validator("check_extra")
            .validator("check_more")
            .build();

        let names: Vec<String> = gather_all_validators(&derived)
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        assert_eq!(names, ["check_base", "check_extra", "check_more"]);
    }
}
