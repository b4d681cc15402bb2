// src/generic/specialize.rs
//
// The specialization operation: Template[args] -> model class.

use std::sync::Arc;

use crate::errors::SpecializeError;
use crate::generic::cache::{Registry, SpecializationKey, TypeArgs};
use crate::generic::resolve::{collect_placeholders, has_unbound, resolve, Bindings};
use crate::schema::{gather_all_validators, ClassSpec, FieldDecl, ModelClass};
use crate::types::TypeExpr;

/// Argument-count validation against the declared parameter list. Pure.
pub fn check_argument_count(
    template: &ModelClass,
    args: &[TypeExpr],
) -> Result<(), SpecializeError> {
    let expected = template.parameters().unwrap_or_default().len();
    let actual = args.len();
    if actual != expected {
        return Err(SpecializeError::Arity {
            name: template.name().to_string(),
            actual,
            expected,
        });
    }
    Ok(())
}

/// Display name for a specialized class: the template's naming hook if it
/// declares one, else `Template[arg1, arg2]` rendered from each argument's
/// display form.
pub fn concrete_name(template: &ModelClass, args: &[TypeExpr]) -> String {
    if let Some(hook) = template.naming() {
        return hook(template, args);
    }
    let joined = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}[{}]", template.name(), joined)
}

impl Registry {
    /// Specialize `template` with `args`, returning the resulting class.
    ///
    /// Repeated specialization with the same arguments returns the
    /// identical class object, and a single argument is interchangeable
    /// with its one-tuple spelling. Specializing a template with its own
    /// parameter list returns the template itself. All validation happens
    /// before any mutation, so a failed call leaves the cache and the
    /// schema untouched.
    pub fn specialize(
        &self,
        template: &Arc<ModelClass>,
        args: impl Into<TypeArgs>,
    ) -> Result<Arc<ModelClass>, SpecializeError> {
        let supplied = args.into();
        let key = SpecializationKey::new(template, &supplied);
        if let Some(hit) = self.lookup(&key) {
            tracing::trace!(template = template.name(), "parameterization cache hit");
            return Ok(hit);
        }

        if template.is_concrete() {
            return Err(SpecializeError::AlreadyConcrete {
                name: template.name().to_string(),
            });
        }
        let args = supplied.into_vec();
        if template.is_root() {
            if let Some(p) = args.iter().find_map(TypeExpr::as_placeholder) {
                return Err(SpecializeError::PlaceholderMisuse {
                    placeholder: p.name().to_string(),
                });
            }
        }
        let Some(parameters) = template.parameters() else {
            return Err(SpecializeError::MissingParameters {
                name: template.name().to_string(),
            });
        };
        check_argument_count(template, &args)?;

        let bindings = Bindings::zip(parameters, &args);
        if !bindings.is_empty() && bindings.is_identity() {
            return Ok(template.clone());
        }

        let mut fields = Vec::with_capacity(template.fields().len());
        for field in template.fields() {
            let ty = resolve(&field.ty, &bindings, self)?;
            fields.push(FieldDecl {
                name: field.name.clone(),
                ty,
                info: field.info.clone(),
            });
        }

        let validators = gather_all_validators(template);
        let name = concrete_name(template, &args);
        let concrete = !fields.iter().any(|field| has_unbound(&field.ty));
        let parameters = if concrete {
            None
        } else {
            let mut remaining = Vec::new();
            for field in &fields {
                collect_placeholders(&field.ty, &mut remaining);
            }
            Some(remaining)
        };

        tracing::debug!(
            template = template.name(),
            class = %name,
            concrete,
            "specialized model class"
        );

        let class = ModelClass::create(ClassSpec {
            name,
            base: template.clone(),
            fields,
            validators,
            config: template.config().clone(),
            naming: template.naming(),
            concrete,
            parameters,
        });
        Ok(self.insert_if_absent(template, args, class))
    }
}
