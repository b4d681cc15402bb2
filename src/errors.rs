// src/errors.rs
//! Errors raised by template specialization (E05xx).
//!
//! Every variant is a synchronous, caller-facing programming error: raised
//! at the point of detection, never caught internally, and always before
//! any cache or schema mutation.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum SpecializeError {
    #[error("cannot parameterize a concrete instantiation of '{name}'")]
    #[diagnostic(code(E0501))]
    AlreadyConcrete { name: String },

    #[error("'{name}' must declare type parameters before being parameterized")]
    #[diagnostic(
        code(E0502),
        help("declare the template with a parameter list before specializing it")
    )]
    MissingParameters { name: String },

    #[error("type placeholder '{placeholder}' belongs on a template's parameter list, not on the root model")]
    #[diagnostic(
        code(E0503),
        help("declare a template that lists the placeholder as a parameter instead")
    )]
    PlaceholderMisuse { placeholder: String },

    #[error(
        "too {} type arguments for '{name}': actual {actual}, expected {expected}",
        direction(.actual, .expected)
    )]
    #[diagnostic(code(E0504))]
    Arity {
        name: String,
        actual: usize,
        expected: usize,
    },
}

fn direction(actual: &usize, expected: &usize) -> &'static str {
    if actual > expected {
        "many"
    } else {
        "few"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_states_direction_and_counts() {
        let too_few = SpecializeError::Arity {
            name: "Pair".to_string(),
            actual: 1,
            expected: 2,
        };
        assert_eq!(
            too_few.to_string(),
            "too few type arguments for 'Pair': actual 1, expected 2"
        );

        let too_many = SpecializeError::Arity {
            name: "Pair".to_string(),
            actual: 3,
            expected: 2,
        };
        assert_eq!(
            too_many.to_string(),
            "too many type arguments for 'Pair': actual 3, expected 2"
        );
    }

    #[test]
    fn already_concrete_names_the_class() {
        let err = SpecializeError::AlreadyConcrete {
            name: "Pair[int, str]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parameterize a concrete instantiation of 'Pair[int, str]'"
        );
    }
}
