use super::instantiate::InstantiateErrorKind;
use crate::identifier::ClassIdentifier;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Argument `{parameter}` of {target} can't be resolved: no configured value, class type or default")]
    UnresolvableArgument { target: String, parameter: String },
    #[error("Abstract type {name} has no mapping to an instantiable class (effective type: {effective})")]
    UnmappedAbstractType { name: String, effective: String },
    #[error("Circular dependency detected: {}", format_cycle(.cycle))]
    CircularDependency { cycle: Vec<ClassIdentifier> },
    #[error("Unknown type {name}")]
    UnknownType { name: String },
    #[error("Class {name} has no constructor")]
    NoConstructor { name: String },
    #[error("Unknown method {class}::{method}")]
    UnknownMethod { class: String, method: String },
    #[error("Incorrect type of {identifier}. Actual: {actual}, expected: {expected}")]
    IncorrectType {
        identifier: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Failed to call {target}: {source}")]
    Instantiate {
        target: String,
        #[source]
        source: InstantiateErrorKind,
    },
}

impl ResolveErrorKind {
    /// Failures that allow an optional parameter to fall back to its default value.
    /// Cycles and errors raised by user code are never swallowed.
    #[inline]
    #[must_use]
    pub(crate) const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnresolvableArgument { .. }
                | Self::UnmappedAbstractType { .. }
                | Self::UnknownType { .. }
                | Self::NoConstructor { .. }
        )
    }
}

fn format_cycle(cycle: &[ClassIdentifier]) -> String {
    let mut out = String::new();
    for (index, identifier) in cycle.iter().enumerate() {
        if index > 0 {
            out.push_str(" -> ");
        }
        out.push_str(&identifier.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::ResolveErrorKind;
    use crate::identifier::ClassIdentifier;

    #[test]
    fn test_cycle_display() {
        let err = ResolveErrorKind::CircularDependency {
            cycle: vec![
                ClassIdentifier::parse("A"),
                ClassIdentifier::parse("B#remote"),
                ClassIdentifier::parse("A"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: A#default -> B#remote -> A#default"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(ResolveErrorKind::UnknownType { name: "A".to_owned() }.is_recoverable());
        assert!(!ResolveErrorKind::CircularDependency { cycle: vec![] }.is_recoverable());
    }
}
