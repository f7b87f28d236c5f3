use crate::value::Value;

/// Declared type of a parameter, as the class table describes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeclaredType {
    #[default]
    None,
    Class(String),
    Interface(String),
    Callable,
}

impl DeclaredType {
    /// Name of the class or interface the parameter is constrained to.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Class(name) | Self::Interface(name) => Some(name),
            Self::None | Self::Callable => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Callable)
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub declared_type: DeclaredType,
    pub default: Option<Value>,
}

impl Parameter {
    /// Untyped parameter
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: DeclaredType::None,
            default: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn class(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            declared_type: DeclaredType::Class(class.into()),
            ..Self::new(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn interface(name: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            declared_type: DeclaredType::Interface(interface.into()),
            ..Self::new(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn callable(name: impl Into<String>) -> Self {
        Self {
            declared_type: DeclaredType::Callable,
            ..Self::new(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[inline]
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeclaredType, Parameter};

    #[test]
    fn test_builders() {
        let param = Parameter::class("transport", "Transport").with_default(());
        assert_eq!(param.declared_type.type_name(), Some("Transport"));
        assert!(param.has_default());

        let param = Parameter::callable("on_send");
        assert!(param.declared_type.is_callable());
        assert_eq!(param.declared_type.type_name(), None);
        assert!(!param.has_default());

        assert_eq!(Parameter::new("from").declared_type, DeclaredType::None);
    }
}
