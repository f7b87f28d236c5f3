use regex::Regex;

use crate::{errors::FactoryErrorKind, invokable::Invokable};

/// Name of the factory parameter that receives the matched class name
pub const FACTORY_CLASS_NAME_PARAMETER: &str = "class_name";

#[derive(Clone)]
pub(crate) struct Factory {
    pattern: Regex,
    pub(crate) invokable: Invokable,
}

impl Factory {
    /// Compiles the pattern after escaping namespace separators, so the pattern `App\Repo`
    /// matches the class name `App\Repo` literally.
    pub(crate) fn new(pattern: &str, invokable: Invokable) -> Result<Self, FactoryErrorKind> {
        Ok(Self {
            pattern: Regex::new(&escape_namespace_separators(pattern))?,
            invokable,
        })
    }

    #[inline]
    #[must_use]
    pub(crate) fn is_match(&self, class_name: &str) -> bool {
        self.pattern.is_match(class_name)
    }

    #[cfg(test)]
    #[inline]
    #[must_use]
    pub(crate) fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

#[inline]
#[must_use]
fn escape_namespace_separators(pattern: &str) -> String {
    pattern.replace('\\', r"\\")
}
