use std::fmt::{self, Display, Formatter};

pub const DEFAULT_TAG: &str = "default";
pub(crate) const TAG_SEPARATOR: char = '#';

/// Key of a blueprint, a cached instance and a resolution stack entry.
///
/// `Foo`, `Foo#default` and `Foo#remote` name the same type, but only the first two
/// name the same blueprint. The tag never changes which class gets instantiated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassIdentifier {
    pub name: String,
    pub tag: String,
}

impl ClassIdentifier {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Parses `Name` or `Name#tag`. A missing or empty tag is [`DEFAULT_TAG`].
    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        match identifier.split_once(TAG_SEPARATOR) {
            Some((name, tag)) if !tag.is_empty() => Self::new(name, tag),
            Some((name, _)) => Self::new(name, DEFAULT_TAG),
            None => Self::new(identifier, DEFAULT_TAG),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.tag == DEFAULT_TAG
    }
}

impl From<&str> for ClassIdentifier {
    #[inline]
    fn from(identifier: &str) -> Self {
        Self::parse(identifier)
    }
}

impl From<&String> for ClassIdentifier {
    #[inline]
    fn from(identifier: &String) -> Self {
        Self::parse(identifier)
    }
}

impl From<String> for ClassIdentifier {
    #[inline]
    fn from(identifier: String) -> Self {
        Self::parse(&identifier)
    }
}

impl Display for ClassIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{TAG_SEPARATOR}{}", self.name, self.tag)
    }
}
