use std::collections::{btree_map, BTreeMap};

use crate::{
    errors::InstantiateErrorKind,
    invokable::Invokable,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
    value::{Instance, Value},
};

/// A configured argument before resolution.
///
/// - [`RawArgument::Literal`] is passed as is.
/// - [`RawArgument::Invokable`] is called without arguments and its result is passed,
///   unless the parameter itself is declared callable.
/// - [`RawArgument::String`] names a class (`Name` or `Name#tag`) when the parameter is
///   class- or interface-typed, and is a plain string otherwise.
#[derive(Clone, Debug)]
pub enum RawArgument {
    Literal(Value),
    Invokable(Invokable),
    String(String),
}

impl From<Value> for RawArgument {
    #[inline]
    fn from(val: Value) -> Self {
        Self::Literal(val)
    }
}

impl From<Invokable> for RawArgument {
    #[inline]
    fn from(val: Invokable) -> Self {
        Self::Invokable(val)
    }
}

impl From<&str> for RawArgument {
    #[inline]
    fn from(val: &str) -> Self {
        Self::String(val.to_owned())
    }
}

impl From<String> for RawArgument {
    #[inline]
    fn from(val: String) -> Self {
        Self::String(val)
    }
}

impl From<Instance> for RawArgument {
    #[inline]
    fn from(val: Instance) -> Self {
        Self::Literal(Value::Object(val))
    }
}

macro_rules! impl_literal_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawArgument {
                #[inline]
                fn from(val: $ty) -> Self {
                    Self::Literal(val.into())
                }
            }
        )*
    };
}

impl_literal_from!((), bool, i32, i64, u32, f64, Vec<Value>);

/// Named raw arguments. A repeated name overwrites the previous value.
#[derive(Clone, Debug, Default)]
pub struct ArgumentSet {
    entries: BTreeMap<String, RawArgument>,
}

impl ArgumentSet {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawArgument>) -> Self {
        self.insert(name, value);
        self
    }

    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawArgument>) -> Option<RawArgument> {
        self.entries.insert(name.into(), value.into())
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawArgument> {
        self.entries.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, String, RawArgument> {
        self.entries.iter()
    }
}

impl<K, V> Extend<(K, V)> for ArgumentSet
where
    K: Into<String>,
    V: Into<RawArgument>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ArgumentSet
where
    K: Into<String>,
    V: Into<RawArgument>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Resolved arguments in declaration order, handed to user code.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    entries: Vec<(String, Value)>,
}

impl Arguments {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    #[inline]
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// # Errors
    /// Returns [`InstantiateErrorKind::MissingArgument`] if no argument has this name
    pub fn value(&self, name: &str) -> Result<&Value, InstantiateErrorKind> {
        self.get(name)
            .ok_or_else(|| InstantiateErrorKind::MissingArgument { name: name.to_owned() })
    }

    /// # Errors
    /// Returns [`InstantiateErrorKind::IncorrectArgumentType`] if the argument isn't an object of type `T`
    pub fn instance<T: SendSafety + SyncSafety + 'static>(&self, name: &str) -> Result<RcThreadSafety<T>, InstantiateErrorKind> {
        self.value(name)?
            .downcast()
            .ok_or_else(|| incorrect_type(name, std::any::type_name::<T>()))
    }

    /// Like [`Self::instance`], but `null` is accepted and mapped to `None`.
    ///
    /// # Errors
    /// Returns [`InstantiateErrorKind::IncorrectArgumentType`] if the argument is neither `null` nor an object of type `T`
    pub fn optional_instance<T: SendSafety + SyncSafety + 'static>(
        &self,
        name: &str,
    ) -> Result<Option<RcThreadSafety<T>>, InstantiateErrorKind> {
        match self.value(name)? {
            Value::Null => Ok(None),
            value => value
                .downcast()
                .map(Some)
                .ok_or_else(|| incorrect_type(name, std::any::type_name::<T>())),
        }
    }

    /// # Errors
    /// Returns an error if the argument is missing or isn't a string
    pub fn string(&self, name: &str) -> Result<&str, InstantiateErrorKind> {
        self.value(name)?.as_str().ok_or_else(|| incorrect_type(name, "string"))
    }

    /// # Errors
    /// Returns an error if the argument is missing or isn't an integer
    pub fn int(&self, name: &str) -> Result<i64, InstantiateErrorKind> {
        self.value(name)?.as_int().ok_or_else(|| incorrect_type(name, "int"))
    }

    /// # Errors
    /// Returns an error if the argument is missing or isn't a bool
    pub fn bool(&self, name: &str) -> Result<bool, InstantiateErrorKind> {
        self.value(name)?.as_bool().ok_or_else(|| incorrect_type(name, "bool"))
    }

    /// # Errors
    /// Returns an error if the argument is missing or isn't a callable
    pub fn callable(&self, name: &str) -> Result<&Invokable, InstantiateErrorKind> {
        self.value(name)?.as_callable().ok_or_else(|| incorrect_type(name, "callable"))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arguments = Self::new();
        for (name, value) in iter {
            arguments.push(name, value);
        }
        arguments
    }
}

fn incorrect_type(name: &str, expected: &'static str) -> InstantiateErrorKind {
    InstantiateErrorKind::IncorrectArgumentType {
        name: name.to_owned(),
        expected,
    }
}

/// Builds an [`ArgumentSet`] from `name => value` pairs.
///
/// # Examples
/// ```rust
/// use autowire::{arguments, RawArgument};
///
/// let set = arguments! {
///     "host" => "localhost",
///     "port" => 5432,
/// };
/// assert!(matches!(set.get("port"), Some(RawArgument::Literal(_))));
/// ```
#[macro_export]
macro_rules! arguments {
    () => {
        $crate::ArgumentSet::new()
    };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {{
        let mut set = $crate::ArgumentSet::new();
        $(
            set.insert($name, $value);
        )+
        set
    }};
}
