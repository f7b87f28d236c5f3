use std::collections::BTreeMap;

use crate::{
    argument::{ArgumentSet, RawArgument},
    config::Config,
    identifier::ClassIdentifier,
    value::Value,
    Container,
};

#[derive(Clone, Debug)]
pub(crate) struct ScheduledCall {
    pub(crate) method: String,
    pub(crate) overrides: ArgumentSet,
}

/// Construction recipe of one class identifier
#[derive(Clone, Debug, Default)]
pub(crate) struct Blueprint {
    pub(crate) constructor_args: ArgumentSet,
    pub(crate) method_args: BTreeMap<String, ArgumentSet>,
    pub(crate) scheduled_calls: Vec<ScheduledCall>,
    pub(crate) config: Config,
    pub(crate) shared_instance: Option<Value>,
}

/// Handle onto the constructor arguments of a blueprint, see [`Container::constructor`]
pub struct ConstructorHandle<'a> {
    pub(crate) container: &'a Container,
    pub(crate) identifier: ClassIdentifier,
}

impl ConstructorHandle<'_> {
    #[inline]
    #[must_use]
    pub const fn identifier(&self) -> &ClassIdentifier {
        &self.identifier
    }

    pub fn set_argument(self, name: impl Into<String>, value: impl Into<RawArgument>) -> Self {
        self.container
            .inner
            .registry
            .lock()
            .blueprint_mut(&self.identifier)
            .constructor_args
            .insert(name, value);
        self
    }

    pub fn add_arguments<I, K, V>(self, arguments: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawArgument>,
    {
        let arguments = collect_arguments(arguments);
        self.container
            .inner
            .registry
            .lock()
            .blueprint_mut(&self.identifier)
            .constructor_args
            .extend(arguments);
        self
    }
}

/// Handle onto the arguments and calls of one method of a blueprint, see [`Container::method`]
pub struct MethodHandle<'a> {
    pub(crate) container: &'a Container,
    pub(crate) identifier: ClassIdentifier,
    pub(crate) method: String,
}

impl MethodHandle<'_> {
    #[inline]
    #[must_use]
    pub const fn identifier(&self) -> &ClassIdentifier {
        &self.identifier
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.method
    }

    pub fn set_argument(self, name: impl Into<String>, value: impl Into<RawArgument>) -> Self {
        self.container
            .inner
            .registry
            .lock()
            .blueprint_mut(&self.identifier)
            .method_args
            .entry(self.method.clone())
            .or_default()
            .insert(name, value);
        self
    }

    pub fn add_arguments<I, K, V>(self, arguments: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawArgument>,
    {
        let arguments = collect_arguments(arguments);
        self.container
            .inner
            .registry
            .lock()
            .blueprint_mut(&self.identifier)
            .method_args
            .entry(self.method.clone())
            .or_default()
            .extend(arguments);
        self
    }

    /// Schedules a call of the method right after construction.
    /// Calls run in the order they were added.
    #[inline]
    pub fn add_call(self) -> Self {
        self.add_call_with(ArgumentSet::new())
    }

    /// Like [`Self::add_call`], but `overrides` take precedence over the method arguments for this call only.
    pub fn add_call_with(self, overrides: ArgumentSet) -> Self {
        self.container
            .inner
            .registry
            .lock()
            .blueprint_mut(&self.identifier)
            .scheduled_calls
            .push(ScheduledCall {
                method: self.method.clone(),
                overrides,
            });
        self
    }
}

/// Drains user iterators before the registry is locked
fn collect_arguments<I, K, V>(arguments: I) -> Vec<(String, RawArgument)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RawArgument>,
{
    arguments.into_iter().map(|(name, value)| (name.into(), value.into())).collect()
}
