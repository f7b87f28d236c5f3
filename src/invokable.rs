use std::{
    fmt::{self, Debug, Formatter},
    iter,
};

use crate::{
    argument::Arguments,
    errors::InstantiateErrorKind,
    identifier::ClassIdentifier,
    parameter::Parameter,
    service::{service_fn, BoxCloneService, Service as _},
    utils::thread_safety::RcThreadSafety,
    value::Value,
};

pub(crate) type BoxedCloneInvokable = BoxCloneService<Arguments, Value, InstantiateErrorKind>;

/// A callable with its own parameter list.
///
/// The container resolves the parameters the same way it resolves constructor parameters,
/// so invokables are used as factories, as lazily computed argument values and as targets
/// of [`crate::Container::invoke`].
#[derive(Clone)]
pub struct Invokable {
    parameters: RcThreadSafety<[Parameter]>,
    service: BoxedCloneInvokable,
}

impl Invokable {
    /// Creates an invokable without parameters
    #[inline]
    #[must_use]
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn() -> Result<R, InstantiateErrorKind> + Clone + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::with_parameters(iter::empty(), move |_| f())
    }

    #[must_use]
    pub fn with_parameters<P, F, R>(parameters: P, f: F) -> Self
    where
        P: IntoIterator<Item = Parameter>,
        F: Fn(Arguments) -> Result<R, InstantiateErrorKind> + Clone + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            parameters: parameters.into_iter().collect::<Vec<_>>().into(),
            service: BoxCloneService(Box::new(service_fn(
                move |arguments: Arguments| -> Result<Value, InstantiateErrorKind> { f(arguments).map(Into::into) },
            ))),
        }
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// # Errors
    /// Returns the error of the underlying callable
    #[inline]
    pub fn call(&self, arguments: Arguments) -> Result<Value, InstantiateErrorKind> {
        self.service.clone().call(arguments)
    }
}

impl Debug for Invokable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invokable").field("parameters", &self.parameters).finish_non_exhaustive()
    }
}

/// Target of [`crate::Container::invoke`]
#[derive(Clone, Debug)]
pub enum CallableRef {
    Function(Invokable),
    /// Method of the object that `make(identifier)` returns
    Method { identifier: ClassIdentifier, method: String },
}

impl CallableRef {
    #[inline]
    #[must_use]
    pub fn method(identifier: impl Into<ClassIdentifier>, method: impl Into<String>) -> Self {
        Self::Method {
            identifier: identifier.into(),
            method: method.into(),
        }
    }
}

impl From<Invokable> for CallableRef {
    #[inline]
    fn from(val: Invokable) -> Self {
        Self::Function(val)
    }
}
