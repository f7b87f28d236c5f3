use parking_lot::Mutex;
use std::any::type_name;
use tracing::{debug, error, info_span, warn};

use crate::{
    argument::ArgumentSet,
    argument_resolver::resolve_arguments,
    blueprint::{Blueprint, ConstructorHandle, MethodHandle},
    cache::Cache,
    class::Classes,
    config::Config,
    errors::{FactoryErrorKind, ResolveErrorKind},
    factory::{Factory, FACTORY_CLASS_NAME_PARAMETER},
    identifier::ClassIdentifier,
    invokable::{CallableRef, Invokable},
    registry::Registry,
    service::Service as _,
    stack::ResolutionStack,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
    value::{Instance, Value},
};

/// Builds objects and everything they depend on from the class table and the configuration.
///
/// The container is cheap to clone, clones share the configuration and the cached instances.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: RcThreadSafety<ContainerInner>,
}

pub(crate) struct ContainerInner {
    pub(crate) classes: Classes,
    pub(crate) registry: Mutex<Registry>,
    pub(crate) cache: Mutex<Cache>,
}

/// What the registry says about one identifier, copied out so no lock is held while
/// user code or nested resolution runs.
struct Plan {
    effective: String,
    factory: Option<Invokable>,
    blueprint: Blueprint,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(classes: Classes) -> Self {
        Self {
            inner: RcThreadSafety::new(ContainerInner {
                classes,
                registry: Mutex::new(Registry::new()),
                cache: Mutex::new(Cache::new()),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn classes(&self) -> &Classes {
        &self.inner.classes
    }

    /// Builds the object for `Name` or `Name#tag`, see [`Self::make_with`].
    ///
    /// # Errors
    /// See [`Self::make_with`]
    #[inline]
    pub fn make(&self, identifier: impl Into<ClassIdentifier>) -> Result<Value, ResolveErrorKind> {
        self.make_with(identifier, ArgumentSet::new())
    }

    /// Builds the object for `Name` or `Name#tag` with per-call constructor arguments.
    ///
    /// # Notes
    /// - A shared instance is returned as is.
    /// - A cached singleton is returned as is, `overrides` aren't applied to it.
    /// - `overrides` take precedence over the configured constructor arguments and only apply to this
    ///   identifier, not to its dependencies.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::CircularDependency`] if the identifier is already being built in this call tree
    /// - Returns [`ResolveErrorKind::UnmappedAbstractType`] if the class is abstract and not mapped to a concrete one
    /// - Returns [`ResolveErrorKind::UnknownType`] if the class isn't registered and no factory matches it
    /// - Returns [`ResolveErrorKind::UnresolvableArgument`] if a parameter can't get a value
    /// - Returns [`ResolveErrorKind::Instantiate`] if a constructor, factory or scheduled method fails
    pub fn make_with(&self, identifier: impl Into<ClassIdentifier>, overrides: ArgumentSet) -> Result<Value, ResolveErrorKind> {
        let identifier = identifier.into();
        let mut stack = ResolutionStack::new();
        self.make_nested(&identifier, &overrides, &mut stack)
    }

    /// Builds the object and downcasts it to `T`.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the built value isn't an object of type `T`
    /// - See [`Self::make_with`] for the rest
    pub fn get<T: SendSafety + SyncSafety + 'static>(
        &self,
        identifier: impl Into<ClassIdentifier>,
    ) -> Result<RcThreadSafety<T>, ResolveErrorKind> {
        let identifier = identifier.into();
        let value = self.make(identifier.clone())?;

        if let Some(object) = value.downcast::<T>() {
            return Ok(object);
        }

        let err = ResolveErrorKind::IncorrectType {
            identifier: identifier.to_string(),
            expected: type_name::<T>(),
            actual: match &value {
                Value::Object(instance) => instance.type_info().name,
                value => value.kind(),
            },
        };
        error!("{}", err);
        Err(err)
    }

    /// Calls a function or a method, see [`Self::invoke_with`].
    ///
    /// # Errors
    /// See [`Self::invoke_with`]
    #[inline]
    pub fn invoke(&self, callable: impl Into<CallableRef>) -> Result<Value, ResolveErrorKind> {
        self.invoke_with(callable, ArgumentSet::new())
    }

    /// Calls a function or a method with its parameters resolved by the container.
    ///
    /// `overrides` take precedence, the rest of parameters are resolved from their declared type or default value.
    /// For [`CallableRef::Method`] the receiver is built by [`Self::make`] first.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::UnknownMethod`] if the class of the receiver has no such method
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the receiver isn't an object
    /// - Returns [`ResolveErrorKind::Instantiate`] if the call fails
    /// - See [`Self::make_with`] for the rest
    pub fn invoke_with(&self, callable: impl Into<CallableRef>, overrides: ArgumentSet) -> Result<Value, ResolveErrorKind> {
        match callable.into() {
            CallableRef::Function(invokable) => {
                let span = info_span!("invoke");
                let _guard = span.enter();

                let mut stack = ResolutionStack::new();
                let arguments = resolve_arguments(self, "invoked callable", invokable.parameters(), &[&overrides], &mut stack)?;
                invokable.call(arguments).map_err(|source| {
                    let err = ResolveErrorKind::Instantiate {
                        target: "invoked callable".to_owned(),
                        source,
                    };
                    error!("{}", err);
                    err
                })
            }
            CallableRef::Method { identifier, method } => {
                let span = info_span!("invoke", %identifier, %method);
                let _guard = span.enter();

                let receiver = match self.make(identifier.clone())? {
                    Value::Object(instance) => instance,
                    value => {
                        let err = ResolveErrorKind::IncorrectType {
                            identifier: identifier.to_string(),
                            expected: "object",
                            actual: value.kind(),
                        };
                        error!("{}", err);
                        return Err(err);
                    }
                };
                let effective = self.inner.registry.lock().mapped(&identifier.name).to_owned();

                let mut stack = ResolutionStack::new();
                self.call_method(&effective, receiver, &method, &[&overrides], &mut stack)
            }
        }
    }

    /// Returns `true` if a singleton instance is cached for the identifier
    #[must_use]
    pub fn is_cached(&self, identifier: impl Into<ClassIdentifier>) -> bool {
        self.inner.cache.lock().contains(&identifier.into())
    }
}

impl Container {
    /// Maps an abstract class or an interface to the concrete class built in its place.
    /// The mapping is applied once, a mapped name isn't mapped again.
    pub fn set_mapping(&self, abstract_name: impl Into<String>, concrete_name: impl Into<String>) -> &Self {
        self.inner.registry.lock().set_mapping(abstract_name.into(), concrete_name.into());
        self
    }

    pub fn add_mappings<I, A, C>(&self, mappings: I) -> &Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        let mappings: Vec<(String, String)> = mappings
            .into_iter()
            .map(|(abstract_name, concrete_name)| (abstract_name.into(), concrete_name.into()))
            .collect();

        let mut registry = self.inner.registry.lock();
        for (abstract_name, concrete_name) in mappings {
            registry.set_mapping(abstract_name, concrete_name);
        }
        drop(registry);
        self
    }

    /// Delegates construction of classes whose name matches `pattern` to `factory`.
    ///
    /// Factories are tried in registration order and the first match wins.
    /// The pattern is matched against the class name after mapping, never against the tag.
    /// Backslashes in the pattern are literal namespace separators.
    /// The factory parameter named [`FACTORY_CLASS_NAME_PARAMETER`] receives the matched class name.
    ///
    /// # Errors
    /// Returns [`FactoryErrorKind::InvalidPattern`] if the pattern isn't a valid regular expression
    pub fn set_factory(&self, pattern: &str, factory: Invokable) -> Result<&Self, FactoryErrorKind> {
        let factory = Factory::new(pattern, factory)?;
        self.inner.registry.lock().add_factory(factory);
        Ok(self)
    }

    #[inline]
    pub fn constructor(&self, identifier: impl Into<ClassIdentifier>) -> ConstructorHandle<'_> {
        ConstructorHandle {
            container: self,
            identifier: identifier.into(),
        }
    }

    #[inline]
    pub fn method(&self, identifier: impl Into<ClassIdentifier>, method: impl Into<String>) -> MethodHandle<'_> {
        MethodHandle {
            container: self,
            identifier: identifier.into(),
            method: method.into(),
        }
    }

    /// Sets whether the instance for the identifier is cached.
    /// Has no effect on an instance that's already cached.
    pub fn singleton(&self, identifier: impl Into<ClassIdentifier>, singleton: bool) -> &Self {
        self.configure(identifier, Config { singleton })
    }

    pub fn configure(&self, identifier: impl Into<ClassIdentifier>, config: Config) -> &Self {
        self.inner.registry.lock().blueprint_mut(&identifier.into()).config = config;
        self
    }

    /// Registers already built values, [`Self::make`] returns them without construction.
    /// The iterator is drained before the registry is locked, so it may call back into the container.
    pub fn share<I, K, V>(&self, objects: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ClassIdentifier>,
        V: Into<Value>,
    {
        let objects: Vec<(ClassIdentifier, Value)> = objects
            .into_iter()
            .map(|(identifier, value)| (identifier.into(), value.into()))
            .collect();

        let mut registry = self.inner.registry.lock();
        for (identifier, value) in objects {
            registry.blueprint_mut(&identifier).shared_instance = Some(value);
        }
        drop(registry);
        self
    }
}

impl Container {
    pub(crate) fn make_nested(
        &self,
        identifier: &ClassIdentifier,
        overrides: &ArgumentSet,
        stack: &mut ResolutionStack,
    ) -> Result<Value, ResolveErrorKind> {
        let span = info_span!("make", %identifier);
        let _guard = span.enter();

        let (shared_instance, config) = {
            let registry = self.inner.registry.lock();
            registry
                .blueprint(identifier)
                .map_or((None, Config::default()), |blueprint| (blueprint.shared_instance.clone(), blueprint.config))
        };

        if let Some(shared_instance) = shared_instance {
            debug!("Found shared instance");
            return Ok(shared_instance);
        }

        if config.singleton {
            let cached = self.inner.cache.lock().get(identifier);
            if let Some(cached) = cached {
                debug!("Found in cache");
                return Ok(cached);
            }
        }

        if stack.contains(identifier) {
            let err = ResolveErrorKind::CircularDependency {
                cycle: stack.cycle(identifier),
            };
            error!("{}", err);
            return Err(err);
        }

        stack.push(identifier.clone());
        let result = self.construct(identifier, overrides, stack);
        stack.pop();
        let value = result?;

        if config.singleton {
            let value = self.inner.cache.lock().insert_or_get(identifier.clone(), value);
            debug!("Cached");
            return Ok(value);
        }

        Ok(value)
    }

    fn plan(&self, identifier: &ClassIdentifier) -> Plan {
        let registry = self.inner.registry.lock();
        let effective = registry.mapped(&identifier.name).to_owned();
        let factory = registry.find_factory(&effective).map(|factory| factory.invokable.clone());
        let blueprint = registry.blueprint(identifier).cloned().unwrap_or_default();

        Plan {
            effective,
            factory,
            blueprint,
        }
    }

    fn construct(
        &self,
        identifier: &ClassIdentifier,
        overrides: &ArgumentSet,
        stack: &mut ResolutionStack,
    ) -> Result<Value, ResolveErrorKind> {
        let Plan {
            effective,
            factory,
            blueprint,
        } = self.plan(identifier);
        let classes = &self.inner.classes;

        if effective != identifier.name {
            debug!(%effective, "Mapped");
            if classes.exists(&identifier.name)
                && classes.exists(&effective)
                && !classes.is_subtype(&effective, &identifier.name)
            {
                warn!(%effective, "Mapped class isn't a subtype of {}", identifier.name);
            }
        }

        if classes.is_abstract(&effective) {
            let err = ResolveErrorKind::UnmappedAbstractType {
                name: identifier.name.clone(),
                effective,
            };
            error!("{}", err);
            return Err(err);
        }

        if let Some(factory) = factory {
            debug!(%effective, "Delegated to factory");

            let class_name = ArgumentSet::new().with(FACTORY_CLASS_NAME_PARAMETER, Value::String(effective.clone()));
            let target = format!("factory of {effective}");
            let arguments = resolve_arguments(
                self,
                &target,
                factory.parameters(),
                &[overrides, &blueprint.constructor_args, &class_name],
                stack,
            )?;
            return factory.call(arguments).map_err(|source| {
                let err = ResolveErrorKind::Instantiate { target, source };
                error!("{}", err);
                err
            });
        }

        let Some(def) = classes.get(&effective) else {
            let err = ResolveErrorKind::UnknownType { name: effective };
            error!("{}", err);
            return Err(err);
        };
        let Some(constructor) = def.constructor_service() else {
            let err = ResolveErrorKind::NoConstructor { name: effective };
            error!("{}", err);
            return Err(err);
        };

        let arguments = resolve_arguments(
            self,
            &effective,
            classes.constructor_parameters(&effective).unwrap_or_default(),
            &[overrides, &blueprint.constructor_args],
            stack,
        )?;
        let instance = constructor.clone().call(arguments).map_err(|source| {
            let err = ResolveErrorKind::Instantiate {
                target: effective.clone(),
                source,
            };
            error!("{}", err);
            err
        })?;
        debug!("Instantiated");

        let no_method_args = ArgumentSet::new();
        for call in &blueprint.scheduled_calls {
            let method_args = blueprint.method_args.get(&call.method).unwrap_or(&no_method_args);
            self.call_method(&effective, instance.clone(), &call.method, &[&call.overrides, method_args], stack)?;
        }

        Ok(Value::Object(instance))
    }

    fn call_method(
        &self,
        class: &str,
        receiver: Instance,
        method: &str,
        tiers: &[&ArgumentSet],
        stack: &mut ResolutionStack,
    ) -> Result<Value, ResolveErrorKind> {
        let Some(def_method) = self.inner.classes.get(class).and_then(|def| def.get_method(method)) else {
            let err = ResolveErrorKind::UnknownMethod {
                class: class.to_owned(),
                method: method.to_owned(),
            };
            error!("{}", err);
            return Err(err);
        };

        let target = format!("{class}::{method}");
        let arguments = resolve_arguments(self, &target, &def_method.parameters, tiers, stack)?;
        let value = def_method.service.clone().call((receiver, arguments)).map_err(|source| {
            let err = ResolveErrorKind::Instantiate { target, source };
            error!("{}", err);
            err
        })?;
        debug!(method, "Called");

        Ok(value)
    }
}
