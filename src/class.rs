use std::collections::{BTreeMap, BTreeSet};

use crate::{
    argument::Arguments,
    errors::InstantiateErrorKind,
    parameter::Parameter,
    service::{service_fn, BoxCloneService},
    utils::thread_safety::{SendSafety, SyncSafety},
    value::{Instance, Value},
};

pub(crate) type BoxedCloneConstructor = BoxCloneService<Arguments, Instance, InstantiateErrorKind>;
pub(crate) type BoxedCloneMethod = BoxCloneService<(Instance, Arguments), Value, InstantiateErrorKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Concrete,
    Abstract,
    Interface,
}

#[derive(Clone)]
pub(crate) struct Method {
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) service: BoxedCloneMethod,
}

/// Description of a class: its kind, supertypes, constructor and methods.
///
/// This is the metadata the container reads instead of runtime reflection.
///
/// # Examples
/// ```rust
/// use autowire::{ClassDef, Parameter};
///
/// struct Transport;
/// struct Mailer {
///     transport: std::sync::Arc<Transport>,
///     from: String,
/// }
///
/// let transport = ClassDef::class("Transport").constructor(|_| Ok(Transport));
/// let mailer = ClassDef::class("Mailer")
///     .parameter(Parameter::class("transport", "Transport"))
///     .parameter(Parameter::new("from").with_default("noreply@localhost"))
///     .constructor(|args| {
///         Ok(Mailer {
///             transport: args.instance("transport")?,
///             from: args.string("from")?.to_owned(),
///         })
///     });
/// ```
#[derive(Clone)]
pub struct ClassDef {
    name: String,
    kind: ClassKind,
    supertypes: Vec<String>,
    parameters: Vec<Parameter>,
    constructor: Option<BoxedCloneConstructor>,
    methods: BTreeMap<String, Method>,
}

impl ClassDef {
    #[inline]
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Concrete)
    }

    #[inline]
    #[must_use]
    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Abstract)
    }

    #[inline]
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Interface)
    }

    fn with_kind(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertypes: Vec::new(),
            parameters: Vec::new(),
            constructor: None,
            methods: BTreeMap::new(),
        }
    }

    /// Declares a parent class or an implemented interface
    #[inline]
    #[must_use]
    pub fn implements(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Appends a constructor parameter. Parameters are resolved in declaration order.
    #[inline]
    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[inline]
    #[must_use]
    pub fn parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    #[must_use]
    pub fn constructor<F, T>(mut self, f: F) -> Self
    where
        F: Fn(Arguments) -> Result<T, InstantiateErrorKind> + Clone + Send + Sync + 'static,
        T: SendSafety + SyncSafety + 'static,
    {
        self.constructor = Some(BoxCloneService(Box::new(service_fn(
            move |arguments: Arguments| -> Result<Instance, InstantiateErrorKind> { f(arguments).map(Instance::new) },
        ))));
        self
    }

    /// Adds a method callable on instances of `T`, either scheduled after construction or invoked.
    #[must_use]
    pub fn method<P, F, T, R>(mut self, name: impl Into<String>, parameters: P, f: F) -> Self
    where
        P: IntoIterator<Item = Parameter>,
        F: Fn(&T, Arguments) -> Result<R, InstantiateErrorKind> + Clone + Send + Sync + 'static,
        T: 'static,
        R: Into<Value>,
    {
        let service = service_fn(
            move |(instance, arguments): (Instance, Arguments)| -> Result<Value, InstantiateErrorKind> {
                let Some(receiver) = instance.downcast_ref::<T>() else {
                    return Err(InstantiateErrorKind::IncorrectReceiver {
                        expected: std::any::type_name::<T>(),
                    });
                };
                f(receiver, arguments).map(Into::into)
            },
        );
        self.methods.insert(
            name.into(),
            Method {
                parameters: parameters.into_iter().collect(),
                service: BoxCloneService(Box::new(service)),
            },
        );
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ClassKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub(crate) fn constructor_service(&self) -> Option<&BoxedCloneConstructor> {
        self.constructor.as_ref()
    }

    #[inline]
    #[must_use]
    pub(crate) fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }
}

/// Class table: answers which classes exist, which are instantiable, how types relate
/// and what parameters constructors and methods take.
#[derive(Clone, Default)]
pub struct Classes {
    defs: BTreeMap<String, ClassDef>,
}

impl Classes {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { defs: BTreeMap::new() }
    }

    /// Registers a class. A class with the same name is replaced.
    #[inline]
    #[must_use]
    pub fn register(mut self, def: ClassDef) -> Self {
        self.insert(def);
        self
    }

    #[inline]
    pub fn insert(&mut self, def: ClassDef) -> Option<ClassDef> {
        self.defs.insert(def.name.clone(), def)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassDef> {
        self.defs.get(name)
    }

    #[inline]
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn is_instantiable(&self, name: &str) -> bool {
        self.get(name).is_some_and(|def| def.kind == ClassKind::Concrete)
    }

    /// Whether the class exists and is an interface or an abstract class
    #[inline]
    #[must_use]
    pub fn is_abstract(&self, name: &str) -> bool {
        self.get(name).is_some_and(|def| def.kind != ClassKind::Concrete)
    }

    /// Reflexive and transitive over declared supertypes
    #[must_use]
    pub fn is_subtype(&self, name: &str, supertype: &str) -> bool {
        let mut visited = BTreeSet::new();
        let mut stack = vec![name];
        while let Some(current) = stack.pop() {
            if current == supertype {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(def) = self.get(current) {
                stack.extend(def.supertypes.iter().map(String::as_str));
            }
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn constructor_parameters(&self, name: &str) -> Option<&[Parameter]> {
        self.get(name).map(|def| def.parameters.as_slice())
    }

    #[inline]
    #[must_use]
    pub fn method_parameters(&self, name: &str, method: &str) -> Option<&[Parameter]> {
        self.get(name)
            .and_then(|def| def.get_method(method))
            .map(|method| method.parameters.as_slice())
    }
}
