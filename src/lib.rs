//! Auto-wiring object graph resolver.
//!
//! [`Container::make`] turns a class identifier (`Name` or `Name#tag`) into an object, building
//! everything its constructor needs from the declared parameter types, configured arguments,
//! interface mappings and factories.

pub(crate) mod any;
pub(crate) mod argument;
pub(crate) mod argument_resolver;
pub(crate) mod blueprint;
pub(crate) mod cache;
pub(crate) mod class;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod factory;
pub(crate) mod identifier;
pub(crate) mod invokable;
pub(crate) mod parameter;
pub(crate) mod registry;
pub(crate) mod service;
pub(crate) mod stack;
pub(crate) mod value;

pub mod utils;

pub use any::TypeInfo;
pub use argument::{ArgumentSet, Arguments, RawArgument};
pub use blueprint::{ConstructorHandle, MethodHandle};
pub use class::{ClassDef, ClassKind, Classes};
pub use config::Config;
pub use container::Container;
pub use errors::{FactoryErrorKind, InstantiateErrorKind, ResolveErrorKind};
pub use factory::FACTORY_CLASS_NAME_PARAMETER;
pub use identifier::{ClassIdentifier, DEFAULT_TAG};
pub use invokable::{CallableRef, Invokable};
pub use parameter::{DeclaredType, Parameter};
pub use utils::thread_safety::RcThreadSafety;
pub use value::{Instance, Value};
