use std::fmt::{self, Debug, Formatter};

use crate::{
    any::TypeInfo,
    invokable::Invokable,
    utils::thread_safety::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// A type-erased shared object built by the container or handed to it.
#[derive(Clone)]
pub struct Instance {
    object: RcAnyThreadSafety,
    type_info: TypeInfo,
}

impl Instance {
    #[inline]
    #[must_use]
    pub fn new<T: SendSafety + SyncSafety + 'static>(value: T) -> Self {
        Self::from_rc(RcThreadSafety::new(value))
    }

    #[inline]
    #[must_use]
    pub fn from_rc<T: SendSafety + SyncSafety + 'static>(value: RcThreadSafety<T>) -> Self {
        Self {
            object: value,
            type_info: TypeInfo::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.object.is::<T>()
    }

    #[must_use]
    pub fn downcast<T: SendSafety + SyncSafety + 'static>(&self) -> Option<RcThreadSafety<T>> {
        self.object.clone().downcast().ok()
    }

    #[inline]
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.object.downcast_ref()
    }

    /// Whether both handles point to the same object.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        RcThreadSafety::ptr_eq(&self.object, &other.object)
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").field(&self.type_info.name).finish()
    }
}

/// A value passed into constructors, methods, factories and invokables.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(Instance),
    Callable(Invokable),
}

impl Value {
    #[inline]
    #[must_use]
    pub fn object<T: SendSafety + SyncSafety + 'static>(value: T) -> Self {
        Self::Object(Instance::new(value))
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::Callable(_) => "callable",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(val) => Some(*val),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(val) => Some(*val),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(val) => Some(*val),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(val) => Some(val),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(val) => Some(val),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Object(val) => Some(val),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_callable(&self) -> Option<&Invokable> {
        match self {
            Self::Callable(val) => Some(val),
            _ => None,
        }
    }

    #[must_use]
    pub fn downcast<T: SendSafety + SyncSafety + 'static>(&self) -> Option<RcThreadSafety<T>> {
        self.as_instance().and_then(Instance::downcast)
    }

    /// Compares scalars by value and objects by identity. Callables never compare equal.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.same(b)),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<()> for Value {
    #[inline]
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(val: bool) -> Self {
        Self::Bool(val)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(val: i32) -> Self {
        Self::Int(val.into())
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(val: i64) -> Self {
        Self::Int(val)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(val: u32) -> Self {
        Self::Int(val.into())
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(val: f64) -> Self {
        Self::Float(val)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(val: &str) -> Self {
        Self::String(val.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(val: String) -> Self {
        Self::String(val)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(val: Vec<Value>) -> Self {
        Self::List(val)
    }
}

impl From<Instance> for Value {
    #[inline]
    fn from(val: Instance) -> Self {
        Self::Object(val)
    }
}

impl From<Invokable> for Value {
    #[inline]
    fn from(val: Invokable) -> Self {
        Self::Callable(val)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(val: Option<T>) -> Self {
        val.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::{Instance, Value};

    struct Transport(u8);

    #[test]
    fn test_instance_downcast() {
        let instance = Instance::new(Transport(3));

        assert!(instance.is::<Transport>());
        assert_eq!(instance.downcast::<Transport>().unwrap().0, 3);
        assert_eq!(instance.downcast_ref::<Transport>().unwrap().0, 3);
        assert!(instance.downcast::<u8>().is_none());
        assert_eq!(instance.type_info().short_name(), "Transport");
    }

    #[test]
    fn test_instance_identity() {
        let instance = Instance::new(Transport(1));
        let other = Instance::new(Transport(1));

        assert!(instance.ptr_eq(&instance.clone()));
        assert!(!instance.ptr_eq(&other));
        assert!(Value::from(instance.clone()).same(&Value::Object(instance)));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(5).as_int(), Some(5));
        assert!(Value::from(None::<i64>).is_null());
        assert!(Value::from(()).is_null());
        assert_eq!(Value::from(vec![Value::from(true)]).as_list().map(<[Value]>::len), Some(1));
        assert_eq!(Value::from(1.5).kind(), "float");
    }
}
