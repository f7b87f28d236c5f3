use std::collections::BTreeMap;

use crate::{identifier::ClassIdentifier, value::Value};

/// Instances of singleton blueprints. Entries are never replaced or evicted.
#[derive(Default)]
pub(crate) struct Cache {
    map: BTreeMap<ClassIdentifier, Value>,
}

impl Cache {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, identifier: &ClassIdentifier) -> Option<Value> {
        self.map.get(identifier).cloned()
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, identifier: &ClassIdentifier) -> bool {
        self.map.contains_key(identifier)
    }

    /// Inserts the value unless the identifier is already cached and returns the cached one.
    #[inline]
    pub(crate) fn insert_or_get(&mut self, identifier: ClassIdentifier, value: Value) -> Value {
        self.map.entry(identifier).or_insert(value).clone()
    }
}
