use std::collections::BTreeMap;

use crate::{blueprint::Blueprint, factory::Factory, identifier::ClassIdentifier};

/// Configuration data: blueprints, mappings and factories.
/// It's only changed by configuration calls, resolution only reads it.
#[derive(Default)]
pub(crate) struct Registry {
    blueprints: BTreeMap<ClassIdentifier, Blueprint>,
    mappings: BTreeMap<String, String>,
    factories: Vec<Factory>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            blueprints: BTreeMap::new(),
            mappings: BTreeMap::new(),
            factories: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn blueprint(&self, identifier: &ClassIdentifier) -> Option<&Blueprint> {
        self.blueprints.get(identifier)
    }

    /// Returns the blueprint, creating an empty one on first reference
    #[inline]
    pub(crate) fn blueprint_mut(&mut self, identifier: &ClassIdentifier) -> &mut Blueprint {
        self.blueprints.entry(identifier.clone()).or_default()
    }

    #[inline]
    pub(crate) fn set_mapping(&mut self, abstract_name: String, concrete_name: String) -> Option<String> {
        self.mappings.insert(abstract_name, concrete_name)
    }

    /// Applies one level of mapping. A name without mapping resolves to itself.
    #[inline]
    #[must_use]
    pub(crate) fn mapped<'a>(&'a self, name: &'a str) -> &'a str {
        self.mappings.get(name).map_or(name, String::as_str)
    }

    #[inline]
    pub(crate) fn add_factory(&mut self, factory: Factory) {
        self.factories.push(factory);
    }

    /// First registered factory whose pattern matches the class name
    #[inline]
    #[must_use]
    pub(crate) fn find_factory(&self, class_name: &str) -> Option<&Factory> {
        self.factories.iter().find(|factory| factory.is_match(class_name))
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::{factory::Factory, identifier::ClassIdentifier, invokable::Invokable};

    #[test]
    fn test_mapping_single_level() {
        let mut registry = Registry::new();
        registry.set_mapping("Storage".to_owned(), "BaseStorage".to_owned());
        registry.set_mapping("BaseStorage".to_owned(), "FileStorage".to_owned());

        assert_eq!(registry.mapped("Storage"), "BaseStorage");
        assert_eq!(registry.mapped("FileStorage"), "FileStorage");

        registry.set_mapping("Storage".to_owned(), "MemoryStorage".to_owned());
        assert_eq!(registry.mapped("Storage"), "MemoryStorage");
    }

    #[test]
    fn test_factory_priority() {
        let mut registry = Registry::new();
        registry.add_factory(Factory::new("Repository$", Invokable::new(|| Ok(1))).unwrap());
        registry.add_factory(Factory::new("^User", Invokable::new(|| Ok(2))).unwrap());

        assert_eq!(registry.find_factory("UserRepository").unwrap().pattern(), "Repository$");
        assert_eq!(registry.find_factory("UserService").unwrap().pattern(), "^User");
        assert!(registry.find_factory("Mailer").is_none());
    }

    #[test]
    fn test_blueprints_per_identifier() {
        let mut registry = Registry::new();
        registry.blueprint_mut(&ClassIdentifier::parse("Foo#remote")).config.singleton = false;

        assert!(registry.blueprint(&ClassIdentifier::parse("Foo")).is_none());
        assert!(!registry.blueprint(&ClassIdentifier::parse("Foo#remote")).unwrap().config.singleton);
    }
}
