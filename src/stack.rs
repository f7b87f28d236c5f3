use crate::identifier::ClassIdentifier;

/// Identifiers under construction in one call tree, outermost first.
#[derive(Debug, Default)]
pub(crate) struct ResolutionStack {
    entries: Vec<ClassIdentifier>,
}

impl ResolutionStack {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, identifier: &ClassIdentifier) -> bool {
        self.entries.contains(identifier)
    }

    #[inline]
    pub(crate) fn push(&mut self, identifier: ClassIdentifier) {
        self.entries.push(identifier);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<ClassIdentifier> {
        self.entries.pop()
    }

    #[cfg(test)]
    #[inline]
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The path from the first occurrence of `identifier` back to it, e.g. `[A, B, A]`.
    #[must_use]
    pub(crate) fn cycle(&self, identifier: &ClassIdentifier) -> Vec<ClassIdentifier> {
        let start = self.entries.iter().position(|entry| entry == identifier).unwrap_or(self.entries.len());
        let mut cycle = self.entries[start..].to_vec();
        cycle.push(identifier.clone());
        cycle
    }
}

#[cfg(test)]
mod tests {
    use super::ResolutionStack;
    use crate::identifier::ClassIdentifier;

    #[test]
    fn test_cycle() {
        let mut stack = ResolutionStack::new();
        stack.push(ClassIdentifier::parse("Root"));
        stack.push(ClassIdentifier::parse("A"));
        stack.push(ClassIdentifier::parse("B"));

        let a = ClassIdentifier::parse("A");
        assert!(stack.contains(&a));
        assert!(!stack.contains(&ClassIdentifier::parse("A#other")));
        assert_eq!(
            stack.cycle(&a),
            [a.clone(), ClassIdentifier::parse("B"), a]
        );

        stack.pop();
        stack.pop();
        stack.pop();
        assert!(stack.is_empty());
    }
}
