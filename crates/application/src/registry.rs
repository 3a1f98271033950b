//! Name-indexed store of reusable assertions.
//!
//! A registry is usually owned by the test harness and handed to each
//! expectation explicitly. [`AssertionRegistry::global`] offers one shared
//! instance for suites that want process-wide aliases.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::debug;
use vouch_domain::UsageError;

use crate::ports::Assertion;

static GLOBAL: LazyLock<AssertionRegistry> = LazyLock::new(AssertionRegistry::new);

/// Thread-safe mapping from name to assertion.
///
/// Reads run concurrently; `register` and `flush` take the write lock and
/// are serialized against them.
#[derive(Default)]
pub struct AssertionRegistry {
    entries: RwLock<HashMap<String, Arc<dyn Assertion>>>,
}

impl AssertionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Stores an assertion under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, assertion: impl Assertion + 'static) {
        self.register_shared(name, Arc::new(assertion));
    }

    /// Stores an already shared assertion under `name`.
    pub fn register_shared(&self, name: impl Into<String>, assertion: Arc<dyn Assertion>) {
        let name = name.into();
        debug!(name = %name, "registering assertion");
        self.entries.write().insert(name, assertion);
    }

    /// Looks up every name, in argument order.
    ///
    /// Either all names resolve or none are returned.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnknownAssertion`] for the first unregistered
    /// name.
    pub fn resolve<I, S>(&self, names: I) -> Result<Vec<Arc<dyn Assertion>>, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = self.entries.read();
        names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                entries
                    .get(name)
                    .cloned()
                    .ok_or_else(|| UsageError::UnknownAssertion(name.to_string()))
            })
            .collect()
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Returns all registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Get count of registered assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry.
    pub fn flush(&self) {
        debug!("flushing assertion registry");
        self.entries.write().clear();
    }
}

impl std::fmt::Debug for AssertionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssertionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use pretty_assertions::assert_eq;
    use vouch_domain::{AssertionError, Exchange, Response};

    use super::*;
    use crate::ports::FnAssertion;

    fn exchange(status: u16) -> Exchange {
        Exchange::from_response(Response::new(status, Default::default(), ""))
    }

    fn below_400() -> FnAssertion<impl Fn(&Exchange) -> vouch_domain::AssertionResult> {
        FnAssertion::new("below 400", |exchange: &Exchange| {
            if exchange.response().status().as_u16() >= 400 {
                Err(AssertionError::mismatch("Invalid server response (> 400)"))
            } else {
                Ok(())
            }
        })
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = AssertionRegistry::new();
        registry.register("foo", below_400());

        let resolved = registry.resolve(["foo"]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].evaluate(&exchange(200)).is_ok());
        assert!(resolved[0].evaluate(&exchange(404)).is_err());
        assert_eq!(resolved[0].describe(), "below 400");
    }

    #[test]
    fn test_resolve_keeps_argument_order() {
        let registry = AssertionRegistry::new();
        registry.register("a", FnAssertion::new("a", |_: &Exchange| Ok(())));
        registry.register("b", FnAssertion::new("b", |_: &Exchange| Ok(())));

        let resolved = registry.resolve(["b", "a", "b"]).unwrap();
        let names: Vec<String> = resolved.iter().map(|a| a.describe()).collect();
        assert_eq!(names, ["b", "a", "b"]);
    }

    #[test]
    fn test_unknown_name_fails() {
        let registry = AssertionRegistry::new();
        registry.register("foo", below_400());

        let err = registry.resolve(["foo", "bar"]).err().unwrap();
        assert_eq!(err, UsageError::UnknownAssertion("bar".to_string()));
    }

    #[test]
    fn test_flush() {
        let registry = AssertionRegistry::new();
        registry.register("foo", below_400());
        assert!(registry.contains("foo"));

        registry.flush();
        assert!(registry.is_empty());
        assert!(registry.resolve(["foo"]).is_err());
    }

    #[test]
    fn test_register_replaces() {
        let registry = AssertionRegistry::new();
        registry.register("foo", FnAssertion::new("first", |_: &Exchange| Ok(())));
        registry.register("foo", FnAssertion::new("second", |_: &Exchange| Ok(())));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve(["foo"]).unwrap()[0].describe(), "second");
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        let registry = Arc::new(AssertionRegistry::new());
        registry.register("shared", below_400());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.register(format!("worker-{i}"), below_400());
                    registry.resolve(["shared"]).unwrap().len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.names()[0], "shared");
    }
}
