use {
    crate::Registry,
    std::sync::{Arc, PoisonError, RwLock},
};

/// Shared handle to the current registry.
///
/// Readers get an `Arc` to an immutable registry; writers compute a new
/// registry from the current one and swap it in under the write lock. A
/// reader therefore sees either the whole update or none of it.
#[derive(Debug, Default, Clone)]
pub struct RegistryStore {
    inner: Arc<RwLock<Option<Arc<Registry>>>>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(registry)))),
        }
    }

    /// The current registry, or `None` if markets haven't been loaded yet.
    pub fn snapshot(&self) -> Option<Arc<Registry>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the registry. `None` is ignored: an absent registry never
    /// replaces a loaded one.
    pub fn set_markets(&self, registry: Option<Registry>) {
        let Some(registry) = registry else {
            tracing::debug!("Ignoring empty registry update");
            return;
        };

        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(registry));
    }

    /// Replace the registry with the result of `action` applied to it.
    /// Does nothing if no registry is loaded.
    pub fn update<F>(&self, action: F)
    where
        F: FnOnce(Registry) -> Registry,
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = guard.take() {
            let registry = Arc::unwrap_or_clone(current);
            *guard = Some(Arc::new(action(registry)));
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        lens_math::Dec,
        lens_types::{market::Market, Denom},
    };

    #[test]
    fn empty_until_markets_are_set() {
        let store = RegistryStore::new();
        assert!(store.snapshot().is_none());

        store.update(|registry| registry.reset());
        assert!(store.snapshot().is_none());

        store.set_markets(Some(Registry::default()));
        assert!(store.snapshot().is_some());
    }

    #[test]
    fn none_never_replaces_registry() {
        let store = RegistryStore::with_registry(Registry::default());
        store.set_markets(None);
        assert!(store.snapshot().is_some());
    }

    #[test]
    fn updates_swap_in_a_new_registry() {
        let store = RegistryStore::with_registry(Registry::from_markets(Vec::<Market>::new()));
        let before = store.snapshot().unwrap();

        store.update(|registry| registry.merge_price(&Denom::new_unchecked("untrn"), Dec::one()));

        let after = store.snapshot().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before, after);
    }
}
