//! Registry - Named binding handles.
//!
//! The flat name→value mapping application setup builds before binding a
//! document. Entries are `Handle`s: either a writable observable or a
//! read-only computed, behind one uniform read/subscribe surface. The
//! writability split is what lets the session layer wire the
//! element→observable path for every entry while keeping writes into derived
//! values a reported error instead of a reachable setter.

use std::collections::HashMap;

use crate::reactive::{Computed, Observable};

// =============================================================================
// HANDLE
// =============================================================================

/// A registry entry: one bindable value.
///
/// Built via `From`, so both observables and computeds register the same way:
///
/// ```
/// use tether_tui::binding::Registry;
/// use tether_tui::reactive::observable;
///
/// let mut registry = Registry::new();
/// registry.insert("firstName", observable("John".to_string()));
/// ```
#[derive(Clone)]
pub enum Handle {
    /// A plain observable: readable, subscribable, writable.
    Writable(Observable<String>),
    /// A computed: readable and subscribable only.
    ReadOnly(Computed<String>),
}

impl Handle {
    /// Current value.
    pub fn get(&self) -> String {
        match self {
            Handle::Writable(observable) => observable.get(),
            Handle::ReadOnly(computed) => computed.get(),
        }
    }

    /// Subscribe to notifications, writable or not.
    pub fn subscribe(&self, listener: impl Fn(&String) + 'static) {
        match self {
            Handle::Writable(observable) => observable.subscribe(listener),
            Handle::ReadOnly(computed) => computed.subscribe(listener),
        }
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, Handle::Writable(_))
    }
}

impl From<Observable<String>> for Handle {
    fn from(observable: Observable<String>) -> Self {
        Handle::Writable(observable)
    }
}

impl From<Computed<String>> for Handle {
    fn from(computed: Computed<String>) -> Self {
        Handle::ReadOnly(computed)
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Flat mapping from binding name to handle.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, Handle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value under a name. A later insert under the same name
    /// replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, handle: impl Into<Handle>) {
        self.entries.insert(name.into(), handle.into());
    }

    pub fn get(&self, name: &str) -> Option<&Handle> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted for deterministic reporting.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{computed, observable};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_insert_and_get() {
        let mut registry = Registry::new();
        registry.insert("firstName", observable("John".to_string()));

        assert!(registry.contains("firstName"));
        assert!(!registry.contains("lastName"));
        assert_eq!(registry.get("firstName").unwrap().get(), "John");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_writability_split() {
        let first = observable("John".to_string());
        let first_clone = first.clone();
        let shouted = computed(move || first_clone.get().to_uppercase(), &[&first]);

        let mut registry = Registry::new();
        registry.insert("first", first);
        registry.insert("shouted", shouted);

        assert!(registry.get("first").unwrap().is_writable());
        assert!(!registry.get("shouted").unwrap().is_writable());
        assert_eq!(registry.get("shouted").unwrap().get(), "JOHN");
    }

    #[test]
    fn test_handle_subscribe_works_for_both_kinds() {
        let base = observable("a".to_string());
        let base_clone = base.clone();
        let upper = computed(move || base_clone.get().to_uppercase(), &[&base]);

        let mut registry = Registry::new();
        registry.insert("base", base.clone());
        registry.insert("upper", upper);

        let count = Rc::new(Cell::new(0));
        for name in ["base", "upper"] {
            let count_clone = count.clone();
            registry
                .get(name)
                .unwrap()
                .subscribe(move |_| count_clone.set(count_clone.get() + 1));
        }

        base.set("b".to_string());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry = Registry::new();
        registry.insert("zeta", observable(String::new()));
        registry.insert("alpha", observable(String::new()));

        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
