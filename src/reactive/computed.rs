//! Computed - Derived, read-only observable.
//!
//! A `Computed<T>` owns no state of its own beyond the last result of its
//! derive closure. It subscribes to every declared dependency at construction
//! and recomputes whenever any of them notifies. Consumers can read it and
//! subscribe to it exactly like an observable, but there is no setter on the
//! type: derived values cannot be written, full stop. The only dynamic write
//! path in the crate (a bound element's keystroke hook) reports an error
//! instead of reaching a setter.
//!
//! Recomputation is unconditional. When a dependency notifies, the derive
//! closure runs and the computed re-notifies its own listeners even if the
//! recomputed value compares equal to the previous one. Listener call counts
//! therefore track dependency changes, not value changes; callers that need
//! coalescing can compare in their listener.
//!
//! # Example
//!
//! ```
//! use tether_tui::reactive::{computed, observable};
//!
//! let first = observable("John".to_string());
//! let last = observable("Smith".to_string());
//!
//! let full = computed(
//!     {
//!         let (first, last) = (first.clone(), last.clone());
//!         move || format!("{} {}", first.get(), last.get()).trim().to_string()
//!     },
//!     &[&first, &last],
//! );
//!
//! assert_eq!(full.get(), "John Smith");
//! first.set("Jane".to_string());
//! assert_eq!(full.get(), "Jane Smith");
//! ```

use std::rc::Rc;

use super::observable::{Listener, Observable, ValueCell};

// =============================================================================
// DEPENDENCY TRAIT
// =============================================================================

/// The subscription seam between a computed and the values it derives from.
///
/// Anything that can accept a type-erased change callback qualifies as a
/// dependency. Both `Observable` and `Computed` implement it, so computeds
/// can chain on other computeds.
pub trait Dependency {
    /// Register a callback invoked on every notification, without the value.
    fn subscribe_change(&self, listener: Rc<dyn Fn()>);
}

impl<T: Clone + PartialEq + 'static> Dependency for Observable<T> {
    fn subscribe_change(&self, listener: Rc<dyn Fn()>) {
        self.subscribe(move |_| listener());
    }
}

impl<T: Clone + 'static> Dependency for Computed<T> {
    fn subscribe_change(&self, listener: Rc<dyn Fn()>) {
        self.subscribe(move |_| listener());
    }
}

// =============================================================================
// COMPUTED
// =============================================================================

/// A derived, read-only observable recomputed from one or more dependencies.
///
/// Like `Observable`, this is a cheap shared handle; clones read the same
/// cell. Dependencies are not owned: they may outlive the computed or be
/// shared by other consumers, and the subscription established at
/// construction is permanent (there is no unsubscribe anywhere in the crate).
pub struct Computed<T> {
    cell: Rc<ValueCell<T>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Clone + 'static> Computed<T> {
    /// Build a computed from a derive closure and its dependencies.
    ///
    /// The derive closure runs once, eagerly, to produce the initial value.
    /// Each dependency is then subscribed in the given order with a closure
    /// that recomputes (no equality check) and re-notifies unconditionally.
    pub fn new<F>(derive: F, deps: &[&dyn Dependency]) -> Self
    where
        F: Fn() -> T + 'static,
    {
        let cell = Rc::new(ValueCell::new(derive()));
        let derive = Rc::new(derive);

        for dep in deps {
            let cell = Rc::clone(&cell);
            let derive = Rc::clone(&derive);
            dep.subscribe_change(Rc::new(move || {
                cell.replace(derive());
                cell.notify();
            }));
        }

        Self { cell }
    }

    /// Last computed value.
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Append a listener. Same semantics as `Observable::subscribe`.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        self.cell.subscribe(Rc::new(listener) as Listener<T>);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.cell.listener_count()
    }
}

/// Build a computed from a derive closure and its dependencies.
///
/// Free-function constructor matching `observable`. The derive closure
/// usually captures clones of the dependency handles it reads:
///
/// ```
/// use tether_tui::reactive::{computed, observable};
///
/// let count = observable(2u32);
/// let doubled = computed(
///     {
///         let count = count.clone();
///         move || count.get() * 2
///     },
///     &[&count],
/// );
/// assert_eq!(doubled.get(), 4);
/// ```
pub fn computed<T, F>(derive: F, deps: &[&dyn Dependency]) -> Computed<T>
where
    T: Clone + 'static,
    F: Fn() -> T + 'static,
{
    Computed::new(derive, deps)
}

// =============================================================================
// TESTS
// =============================================================================
