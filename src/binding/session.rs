//! Binding Session - One-shot two-way wiring between a document and a registry.
//!
//! `bind` scans the document for elements carrying the `BIND_ATTR` attribute,
//! validates every name against the registry up front, then wires each
//! element/handle pair three ways:
//!
//! 1. Initial sync: element text := handle value
//! 2. Observable → element: a subscription that overwrites the element text
//!    on every notification (display write, no input hooks)
//! 3. Element → observable: an input hook that writes the element text
//!    through the handle on every keystroke-level edit
//!
//! Wiring is permanent (there is no unsubscription anywhere in the crate),
//! which is why binding is one-shot: a second `bind` on the same document
//! would double-subscribe every element and is rejected with `AlreadyBound`.
//! The returned `BindingSession` is the explicit record of the wiring.

use tracing::{debug, trace};

use crate::document::{Document, Element, ElementFlags};
use crate::error::BindError;

use super::registry::{Handle, Registry};

/// The attribute that marks an element as bound and names its registry entry.
pub const BIND_ATTR: &str = "bind";

// =============================================================================
// SESSION
// =============================================================================

/// The record of a completed `bind` call: which element was wired to which
/// binding name, in document order.
pub struct BindingSession {
    bindings: Vec<(String, String)>,
}

impl BindingSession {
    /// (element id, binding name) pairs, in document order.
    pub fn bindings(&self) -> &[(String, String)] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// =============================================================================
// BIND
// =============================================================================

/// Establish two-way synchronization for every bound element in the document.
///
/// Every `BIND_ATTR` value is resolved against the registry before any wiring
/// happens: one unknown name fails the whole call and leaves the document
/// untouched. Intended to run exactly once per bootstrap, after all
/// observables are constructed and registered; a repeat call reports
/// `AlreadyBound`.
pub fn bind(document: &Document, registry: &Registry) -> Result<BindingSession, BindError> {
    if document.is_bound() {
        return Err(BindError::AlreadyBound);
    }

    // Resolve and validate everything first, in document order.
    let mut resolved: Vec<(Element, String, Handle)> = Vec::new();
    for element in document.query(BIND_ATTR) {
        let name = element.attr(BIND_ATTR).unwrap_or_default();
        match registry.get(&name) {
            Some(handle) => resolved.push((element, name, handle.clone())),
            None => return Err(BindError::UnknownBinding { name }),
        }
    }

    let mut bindings = Vec::with_capacity(resolved.len());
    for (element, name, handle) in resolved {
        wire(&element, &name, &handle);
        bindings.push((element.id().to_string(), name));
    }

    document.mark_bound();
    debug!(bindings = bindings.len(), "binding session established");

    Ok(BindingSession { bindings })
}

/// Wire one element to one handle.
fn wire(element: &Element, name: &str, handle: &Handle) {
    // Initial sync.
    element.set_value(handle.get());

    // Observable → element. Display write only: set_value fires no input
    // hooks, so a notification never re-enters the observable from here.
    let element_for_sync = element.clone();
    handle.subscribe(move |value: &String| element_for_sync.set_value(value.clone()));

    // Element → observable. Wired for every entry; on a read-only handle the
    // hook reports the failure to whoever dispatched the keystroke.
    match handle {
        Handle::Writable(observable) => {
            let observable = observable.clone();
            element.on_input(move |text| {
                observable.set(text.to_string());
                Ok(())
            });
        }
        Handle::ReadOnly(_) => {
            let name = name.to_string();
            element.on_input(move |_| {
                Err(BindError::ReadOnlyBinding { name: name.clone() })
            });
        }
    }

    element.add_flags(ElementFlags::BOUND);
    trace!(element = element.id(), binding = name, "binding wired");
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{computed, observable};
    use crate::state::keyboard::{Key, KeyboardEvent};
    use std::cell::Cell;
    use std::rc::Rc;

    fn full_name_setup() -> (
        Document,
        Registry,
        crate::reactive::Observable<String>,
        crate::reactive::Computed<String>,
    ) {
        let first = observable("John".to_string());
        let last = observable("Smith".to_string());
        let full = computed(
            {
                let (first, last) = (first.clone(), last.clone());
                move || format!("{} {}", first.get(), last.get()).trim().to_string()
            },
            &[&first, &last],
        );

        let mut registry = Registry::new();
        registry.insert("firstName", first.clone());
        registry.insert("lastName", last);
        registry.insert("fullName", full.clone());

        let doc = Document::new();
        doc.create_input("first").set_attr(BIND_ATTR, "firstName");
        doc.create_input("last").set_attr(BIND_ATTR, "lastName");

        (doc, registry, first, full)
    }

    #[test]
    fn test_initial_sync_overwrites_element_text() {
        let (doc, registry, _first, _full) = full_name_setup();

        let session = bind(&doc, &registry).unwrap();

        assert_eq!(session.len(), 2);
        assert_eq!(doc.get("first").unwrap().value(), "John");
        assert_eq!(doc.get("last").unwrap().value(), "Smith");
        assert!(doc.is_bound());
        assert!(
            doc.get("first")
                .unwrap()
                .flags()
                .contains(ElementFlags::BOUND)
        );
    }

    #[test]
    fn test_observable_write_updates_element() {
        let (doc, registry, first, _full) = full_name_setup();
        bind(&doc, &registry).unwrap();

        first.set("Jane".to_string());

        assert_eq!(doc.get("first").unwrap().value(), "Jane");
    }

    #[test]
    fn test_keystrokes_drive_observable_and_computed() {
        let (doc, registry, first, full) = full_name_setup();
        bind(&doc, &registry).unwrap();

        let notifications = Rc::new(Cell::new(0));
        let notifications_clone = notifications.clone();
        full.subscribe(move |_| notifications_clone.set(notifications_clone.get() + 1));

        // Edit "John" down to "Jim", one keystroke at a time.
        let element = doc.get("first").unwrap();
        element.set_cursor(4);
        for _ in 0..3 {
            element.apply_key(&KeyboardEvent::new(Key::Backspace)).unwrap();
        }
        for c in "im".chars() {
            element.apply_key(&KeyboardEvent::char(c)).unwrap();
        }

        assert_eq!(element.value(), "Jim");
        assert_eq!(first.get(), "Jim");
        assert_eq!(full.get(), "Jim Smith");
        // One write-through per text-changing keystroke.
        assert_eq!(notifications.get(), 5);
    }

    #[test]
    fn test_two_elements_bound_to_one_observable_stay_in_sync() {
        let (doc, registry, _first, _full) = full_name_setup();
        doc.create_input("first_echo").set_attr(BIND_ATTR, "firstName");
        bind(&doc, &registry).unwrap();

        let element = doc.get("first").unwrap();
        element.apply_key(&KeyboardEvent::new(Key::End)).unwrap();
        element.apply_key(&KeyboardEvent::char('!')).unwrap();

        assert_eq!(doc.get("first_echo").unwrap().value(), "John!");
    }

    #[test]
    fn test_computed_binding_renders_and_rejects_writes() {
        let (doc, registry, first, _full) = full_name_setup();
        doc.create_input("full").set_attr(BIND_ATTR, "fullName");
        bind(&doc, &registry).unwrap();

        let element = doc.get("full").unwrap();
        assert_eq!(element.value(), "John Smith");

        // Observable → element still flows for the derived value.
        first.set("Jane".to_string());
        assert_eq!(element.value(), "Jane Smith");

        // A keystroke into the read-only field surfaces the error to the
        // dispatcher. The display text keeps the local edit; the next
        // notification from the computed overwrites it.
        let result = element.apply_key(&KeyboardEvent::char('x'));
        assert_eq!(
            result,
            Err(BindError::ReadOnlyBinding {
                name: "fullName".to_string()
            })
        );

        first.set("Joan".to_string());
        assert_eq!(element.value(), "Joan Smith");
    }

    #[test]
    fn test_unknown_binding_fails_fast_and_wires_nothing() {
        let (doc, registry, first, _full) = full_name_setup();
        doc.create_input("typo").set_attr(BIND_ATTR, "fristName");

        let result = bind(&doc, &registry);

        assert_eq!(
            result.err(),
            Some(BindError::UnknownBinding {
                name: "fristName".to_string()
            })
        );
        assert!(!doc.is_bound());
        // Nothing was wired, not even the valid entries before the typo. The
        // one listener on `first` is the computed's recompute subscription
        // from setup.
        assert_eq!(doc.get("first").unwrap().value(), "");
        assert_eq!(first.listener_count(), 1);
    }

    #[test]
    fn test_second_bind_is_rejected() {
        let (doc, registry, first, _full) = full_name_setup();
        bind(&doc, &registry).unwrap();

        let result = bind(&doc, &registry);
        assert_eq!(result.err(), Some(BindError::AlreadyBound));

        // Still singly-wired: one element subscription plus one computed
        // recompute listener per dependency.
        first.set("Jane".to_string());
        assert_eq!(doc.get("first").unwrap().value(), "Jane");
    }

    #[test]
    fn test_bind_with_no_bound_elements_is_an_empty_session() {
        let doc = Document::new();
        doc.create_input("plain");

        let session = bind(&doc, &Registry::new()).unwrap();

        assert!(session.is_empty());
        assert!(doc.is_bound());
    }

    #[test]
    fn test_session_records_pairs_in_document_order() {
        let (doc, registry, _first, _full) = full_name_setup();
        let session = bind(&doc, &registry).unwrap();

        let pairs: Vec<(&str, &str)> = session
            .bindings()
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("first", "firstName"), ("last", "lastName")]
        );
    }

    #[test]
    fn test_write_back_echo_does_not_loop_or_move_cursor() {
        let (doc, registry, first, _full) = full_name_setup();
        bind(&doc, &registry).unwrap();

        let writes = Rc::new(Cell::new(0));
        let writes_clone = writes.clone();
        first.subscribe(move |_| writes_clone.set(writes_clone.get() + 1));

        let element = doc.get("first").unwrap();
        element.apply_key(&KeyboardEvent::new(Key::End)).unwrap();
        element.apply_key(&KeyboardEvent::char('n')).unwrap();

        // One keystroke, one observable write. The notification echoed the
        // same text back into the element without re-entering the observable
        // (set_value fires no hooks, and an equal write would short-circuit
        // anyway), and the cursor stayed where the edit left it.
        assert_eq!(writes.get(), 1);
        assert_eq!(element.value(), "Johnn");
        assert_eq!(element.cursor(), 5);
    }
}
