//! Document Module - The element tree the binding layer scans.
//!
//! A `Document` is a creation-ordered collection of input elements plus the
//! focus state that key routing drives:
//!
//! - **Elements** - Created through the document, looked up by id or by
//!   attribute
//! - **Focus** - One focused element at a time, Tab cycling with wrap-around
//!   over focusable elements
//! - **Bound latch** - A document can be bound exactly once; the binding
//!   layer checks and sets the latch
//!
//! # Example
//!
//! ```
//! use tether_tui::document::Document;
//!
//! let doc = Document::new();
//! let first = doc.create_input("first");
//! first.set_attr("bind", "firstName");
//!
//! assert_eq!(doc.query("bind").len(), 1);
//! assert!(doc.focus("first"));
//! assert_eq!(doc.focused().unwrap().id(), "first");
//! ```

mod element;

pub use element::{Element, ElementFlags, InputHook};

use std::cell::{Cell, RefCell};

use tracing::trace;

// =============================================================================
// DOCUMENT
// =============================================================================

/// The element tree plus focus state. Single-threaded; shared by reference
/// where needed.
pub struct Document {
    elements: RefCell<Vec<Element>>,
    focused: Cell<Option<usize>>,
    bound: Cell<bool>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: RefCell::new(Vec::new()),
            focused: Cell::new(None),
            bound: Cell::new(false),
        }
    }

    // =========================================================================
    // ELEMENTS
    // =========================================================================

    /// Create a focusable text-input element and append it to the document.
    pub fn create_input(&self, id: impl Into<String>) -> Element {
        let element = Element::new(id, ElementFlags::FOCUSABLE);
        self.elements.borrow_mut().push(element.clone());
        element
    }

    /// First element with the given id.
    pub fn get(&self, id: &str) -> Option<Element> {
        self.elements
            .borrow()
            .iter()
            .find(|e| e.id() == id)
            .cloned()
    }

    /// Every element carrying the given attribute, in creation order.
    pub fn query(&self, attr: &str) -> Vec<Element> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.attr(attr).is_some())
            .cloned()
            .collect()
    }

    /// All elements, in creation order.
    pub fn elements(&self) -> Vec<Element> {
        self.elements.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    // =========================================================================
    // BOUND LATCH
    // =========================================================================

    /// True once a binding session has been established on this document.
    pub fn is_bound(&self) -> bool {
        self.bound.get()
    }

    pub(crate) fn mark_bound(&self) {
        self.bound.set(true);
    }

    // =========================================================================
    // FOCUS
    // =========================================================================

    /// The currently focused element, if any.
    pub fn focused(&self) -> Option<Element> {
        let index = self.focused.get()?;
        self.elements.borrow().get(index).cloned()
    }

    /// Focus the element with the given id. Returns false when the id is
    /// unknown or the element is not focusable.
    pub fn focus(&self, id: &str) -> bool {
        let index = self
            .elements
            .borrow()
            .iter()
            .position(|e| e.id() == id && e.is_focusable());
        match index {
            Some(index) => {
                self.set_focus(index);
                true
            }
            None => false,
        }
    }

    /// Clear focus.
    pub fn blur(&self) {
        self.focused.set(None);
    }

    /// Focus the first focusable element. Returns false when there is none.
    pub fn focus_first(&self) -> bool {
        match self.focusable_indices().first() {
            Some(&index) => {
                self.set_focus(index);
                true
            }
            None => false,
        }
    }

    /// Move focus to the next focusable element, wrapping around.
    /// With nothing focused, focuses the first one.
    pub fn focus_next(&self) -> bool {
        let focusable = self.focusable_indices();
        let Some(&first) = focusable.first() else {
            return false;
        };

        let next = match self.focused.get() {
            Some(current) => focusable
                .iter()
                .copied()
                .find(|&i| i > current)
                .unwrap_or(first),
            None => first,
        };
        self.set_focus(next);
        true
    }

    /// Move focus to the previous focusable element, wrapping around.
    /// With nothing focused, focuses the last one.
    pub fn focus_prev(&self) -> bool {
        let focusable = self.focusable_indices();
        let Some(&last) = focusable.last() else {
            return false;
        };

        let prev = match self.focused.get() {
            Some(current) => focusable
                .iter()
                .rev()
                .copied()
                .find(|&i| i < current)
                .unwrap_or(last),
            None => last,
        };
        self.set_focus(prev);
        true
    }

    fn set_focus(&self, index: usize) {
        self.focused.set(Some(index));
        if let Some(element) = self.elements.borrow().get(index) {
            trace!(id = element.id(), "focus moved");
        }
    }

    fn focusable_indices(&self) -> Vec<usize> {
        self.elements
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_focusable())
            .map(|(i, _)| i)
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
