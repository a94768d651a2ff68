//! Element - Text-input field with keystroke-level editing.
//!
//! An element is a shared handle (cloning clones the handle, not the state),
//! mirroring how every holder of a node reference sees the same node. It
//! carries an id, a string attribute map, the displayed text value, a
//! char-indexed cursor, and the input hooks the binding layer installs for
//! the element→observable write path.
//!
//! Two distinct write paths exist on purpose:
//!
//! - `set_value` is the programmatic/display write. It replaces the text and
//!   clamps the cursor but fires no input hooks. The binding layer uses it
//!   for observable→element sync, which is what keeps a notification from
//!   echoing back into the observable.
//! - `apply_key` is the user-driven write. It edits the text and fires the
//!   input hooks whenever the text actually changed.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;

use crate::error::BindError;
use crate::state::keyboard::{Key, KeyboardEvent, Modifiers};

// =============================================================================
// FLAGS
// =============================================================================

bitflags! {
    /// Element state flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ElementFlags: u8 {
        /// Participates in Tab focus cycling.
        const FOCUSABLE = 1 << 0;
        /// Wired to a binding by an active session.
        const BOUND = 1 << 1;
    }
}

// =============================================================================
// INPUT HOOK
// =============================================================================

/// The element→observable write path. Receives the element's current text
/// after a user-driven edit. Fallible: writing through to a read-only
/// binding reports an error to the keystroke dispatcher.
pub type InputHook = Rc<dyn Fn(&str) -> Result<(), BindError>>;

// =============================================================================
// ELEMENT
// =============================================================================

struct ElementInner {
    id: String,
    attributes: RefCell<HashMap<String, String>>,
    value: RefCell<String>,
    cursor: Cell<usize>,
    flags: Cell<ElementFlags>,
    input_hooks: RefCell<Vec<InputHook>>,
}

/// A text-input element. Cheap to clone; clones share state.
pub struct Element {
    inner: Rc<ElementInner>,
}

impl Clone for Element {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Element {
    pub(crate) fn new(id: impl Into<String>, flags: ElementFlags) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                id: id.into(),
                attributes: RefCell::new(HashMap::new()),
                value: RefCell::new(String::new()),
                cursor: Cell::new(0),
                flags: Cell::new(flags),
                input_hooks: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Displayed text value.
    pub fn value(&self) -> String {
        self.inner.value.borrow().clone()
    }

    /// Programmatic/display write: replace the text and clamp the cursor.
    /// Fires no input hooks.
    pub fn set_value(&self, text: impl Into<String>) {
        let text = text.into();
        let len = text.chars().count();
        self.inner.value.replace(text);
        if self.inner.cursor.get() > len {
            self.inner.cursor.set(len);
        }
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.inner.attributes.borrow().get(name).cloned()
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        self.inner
            .attributes
            .borrow_mut()
            .insert(name.into(), value.into());
    }

    pub fn flags(&self) -> ElementFlags {
        self.inner.flags.get()
    }

    pub(crate) fn add_flags(&self, flags: ElementFlags) {
        self.inner.flags.set(self.inner.flags.get() | flags);
    }

    pub fn is_focusable(&self) -> bool {
        self.flags().contains(ElementFlags::FOCUSABLE)
    }

    /// Cursor position as a char index into the value.
    pub fn cursor(&self) -> usize {
        self.inner.cursor.get()
    }

    pub fn set_cursor(&self, position: usize) {
        let len = self.inner.value.borrow().chars().count();
        self.inner.cursor.set(position.min(len));
    }

    /// Register an input hook. Hooks fire in registration order after every
    /// user-driven edit; a failing hook aborts the ones after it.
    pub fn on_input(&self, hook: impl Fn(&str) -> Result<(), BindError> + 'static) {
        self.inner.input_hooks.borrow_mut().push(Rc::new(hook));
    }

    fn fire_input(&self) -> Result<(), BindError> {
        let hooks: Vec<InputHook> = self.inner.input_hooks.borrow().clone();
        let text = self.value();
        for hook in hooks {
            hook(&text)?;
        }
        Ok(())
    }

    // =========================================================================
    // KEYSTROKE EDITING
    // =========================================================================

    /// Apply one keystroke to the element.
    ///
    /// Returns `Ok(true)` when the key was consumed (whether or not the text
    /// changed), `Ok(false)` for keys this element does not handle. Text
    /// changes fire the input hooks; the first hook error propagates to the
    /// caller, exactly as a write into a read-only binding should surface to
    /// whoever dispatched the keystroke.
    pub fn apply_key(&self, event: &KeyboardEvent) -> Result<bool, BindError> {
        if !event.is_active() {
            return Ok(false);
        }

        let text = self.value();
        let len = text.chars().count();
        // Clamp against external value changes since the last edit.
        let cursor = self.inner.cursor.get().min(len);

        match event.key {
            Key::Char(c) if !event.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => {
                let mut chars: Vec<char> = text.chars().collect();
                chars.insert(cursor, c);
                self.inner.value.replace(chars.into_iter().collect());
                self.inner.cursor.set(cursor + 1);
                self.fire_input()?;
                Ok(true)
            }
            Key::Backspace => {
                if cursor == 0 {
                    self.inner.cursor.set(0);
                    return Ok(true);
                }
                let mut chars: Vec<char> = text.chars().collect();
                chars.remove(cursor - 1);
                self.inner.value.replace(chars.into_iter().collect());
                self.inner.cursor.set(cursor - 1);
                self.fire_input()?;
                Ok(true)
            }
            Key::Delete => {
                if cursor >= len {
                    self.inner.cursor.set(cursor);
                    return Ok(true);
                }
                let mut chars: Vec<char> = text.chars().collect();
                chars.remove(cursor);
                self.inner.value.replace(chars.into_iter().collect());
                self.inner.cursor.set(cursor);
                self.fire_input()?;
                Ok(true)
            }
            Key::Left => {
                let next = if event.modifiers.contains(Modifiers::CTRL) {
                    find_word_start(&text, cursor)
                } else {
                    cursor.saturating_sub(1)
                };
                self.inner.cursor.set(next);
                Ok(true)
            }
            Key::Right => {
                let next = if event.modifiers.contains(Modifiers::CTRL) {
                    find_word_end(&text, cursor)
                } else {
                    (cursor + 1).min(len)
                };
                self.inner.cursor.set(next);
                Ok(true)
            }
            Key::Home => {
                self.inner.cursor.set(0);
                Ok(true)
            }
            Key::End => {
                self.inner.cursor.set(len);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// =============================================================================
// WORD BOUNDARIES
// =============================================================================

/// Start of the word before `pos`. Words are runs of alphanumerics.
fn find_word_start(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut i = pos.min(chars.len());

    while i > 0 && !chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }

    i
}

/// End of the word after `pos`. Words are runs of alphanumerics.
fn find_word_end(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut i = pos.min(len);

    while i < len && !chars[i].is_alphanumeric() {
        i += 1;
    }
    while i < len && chars[i].is_alphanumeric() {
        i += 1;
    }

    i
}

// =============================================================================
// TESTS
// =============================================================================
