//! Input Module - Crossterm bridge and key routing.
//!
//! Converts crossterm's key events into crate-owned events and routes them
//! into a document. Crossterm types stop at this module; nothing else in the
//! crate (or in callers' reach through it) sees them.
//!
//! # API
//!
//! - `convert_key_event` - Crossterm KeyEvent → our KeyboardEvent
//! - `poll_key` - Non-blocking key check with timeout
//! - `read_key` - Blocking read of the next terminal event
//! - `route_key` - Dispatch a key event into a document
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use tether_tui::state::{poll_key, route_key};
//!
//! loop {
//!     if let Some(event) = poll_key(Duration::from_millis(16))? {
//!         route_key(&doc, &event)?;
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    poll, read,
};
use tracing::trace;

use crate::document::Document;
use crate::error::BindError;

use super::keyboard::{Key, KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm key event. Returns `None` for keys the editing and
/// focus layers have no use for (function keys, page navigation, media keys).
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyboardEvent> {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    Some(KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    })
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    if mods.contains(KeyModifiers::CONTROL) {
        modifiers |= Modifiers::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        modifiers |= Modifiers::ALT;
    }
    if mods.contains(KeyModifiers::SHIFT) {
        modifiers |= Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::SUPER) {
        modifiers |= Modifiers::META;
    }
    modifiers
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll for a key event with a timeout. Returns `None` when no event arrives
/// within the timeout, or when the next terminal event is not a key this
/// crate models (resize, mouse, unmapped keys).
pub fn poll_key(timeout: Duration) -> std::io::Result<Option<KeyboardEvent>> {
    if poll(timeout)? {
        read_key()
    } else {
        Ok(None)
    }
}

/// Read the next terminal event (blocking). Returns `None` when it is not a
/// key this crate models; callers loop.
pub fn read_key() -> std::io::Result<Option<KeyboardEvent>> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(convert_key_event(key)),
        _ => Ok(None),
    }
}

// =============================================================================
// ROUTING
// =============================================================================

/// Dispatch a key event into a document.
///
/// Release events are dropped. Tab and BackTab cycle focus; everything else
/// goes to the focused element's editor. Returns whether the event was
/// consumed. A write into a read-only binding surfaces here, synchronously,
/// as the error of the keystroke that attempted it.
pub fn route_key(document: &Document, event: &KeyboardEvent) -> Result<bool, BindError> {
    if !event.is_active() {
        return Ok(false);
    }

    match event.key {
        Key::Tab if event.modifiers.contains(Modifiers::SHIFT) => Ok(document.focus_prev()),
        Key::Tab => Ok(document.focus_next()),
        Key::BackTab => Ok(document.focus_prev()),
        _ => match document.focused() {
            Some(element) => {
                let consumed = element.apply_key(event)?;
                trace!(element = element.id(), consumed, "key dispatched");
                Ok(consumed)
            }
            None => Ok(false),
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn crossterm_key(code: KeyCode, mods: KeyModifiers, kind: KeyEventKind) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers: mods,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_char() {
        let event = convert_key_event(crossterm_key(
            KeyCode::Char('a'),
            KeyModifiers::empty(),
            KeyEventKind::Press,
        ))
        .unwrap();

        assert_eq!(event.key, Key::Char('a'));
        assert!(event.modifiers.is_empty());
        assert_eq!(event.state, KeyState::Press);
    }

    #[test]
    fn test_convert_named_keys() {
        let cases = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::BackTab, Key::BackTab),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Delete, Key::Delete),
            (KeyCode::Left, Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Home, Key::Home),
            (KeyCode::End, Key::End),
            (KeyCode::Esc, Key::Escape),
        ];

        for (code, expected) in cases {
            let event =
                convert_key_event(crossterm_key(code, KeyModifiers::empty(), KeyEventKind::Press))
                    .unwrap();
            assert_eq!(event.key, expected);
        }
    }

    #[test]
    fn test_unmapped_keys_are_dropped() {
        for code in [KeyCode::F(1), KeyCode::PageUp, KeyCode::Insert] {
            assert!(
                convert_key_event(crossterm_key(code, KeyModifiers::empty(), KeyEventKind::Press))
                    .is_none()
            );
        }
    }

    #[test]
    fn test_convert_modifiers() {
        let event = convert_key_event(crossterm_key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ))
        .unwrap();

        assert!(event.modifiers.contains(Modifiers::CTRL));
        assert!(event.modifiers.contains(Modifiers::SHIFT));
        assert!(!event.modifiers.contains(Modifiers::ALT));
    }

    #[test]
    fn test_convert_key_states() {
        let cases = [
            (KeyEventKind::Press, KeyState::Press),
            (KeyEventKind::Repeat, KeyState::Repeat),
            (KeyEventKind::Release, KeyState::Release),
        ];

        for (kind, expected) in cases {
            let event =
                convert_key_event(crossterm_key(KeyCode::Char('a'), KeyModifiers::empty(), kind))
                    .unwrap();
            assert_eq!(event.state, expected);
        }
    }

    #[test]
    fn test_route_tab_cycles_focus() {
        let doc = Document::new();
        doc.create_input("a");
        doc.create_input("b");

        assert_eq!(route_key(&doc, &KeyboardEvent::new(Key::Tab)), Ok(true));
        assert_eq!(doc.focused().unwrap().id(), "a");

        route_key(&doc, &KeyboardEvent::new(Key::Tab)).unwrap();
        assert_eq!(doc.focused().unwrap().id(), "b");

        route_key(&doc, &KeyboardEvent::new(Key::BackTab)).unwrap();
        assert_eq!(doc.focused().unwrap().id(), "a");

        let shift_tab = KeyboardEvent::with_modifiers(Key::Tab, Modifiers::SHIFT);
        route_key(&doc, &shift_tab).unwrap();
        assert_eq!(doc.focused().unwrap().id(), "b");
    }

    #[test]
    fn test_route_edits_the_focused_element() {
        let doc = Document::new();
        doc.create_input("a");
        doc.create_input("b");
        doc.focus("b");

        route_key(&doc, &KeyboardEvent::char('x')).unwrap();

        assert_eq!(doc.get("b").unwrap().value(), "x");
        assert_eq!(doc.get("a").unwrap().value(), "");
    }

    #[test]
    fn test_route_without_focus_consumes_nothing() {
        let doc = Document::new();
        doc.create_input("a");

        assert_eq!(route_key(&doc, &KeyboardEvent::char('x')), Ok(false));
        assert_eq!(doc.get("a").unwrap().value(), "");
    }

    #[test]
    fn test_route_drops_release_events() {
        let doc = Document::new();
        doc.create_input("a");
        doc.focus("a");

        let mut event = KeyboardEvent::char('x');
        event.state = KeyState::Release;

        assert_eq!(route_key(&doc, &event), Ok(false));
        assert_eq!(doc.get("a").unwrap().value(), "");
    }
}
