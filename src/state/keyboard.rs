//! Keyboard Module - Key event model.
//!
//! Crate-owned keyboard event types. The crossterm bridge in the input
//! module converts terminal events into these; nothing outside that module
//! touches crossterm types.
//!
//! # API
//!
//! - `Key` - Character and named keys
//! - `Modifiers` - Ctrl/Alt/Shift/Meta flags
//! - `KeyState` - Press/Repeat/Release
//! - `KeyboardEvent` - One keystroke, with constructors for tests and callers

use bitflags::bitflags;

// =============================================================================
// KEY
// =============================================================================

/// A key identity: a printable character or a named key.
///
/// Only the keys the editing and focus layers act on are modeled; anything
/// else the terminal reports is dropped at conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Printable character.
    Char(char),
    Enter,
    Tab,
    /// Shift+Tab as reported by the terminal.
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Escape,
}

// =============================================================================
// MODIFIERS
// =============================================================================

bitflags! {
    /// Keyboard modifier state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const CTRL  = 1 << 0;
        const ALT   = 1 << 1;
        const SHIFT = 1 << 2;
        const META  = 1 << 3;
    }
}

// =============================================================================
// KEY STATE
// =============================================================================

/// Press/repeat/release state of a key event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

// =============================================================================
// KEYBOARD EVENT
// =============================================================================

/// One keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A plain key press with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            state: KeyState::Press,
        }
    }

    /// A key press with modifiers.
    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            state: KeyState::Press,
        }
    }

    /// A printable character press. Shorthand for the common test case.
    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    /// True when this is a press or repeat (the states editing acts on).
    pub fn is_active(&self) -> bool {
        matches!(self.state, KeyState::Press | KeyState::Repeat)
    }
}

// =============================================================================
// TESTS
// =============================================================================
