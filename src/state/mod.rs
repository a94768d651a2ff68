//! State Module - Keyboard events and terminal input.
//!
//! - **Keyboard** - Crate-owned key event types
//! - **Input** - Crossterm bridge (conversion, polling) and key routing into
//!   a document

mod input;
pub(crate) mod keyboard;

pub use input::{convert_key_event, poll_key, read_key, route_key};
pub use keyboard::{Key, KeyState, KeyboardEvent, Modifiers};
