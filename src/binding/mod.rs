//! Binding Module - Named registry and two-way document wiring.
//!
//! The layer that connects the reactive primitives to the document:
//!
//! - **Registry / Handle** - Flat name→value mapping; entries are writable
//!   observables or read-only computeds behind one read/subscribe surface
//! - **bind / BindingSession** - One-shot scan-validate-wire pass over a
//!   document, returning the explicit session record
//!
//! Setup code registers values, marks elements with the `BIND_ATTR`
//! attribute, and calls `bind` once. Everything after that is event-driven.

mod registry;
mod session;

pub use registry::{Handle, Registry};
pub use session::{BIND_ATTR, BindingSession, bind};
