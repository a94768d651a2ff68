//! # tether-tui
//!
//! Reactive two-way data binding for terminal forms.
//!
//! Two cooperating primitives, a mutable observable with change notification
//! and a derived read-only computed, plus a binding layer that keeps named
//! observables and text-input elements synchronized in both directions.
//!
//! ## Architecture
//!
//! ```text
//! key event → route_key → Element edit → input hook → Observable.set
//!                                                          │ notify
//!                                        Computed recompute ┤
//!                                     bound Element display ┘
//! ```
//!
//! Everything is single-threaded and synchronous: a write runs every
//! listener to completion, in subscription order, before returning to the
//! caller. Equal writes short-circuit (no mutation, no notification), which
//! is what keeps write-back echo from a bound element from cascading.
//!
//! ## Bootstrap
//!
//! ```
//! use tether_tui::binding::{BIND_ATTR, Registry, bind};
//! use tether_tui::document::Document;
//! use tether_tui::reactive::{computed, observable};
//!
//! // Values.
//! let first = observable("John".to_string());
//! let last = observable("Smith".to_string());
//! let full = computed(
//!     {
//!         let (first, last) = (first.clone(), last.clone());
//!         move || format!("{} {}", first.get(), last.get()).trim().to_string()
//!     },
//!     &[&first, &last],
//! );
//!
//! // Registry.
//! let mut registry = Registry::new();
//! registry.insert("firstName", first);
//! registry.insert("lastName", last);
//! registry.insert("fullName", full);
//!
//! // Document.
//! let doc = Document::new();
//! doc.create_input("first").set_attr(BIND_ATTR, "firstName");
//! doc.create_input("last").set_attr(BIND_ATTR, "lastName");
//!
//! // One bind call; event-driven from here on.
//! let session = bind(&doc, &registry).unwrap();
//! assert_eq!(session.len(), 2);
//! assert_eq!(doc.get("first").unwrap().value(), "John");
//! ```
//!
//! ## Modules
//!
//! - [`reactive`] - Observable and Computed primitives
//! - [`document`] - Element tree, focus, keystroke editing
//! - [`binding`] - Registry, one-shot bind, session record
//! - [`state`] - Key event model, crossterm bridge, routing

pub mod binding;
pub mod document;
pub mod error;
pub mod reactive;
pub mod state;

// Re-export the working surface.
pub use binding::{BIND_ATTR, BindingSession, Handle, Registry, bind};
pub use document::{Document, Element, ElementFlags};
pub use error::BindError;
pub use reactive::{Computed, Dependency, Observable, computed, observable};
pub use state::{Key, KeyState, KeyboardEvent, Modifiers, poll_key, read_key, route_key};
