//! Reactive Layer - Observables and computed values.
//!
//! The two cooperating primitives the rest of the crate is built on:
//!
//! - **Observable** - Mutable value cell with change notification and an
//!   equality short-circuit on writes
//! - **Computed** - Derived read-only value, recomputed whenever a declared
//!   dependency notifies
//!
//! Everything is single-threaded and synchronous: a write runs every listener
//! to completion before it returns, in subscription order. There is no
//! batching, no deferral, and no unsubscription.

mod computed;
mod observable;

pub use computed::{Computed, Dependency, computed};
pub use observable::{Listener, Observable, observable};
