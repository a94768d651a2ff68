//! Crate error type.
//!
//! Every fallible seam in the binding layer reports through `BindError`.
//! Failures are synchronous and fatal to the call that triggered them; there
//! are no retries anywhere in the crate.

use thiserror::Error;

/// Errors reported by the binding layer and key routing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A keystroke-driven write reached a read-only (computed) binding.
    ///
    /// Binding a computed to an editable field is a caller configuration
    /// error; it surfaces here on the first keystroke rather than being
    /// guarded against at bind time.
    #[error("binding `{name}` is read-only")]
    ReadOnlyBinding { name: String },

    /// An element's bind attribute names a key absent from the registry.
    /// Reported at bind time, before any wiring happens.
    #[error("unknown binding `{name}`")]
    UnknownBinding { name: String },

    /// A second `bind` call on a document that already has a session.
    /// Re-binding would double-subscribe every bound element.
    #[error("document already has an active binding session")]
    AlreadyBound,
}
