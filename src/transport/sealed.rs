//! Sealed trait marker for Transport implementations.
//!
//! This module prevents external implementations of the `Transport` trait,
//! keeping the request-normalization contract (auth injection, body encoding,
//! JSON-or-text fallback) under this crate's control.

pub(crate) mod private {
    /// Sealed trait marker.
    ///
    /// This trait cannot be implemented outside this crate.
    pub trait Sealed {}
}
