#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Three independent, uncoupled utilities, each usable standalone:
//!
//! - [`config`] — configuration record types mirroring constructor parameter
//!   lists, generated at compile time with `define_config!`.
//! - [`transform`] — adapt plain functions to operate on named fields of a
//!   field map.
//! - [`tensor`] — tensor wrappers with named, sliceable channels along the
//!   trailing dimension.

#[doc(inline)]
pub use pipekit_config as config;

#[doc(inline)]
pub use pipekit_tensor as tensor;

#[doc(inline)]
pub use pipekit_transform as transform;
