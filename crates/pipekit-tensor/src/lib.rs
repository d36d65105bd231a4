#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `pipekit-tensor` exposes named, sliceable "channels" along a tensor's last
//! dimension. A variant type declares an ordered list of channel names; every
//! [`ChannelTensor`] of that variant validates at construction time that its
//! trailing dimension matches the declared channel count, and each channel is
//! readable as a named view sharing the underlying storage.
//!
//! Tensor numerics themselves are delegated to [`ndarray`]; this crate only
//! layers the channel naming and validation on top.
//!
//! # Quick Start
//!
//! ```rust
//! use ndarray::array;
//! use pipekit_tensor::variants::{Boxes3D, Boxes3DChannels};
//! use pipekit_tensor::ChannelTensor;
//!
//! // One box: x, y, z, l, w, h, yaw.
//! let data = array![[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 0.5]].into_dyn();
//! let boxes = ChannelTensor::<Boxes3D, f32>::new(data)?;
//!
//! assert_eq!(boxes.x(), array![1.0f32].into_dyn());
//! assert_eq!(boxes.yaw(), array![0.5f32].into_dyn());
//!
//! // The dynamic path reports unknown names as errors.
//! assert!(boxes.channel("pitch").is_err());
//! # Ok::<(), pipekit_tensor::ChannelTensorError>(())
//! ```
//!
//! # Declaring a variant
//!
//! [`define_channel_tensor!`] declares a marker type carrying the channel
//! names plus an accessor trait with one method per channel, so unknown names
//! are rejected at compile time rather than through a run-time fallback:
//!
//! ```rust
//! use ndarray::array;
//! use pipekit_tensor::{define_channel_tensor, ChannelTensor};
//!
//! define_channel_tensor! {
//!     /// Per-point RGB colors.
//!     pub struct Colors;
//!     /// Named accessors for [`Colors`] tensors.
//!     pub trait ColorsChannels { r, g, b }
//! }
//!
//! let colors = ChannelTensor::<Colors, u8>::new(array![[255, 0, 0]].into_dyn())?;
//! assert_eq!(colors.g(), array![0u8].into_dyn());
//! # Ok::<(), pipekit_tensor::ChannelTensorError>(())
//! ```

/// Error types for the tensor module.
pub mod error;

/// Serde module for serialization and deserialization of channel tensors.
///
/// Enabled with the `serde` feature.
#[cfg(feature = "serde")]
pub mod serde;

/// Channel tensor implementation and variant declaration macro.
pub mod tensor;

/// Pre-declared channel tensor variants.
pub mod variants;

pub use crate::error::ChannelTensorError;
pub use crate::tensor::{ChannelSpec, ChannelTensor};

/// Re-export of the backing tensor library, used by generated accessors.
pub use ndarray;
