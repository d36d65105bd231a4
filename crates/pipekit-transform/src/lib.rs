#![deny(missing_docs)]
//! Adapt plain functions to operate on named fields of a field map.
//!
//! Pipeline stages often exchange a single string-keyed map of named values
//! rather than long argument lists. [`FieldTransform`] wraps an arbitrary
//! function so it can be invoked against such a map: arguments are extracted
//! from the map according to an [`InKeys`] specifier, the function is called,
//! and its outputs are written back under the declared `out_keys`.
//!
//! ```
//! use pipekit_transform::{FieldMap, FieldTransform, FnArgs, FnOutput, TransformError};
//!
//! let add = |args: FnArgs<i64>| -> Result<FnOutput<i64>, TransformError> {
//!     match args {
//!         FnArgs::Positional(values) => Ok(FnOutput::Value(values.iter().sum())),
//!         FnArgs::Named(_) => unreachable!("constructed with positional in_keys"),
//!     }
//! };
//!
//! let transform = FieldTransform::new(add, ["lhs", "rhs"], ["sum"]);
//!
//! let mut fields = FieldMap::from([("lhs".to_string(), 1), ("rhs".to_string(), 2)]);
//! transform.apply_mut(&mut fields)?;
//! assert_eq!(fields["sum"], 3);
//! # Ok::<(), TransformError>(())
//! ```

/// Error types for the transform module.
pub mod error;

/// Field map transform implementation.
pub mod transform;

pub use crate::error::TransformError;
pub use crate::transform::{FieldMap, FieldTransform, FnArgs, FnOutput, InKeys};
