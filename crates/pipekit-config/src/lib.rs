#![deny(missing_docs)]
//! Configuration record types mirroring constructor parameter lists.
//!
//! Training code usually wants the hyperparameters of a module captured in a
//! plain, serializable record that mirrors the module constructor: one field
//! per parameter, defaults preserved, nothing else. The [`define_config!`]
//! macro generates exactly that record at compile time from the parameter
//! list, replacing the run-time signature introspection such records are
//! derived with in dynamic languages.

/// Configuration record generation.
pub mod record;
