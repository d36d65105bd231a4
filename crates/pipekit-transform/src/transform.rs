use std::collections::HashMap;
use std::marker::PhantomData;

use crate::error::TransformError;

/// A string-keyed collection of named values passed between pipeline stages.
///
/// No schema is enforced beyond the keys referenced by a given transform.
pub type FieldMap<V> = HashMap<String, V>;

/// Specifies how a [`FieldTransform`] extracts arguments from a field map.
///
/// The three forms mirror the ways a plain function can be fed from named
/// fields: a single value, an ordered positional list, or a set of named
/// parameters bound from differently named source keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InKeys {
    /// One key, passed as a single positional argument.
    Single(String),
    /// Ordered keys, each looked up and passed positionally.
    Positional(Vec<String>),
    /// `(source key, target parameter name)` pairs; each source key is looked
    /// up and bound under the target name.
    Named(Vec<(String, String)>),
}

impl From<&str> for InKeys {
    fn from(key: &str) -> Self {
        InKeys::Single(key.to_string())
    }
}

impl From<String> for InKeys {
    fn from(key: String) -> Self {
        InKeys::Single(key)
    }
}

impl From<Vec<String>> for InKeys {
    fn from(keys: Vec<String>) -> Self {
        InKeys::Positional(keys)
    }
}

impl<const N: usize> From<[&str; N]> for InKeys {
    fn from(keys: [&str; N]) -> Self {
        InKeys::Positional(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl From<&[&str]> for InKeys {
    fn from(keys: &[&str]) -> Self {
        InKeys::Positional(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl From<Vec<(String, String)>> for InKeys {
    fn from(pairs: Vec<(String, String)>) -> Self {
        InKeys::Named(pairs)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for InKeys {
    fn from(pairs: [(&str, &str); N]) -> Self {
        InKeys::Named(
            pairs
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
        )
    }
}

/// Arguments handed to the wrapped function, as extracted from the field map.
///
/// Which variant arrives is determined by the transform's [`InKeys`] form:
/// [`InKeys::Single`] and [`InKeys::Positional`] produce
/// [`FnArgs::Positional`], [`InKeys::Named`] produces [`FnArgs::Named`] with
/// values bound under their target parameter names.
#[derive(Clone, Debug, PartialEq)]
pub enum FnArgs<V> {
    /// Values in `in_keys` order.
    Positional(Vec<V>),
    /// Values bound under their target parameter names.
    Named(FieldMap<V>),
}

/// The wrapped function's return value, before association with `out_keys`.
#[derive(Clone, Debug, PartialEq)]
pub enum FnOutput<V> {
    /// A single value, treated as a one-element tuple.
    Value(V),
    /// An ordered tuple of values, associated positionally with `out_keys`.
    Values(Vec<V>),
    /// A map; one value is extracted per `out_keys` name, extra keys are
    /// ignored.
    Map(FieldMap<V>),
}

/// Wraps a function so it can be invoked against a [`FieldMap`].
///
/// On invocation the transform extracts arguments from the map according to
/// its [`InKeys`] specifier, calls the function, normalizes the output into an
/// ordered tuple, and writes each `(out_key, value)` pair back into the map,
/// overwriting existing keys. The function returns one output per declared
/// `out_key`; a length mismatch is a [`TransformError::OutputArity`] error.
///
/// Two application forms cover the in-place and copying mutation policies:
/// [`apply_mut`](Self::apply_mut) updates the caller's map directly, while
/// [`apply`](Self::apply) clones the input first and leaves the original
/// untouched.
///
/// # Examples
///
/// ```
/// use pipekit_transform::{FieldMap, FieldTransform, FnArgs, FnOutput, TransformError};
///
/// // Bind fields "a" and "b" to parameters "x" and "y".
/// let add = |args: FnArgs<i64>| -> Result<FnOutput<i64>, TransformError> {
///     match args {
///         FnArgs::Named(named) => Ok(FnOutput::Value(named["x"] + named["y"])),
///         FnArgs::Positional(_) => unreachable!("constructed with named in_keys"),
///     }
/// };
/// let transform = FieldTransform::new(add, [("a", "x"), ("b", "y")], ["a"]);
///
/// let mut fields = FieldMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
/// transform.apply_mut(&mut fields)?;
/// assert_eq!(fields["a"], 3);
/// assert_eq!(fields["b"], 2);
/// # Ok::<(), TransformError>(())
/// ```
pub struct FieldTransform<V, F> {
    fun: F,
    in_keys: InKeys,
    out_keys: Vec<String>,
    _value: PhantomData<fn(V) -> V>,
}

impl<V, F> FieldTransform<V, F>
where
    V: Clone,
    F: Fn(FnArgs<V>) -> Result<FnOutput<V>, TransformError>,
{
    /// Create a new transform from a function, an `in_keys` specifier and the
    /// ordered output key names.
    pub fn new<I, K, S>(fun: F, in_keys: I, out_keys: K) -> Self
    where
        I: Into<InKeys>,
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fun,
            in_keys: in_keys.into(),
            out_keys: out_keys.into_iter().map(Into::into).collect(),
            _value: PhantomData,
        }
    }

    /// The extraction specifier this transform was built with.
    pub fn in_keys(&self) -> &InKeys {
        &self.in_keys
    }

    /// The ordered output key names this transform writes.
    pub fn out_keys(&self) -> &[String] {
        &self.out_keys
    }

    /// Invoke the wrapped function against the map, writing outputs back into
    /// the same map.
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing, if the function fails,
    /// or if the output count does not match `out_keys`. The map is not
    /// modified on error.
    pub fn apply_mut(&self, fields: &mut FieldMap<V>) -> Result<(), TransformError> {
        let outputs = self.evaluate(fields)?;
        fields.extend(outputs);
        Ok(())
    }

    /// Invoke the wrapped function against the map, returning an updated
    /// clone and leaving the original untouched.
    ///
    /// # Errors
    ///
    /// Same conditions as [`apply_mut`](Self::apply_mut).
    pub fn apply(&self, fields: &FieldMap<V>) -> Result<FieldMap<V>, TransformError> {
        let outputs = self.evaluate(fields)?;
        let mut result = fields.clone();
        result.extend(outputs);
        Ok(result)
    }

    /// Extract arguments, call the function and pair its outputs with
    /// `out_keys`.
    fn evaluate(&self, fields: &FieldMap<V>) -> Result<Vec<(String, V)>, TransformError> {
        let args = self.extract(fields)?;

        log::trace!(
            "applying field transform: in_keys={:?} out_keys={:?}",
            self.in_keys,
            self.out_keys
        );

        let values = match (self.fun)(args)? {
            FnOutput::Map(mut map) => self
                .out_keys
                .iter()
                .map(|key| {
                    map.remove(key)
                        .ok_or_else(|| TransformError::MissingOutputKey(key.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            FnOutput::Value(value) => vec![value],
            FnOutput::Values(values) => values,
        };

        if values.len() != self.out_keys.len() {
            return Err(TransformError::OutputArity {
                expected: self.out_keys.len(),
                actual: values.len(),
            });
        }

        Ok(self.out_keys.iter().cloned().zip(values).collect())
    }

    fn extract(&self, fields: &FieldMap<V>) -> Result<FnArgs<V>, TransformError> {
        let lookup = |key: &String| {
            fields
                .get(key)
                .cloned()
                .ok_or_else(|| TransformError::MissingKey(key.clone()))
        };

        match &self.in_keys {
            InKeys::Single(key) => Ok(FnArgs::Positional(vec![lookup(key)?])),
            InKeys::Positional(keys) => Ok(FnArgs::Positional(
                keys.iter().map(lookup).collect::<Result<Vec<_>, _>>()?,
            )),
            InKeys::Named(pairs) => {
                let mut named = FieldMap::with_capacity(pairs.len());
                for (source, target) in pairs {
                    named.insert(target.clone(), lookup(source)?);
                }
                Ok(FnArgs::Named(named))
            }
        }
    }
}
