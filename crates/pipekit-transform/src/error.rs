/// An error type for field map transforms.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    /// Error when a required input key is missing from the field map.
    #[error("key '{0}' not found in the input field map")]
    MissingKey(String),

    /// Error when a key named in `out_keys` is missing from the map returned
    /// by the wrapped function.
    #[error("key '{0}' missing from the map returned by the function")]
    MissingOutputKey(String),

    /// Error when the function returns a different number of outputs than
    /// `out_keys` declares.
    #[error("function returned {actual} outputs but {expected} out_keys were declared")]
    OutputArity {
        /// Number of `out_keys` declared on the transform.
        expected: usize,
        /// Number of outputs the function returned.
        actual: usize,
    },

    /// Error raised by the wrapped function, propagated to the caller.
    #[error("transform function failed: {0}")]
    Function(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransformError {
    /// Wrap an arbitrary error raised by the wrapped function.
    pub fn function(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Function(Box::new(err))
    }
}
