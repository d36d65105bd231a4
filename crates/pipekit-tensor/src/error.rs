/// An error type for channel tensor operations.
#[derive(thiserror::Error, Debug)]
pub enum ChannelTensorError {
    /// Error when the trailing dimension does not match the declared channel
    /// count.
    #[error("tensor shape {shape:?} does not match number of channels {expected}")]
    ChannelMismatch {
        /// Actual shape of the tensor.
        shape: Vec<usize>,
        /// Channel count declared by the variant.
        expected: usize,
    },

    /// Error when a channel name is not declared by the variant.
    #[error("'{type_name}' has no channel named '{name}'")]
    UnknownChannel {
        /// The variant type the lookup was performed on.
        type_name: &'static str,
        /// The requested channel name.
        name: String,
    },

    /// Error when a channel index is out of bounds.
    #[error("channel index {0} out of bounds for {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the shape is not valid for the provided data.
    #[error("invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),

    /// Error when an element cannot be converted to the target type.
    #[error("cannot cast element to {0}")]
    CastError(String),
}
