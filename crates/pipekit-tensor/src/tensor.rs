use std::marker::PhantomData;
use std::ops;

use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Axis, IxDyn};

use crate::error::ChannelTensorError;

/// Channel metadata shared by every tensor of a variant.
///
/// Implementations are normally generated with [`define_channel_tensor!`],
/// which fixes the ordered channel name list at declaration time; the list is
/// process-wide, set once and read-only thereafter.
///
/// [`define_channel_tensor!`]: crate::define_channel_tensor
pub trait ChannelSpec {
    /// Ordered channel names; a name's position is its index along the
    /// trailing axis.
    const NAMES: &'static [&'static str];

    /// Number of declared channels.
    fn num_channels() -> usize {
        Self::NAMES.len()
    }

    /// Position of `name` in the declared list, if declared.
    fn index_of(name: &str) -> Option<usize> {
        Self::NAMES.iter().position(|&n| n == name)
    }
}

/// A tensor whose trailing dimension carries named channels.
///
/// The tensor wraps an [`ndarray::ArrayD`] without copying; the variant type
/// `C` contributes only compile-time metadata. Construction validates that the
/// size of the trailing dimension equals the variant's declared channel count.
///
/// The full tensor API of the wrapped array is available through `Deref`, so a
/// `ChannelTensor` can be used wherever a plain array view of the data is
/// needed.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use pipekit_tensor::variants::Points3D;
/// use pipekit_tensor::ChannelTensor;
///
/// let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
/// let points = ChannelTensor::<Points3D, f32>::new(data)?;
///
/// assert_eq!(points.num_channels(), 3);
/// assert_eq!(points.channel("y")?, array![2.0f32, 5.0].into_dyn());
/// # Ok::<(), pipekit_tensor::ChannelTensorError>(())
/// ```
pub struct ChannelTensor<C: ChannelSpec, T> {
    data: ArrayD<T>,
    _channels: PhantomData<C>,
}

impl<C: ChannelSpec, T> ChannelTensor<C, T> {
    /// Create a new channel tensor from an array.
    ///
    /// The array is taken by value and wrapped without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelTensorError::ChannelMismatch`] if the size of the
    /// array's trailing dimension does not equal the variant's declared
    /// channel count.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndarray::array;
    /// use pipekit_tensor::variants::Points2D;
    /// use pipekit_tensor::ChannelTensor;
    ///
    /// let points = ChannelTensor::<Points2D, i32>::new(array![[3, 4]].into_dyn())?;
    /// assert_eq!(points.shape(), &[1, 2]);
    ///
    /// // Trailing dimension of 3 does not match the two declared channels.
    /// assert!(ChannelTensor::<Points2D, i32>::new(array![[1, 2, 3]].into_dyn()).is_err());
    /// # Ok::<(), pipekit_tensor::ChannelTensorError>(())
    /// ```
    pub fn new(data: ArrayD<T>) -> Result<Self, ChannelTensorError> {
        let expected = C::NAMES.len();
        if data.shape().last() != Some(&expected) {
            return Err(ChannelTensorError::ChannelMismatch {
                shape: data.shape().to_vec(),
                expected,
            });
        }
        Ok(Self {
            data,
            _channels: PhantomData,
        })
    }

    /// Create a new channel tensor with the given shape and data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the shape, or if
    /// the trailing dimension does not match the declared channel count.
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, ChannelTensorError> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Self::new(array)
    }

    /// The ordered channel names declared by the variant.
    pub fn channel_names(&self) -> &'static [&'static str] {
        C::NAMES
    }

    /// Number of channels declared by the variant.
    pub fn num_channels(&self) -> usize {
        C::NAMES.len()
    }

    /// View of the channel named `name`, selecting its index along the
    /// trailing axis.
    ///
    /// The view shares the underlying storage with the parent tensor, so
    /// in-place mutation of that slice region is visible through both.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelTensorError::UnknownChannel`] naming the variant type
    /// and the requested channel if `name` is not declared.
    pub fn channel(&self, name: &str) -> Result<ArrayViewD<'_, T>, ChannelTensorError> {
        Ok(self.data.index_axis(self.trailing_axis(), self.lookup(name)?))
    }

    /// Mutable view of the channel named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelTensorError::UnknownChannel`] if `name` is not
    /// declared.
    pub fn channel_mut(&mut self, name: &str) -> Result<ArrayViewMutD<'_, T>, ChannelTensorError> {
        let index = self.lookup(name)?;
        Ok(self.data.index_axis_mut(self.trailing_axis(), index))
    }

    /// View of the channel at `index` along the trailing axis.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelTensorError::ChannelIndexOutOfBounds`] if `index` is
    /// not below the declared channel count.
    pub fn channel_at(&self, index: usize) -> Result<ArrayViewD<'_, T>, ChannelTensorError> {
        if index >= C::NAMES.len() {
            return Err(ChannelTensorError::ChannelIndexOutOfBounds(
                index,
                C::NAMES.len(),
            ));
        }
        Ok(self.data.index_axis(self.trailing_axis(), index))
    }

    /// Mutable view of the channel at `index` along the trailing axis.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelTensorError::ChannelIndexOutOfBounds`] if `index` is
    /// not below the declared channel count.
    pub fn channel_at_mut(
        &mut self,
        index: usize,
    ) -> Result<ArrayViewMutD<'_, T>, ChannelTensorError> {
        if index >= C::NAMES.len() {
            return Err(ChannelTensorError::ChannelIndexOutOfBounds(
                index,
                C::NAMES.len(),
            ));
        }
        let axis = self.trailing_axis();
        Ok(self.data.index_axis_mut(axis, index))
    }

    /// View of the channel at `index`, without checking the index.
    ///
    /// This is the accessor used by the methods [`define_channel_tensor!`]
    /// generates, where the index is known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the declared channel count.
    ///
    /// [`define_channel_tensor!`]: crate::define_channel_tensor
    pub fn channel_view(&self, index: usize) -> ArrayViewD<'_, T> {
        self.data.index_axis(self.trailing_axis(), index)
    }

    /// Get a reference to the underlying array.
    pub fn as_array(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array.
    pub fn as_array_mut(&mut self) -> &mut ArrayD<T> {
        &mut self.data
    }

    /// Unwrap into the underlying array.
    pub fn into_inner(self) -> ArrayD<T> {
        self.data
    }

    /// Cast the elements of the tensor to a different type.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelTensorError::CastError`] if a value cannot be
    /// represented in the target type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndarray::array;
    /// use pipekit_tensor::variants::Points2D;
    /// use pipekit_tensor::ChannelTensor;
    ///
    /// let points = ChannelTensor::<Points2D, u8>::new(array![[3, 4]].into_dyn())?;
    /// let points = points.cast::<f32>()?;
    /// assert_eq!(points.channel("x")?, array![3.0f32].into_dyn());
    /// # Ok::<(), pipekit_tensor::ChannelTensorError>(())
    /// ```
    pub fn cast<U>(&self) -> Result<ChannelTensor<C, U>, ChannelTensorError>
    where
        T: Copy + num_traits::NumCast,
        U: num_traits::NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&x| {
                U::from(x).ok_or_else(|| {
                    ChannelTensorError::CastError(std::any::type_name::<U>().to_string())
                })
            })
            .collect::<Result<Vec<U>, ChannelTensorError>>()?;
        let array = ArrayD::from_shape_vec(self.data.raw_dim(), data)?;
        Ok(ChannelTensor {
            data: array,
            _channels: PhantomData,
        })
    }

    fn lookup(&self, name: &str) -> Result<usize, ChannelTensorError> {
        C::index_of(name).ok_or_else(|| ChannelTensorError::UnknownChannel {
            type_name: std::any::type_name::<C>(),
            name: name.to_string(),
        })
    }

    fn trailing_axis(&self) -> Axis {
        Axis(self.data.ndim() - 1)
    }
}

impl<C: ChannelSpec, T> TryFrom<ArrayD<T>> for ChannelTensor<C, T> {
    type Error = ChannelTensorError;

    fn try_from(array: ArrayD<T>) -> Result<Self, Self::Error> {
        Self::new(array)
    }
}

/// helper to deference the inner array
impl<C: ChannelSpec, T> ops::Deref for ChannelTensor<C, T> {
    type Target = ArrayD<T>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// helper to deference the inner array
impl<C: ChannelSpec, T> ops::DerefMut for ChannelTensor<C, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<C: ChannelSpec, T> Clone for ChannelTensor<C, T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            _channels: PhantomData,
        }
    }
}

impl<C: ChannelSpec, T> std::fmt::Debug for ChannelTensor<C, T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelTensor")
            .field("channels", &C::NAMES)
            .field("data", &self.data)
            .finish()
    }
}

impl<C: ChannelSpec, T: PartialEq> PartialEq for ChannelTensor<C, T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// Declare a channel tensor variant.
///
/// Takes a marker struct declaration and an accessor trait declaration whose
/// body lists the ordered channel names. The macro generates:
///
/// - the marker struct, implementing [`ChannelSpec`] with the declared names;
/// - the accessor trait with one method per channel, implemented for
///   [`ChannelTensor`] of that variant, each returning the channel's view
///   along the trailing axis.
///
/// Unknown channel names are thereby rejected at compile time; the dynamic
/// [`ChannelTensor::channel`] path remains available for run-time lookups.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use pipekit_tensor::{define_channel_tensor, ChannelTensor};
///
/// define_channel_tensor! {
///     /// 2D velocity vectors.
///     pub struct Velocities2D;
///     /// Named accessors for [`Velocities2D`] tensors.
///     pub trait Velocities2DChannels { vx, vy }
/// }
///
/// let v = ChannelTensor::<Velocities2D, f64>::new(array![[0.5, -1.5]].into_dyn())?;
/// assert_eq!(v.vy(), array![-1.5].into_dyn());
/// # Ok::<(), pipekit_tensor::ChannelTensorError>(())
/// ```
#[macro_export]
macro_rules! define_channel_tensor {
    (
        $(#[$smeta:meta])*
        $svis:vis struct $name:ident;
        $(#[$tmeta:meta])*
        $tvis:vis trait $accessors:ident { $($channel:ident),+ $(,)? }
    ) => {
        $(#[$smeta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $svis struct $name;

        impl $crate::ChannelSpec for $name {
            const NAMES: &'static [&'static str] = &[$(stringify!($channel)),+];
        }

        $(#[$tmeta])*
        $tvis trait $accessors<T> {
            $crate::define_channel_tensor!(@trait_methods $($channel),+);
        }

        impl<T> $accessors<T> for $crate::ChannelTensor<$name, T> {
            $crate::define_channel_tensor!(@impl_methods [0usize] $($channel),+);
        }
    };

    (@trait_methods $channel:ident $(, $rest:ident)*) => {
        #[doc = concat!("View of the `", stringify!($channel), "` channel along the trailing axis.")]
        fn $channel(&self) -> $crate::ndarray::ArrayViewD<'_, T>;

        $crate::define_channel_tensor!(@trait_methods $($rest),*);
    };
    (@trait_methods) => {};

    (@impl_methods [$index:expr] $channel:ident $(, $rest:ident)*) => {
        fn $channel(&self) -> $crate::ndarray::ArrayViewD<'_, T> {
            self.channel_view($index)
        }

        $crate::define_channel_tensor!(@impl_methods [$index + 1usize] $($rest),*);
    };
    (@impl_methods [$index:expr]) => {};
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    define_channel_tensor! {
        /// Test variant with three channels.
        pub struct Xyz;
        /// Named accessors for [`Xyz`] tensors.
        pub trait XyzChannels { x, y, z }
    }

    #[test]
    fn spec_metadata() {
        assert_eq!(Xyz::NAMES, &["x", "y", "z"]);
        assert_eq!(Xyz::num_channels(), 3);
        assert_eq!(Xyz::index_of("y"), Some(1));
        assert_eq!(Xyz::index_of("w"), None);
    }

    #[test]
    fn construct_with_matching_trailing_dim() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, i32>::new(array![[1, 2, 3], [4, 5, 6]].into_dyn())?;
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.channel_names(), &["x", "y", "z"]);
        Ok(())
    }

    #[test]
    fn construct_with_wrong_trailing_dim() {
        let err = ChannelTensor::<Xyz, i32>::new(array![[1, 2], [3, 4]].into_dyn()).unwrap_err();
        assert!(matches!(
            err,
            ChannelTensorError::ChannelMismatch {
                ref shape,
                expected: 3,
            } if shape == &[2, 2]
        ));
    }

    #[test]
    fn construct_zero_dimensional() {
        // A 0-d array has no trailing dimension at all.
        let scalar = ndarray::arr0(1).into_dyn();
        let err = ChannelTensor::<Xyz, i32>::new(scalar).unwrap_err();
        assert!(matches!(
            err,
            ChannelTensorError::ChannelMismatch { ref shape, .. } if shape.is_empty()
        ));
    }

    #[test]
    fn from_shape_vec_validates_both_ways() {
        // Wrong element count for the shape.
        assert!(matches!(
            ChannelTensor::<Xyz, i32>::from_shape_vec(&[2, 3], vec![1, 2, 3, 4]).unwrap_err(),
            ChannelTensorError::InvalidShape(_)
        ));
        // Wrong trailing dimension.
        assert!(matches!(
            ChannelTensor::<Xyz, i32>::from_shape_vec(&[3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap_err(),
            ChannelTensorError::ChannelMismatch { .. }
        ));
    }

    #[test]
    fn named_channels_match_trailing_slices() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, i32>::new(array![[1, 2, 3], [4, 5, 6]].into_dyn())?;
        assert_eq!(t.channel("x")?, array![1, 4].into_dyn());
        assert_eq!(t.channel("y")?, array![2, 5].into_dyn());
        assert_eq!(t.channel("z")?, array![3, 6].into_dyn());
        assert_eq!(t.channel("x")?, t.channel_at(0)?);
        Ok(())
    }

    #[test]
    fn generated_accessors() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, i32>::new(array![[1, 2, 3], [4, 5, 6]].into_dyn())?;
        assert_eq!(t.x(), t.channel("x")?);
        assert_eq!(t.y(), t.channel("y")?);
        assert_eq!(t.z(), t.channel("z")?);
        Ok(())
    }

    #[test]
    fn unknown_channel() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, i32>::new(array![[1, 2, 3]].into_dyn())?;
        let err = t.channel("w").unwrap_err();
        assert!(matches!(
            &err,
            ChannelTensorError::UnknownChannel { type_name, name }
                if type_name.ends_with("Xyz") && name == "w"
        ));
        Ok(())
    }

    #[test]
    fn channel_index_out_of_bounds() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, i32>::new(array![[1, 2, 3]].into_dyn())?;
        assert!(matches!(
            t.channel_at(3).unwrap_err(),
            ChannelTensorError::ChannelIndexOutOfBounds(3, 3)
        ));
        Ok(())
    }

    #[test]
    fn channel_mutation_shares_storage() -> Result<(), ChannelTensorError> {
        let mut t = ChannelTensor::<Xyz, i32>::new(array![[1, 2, 3], [4, 5, 6]].into_dyn())?;

        // Mutating through the named view is visible through the parent.
        t.channel_mut("y")?.fill(0);
        assert_eq!(t.as_array(), &array![[1, 0, 3], [4, 0, 6]].into_dyn());

        // Mutating through the parent is visible through the named view.
        t.as_array_mut()[[0, 2]] = 9;
        assert_eq!(t.channel("z")?, array![9, 6].into_dyn());
        Ok(())
    }

    #[test]
    fn deref_exposes_array_api() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, f32>::new(array![[1.0, 2.0, 3.0]].into_dyn())?;
        assert_eq!(t.ndim(), 2);
        approx::assert_relative_eq!(t.sum(), 6.0f32);
        Ok(())
    }

    #[test]
    fn cast_preserves_shape_and_channels() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, u8>::new(array![[1, 2, 3]].into_dyn())?;
        let f = t.cast::<f64>()?;
        assert_eq!(f.shape(), &[1, 3]);
        assert_eq!(f.channel("z")?, array![3.0].into_dyn());
        Ok(())
    }

    #[test]
    fn cast_out_of_range_fails() -> Result<(), ChannelTensorError> {
        let t = ChannelTensor::<Xyz, i32>::new(array![[-1, 0, 1]].into_dyn())?;
        assert!(matches!(
            t.cast::<u8>().unwrap_err(),
            ChannelTensorError::CastError(_)
        ));
        Ok(())
    }

    #[test]
    fn try_from_array() {
        let ok: Result<ChannelTensor<Xyz, i32>, _> = array![[1, 2, 3]].into_dyn().try_into();
        assert!(ok.is_ok());
        let err: Result<ChannelTensor<Xyz, i32>, _> = array![[1, 2]].into_dyn().try_into();
        assert!(err.is_err());
    }
}
