use crate::{define_channel_tensor, ChannelTensor};

define_channel_tensor! {
    /// 2D points with `x`, `y` channels.
    pub struct Points2D;
    /// Named accessors for [`Points2D`] tensors.
    pub trait Points2DChannels { x, y }
}

define_channel_tensor! {
    /// 3D points with `x`, `y`, `z` channels.
    pub struct Points3D;
    /// Named accessors for [`Points3D`] tensors.
    pub trait Points3DChannels { x, y, z }
}

define_channel_tensor! {
    /// 3D bounding boxes: center position, extents and heading.
    pub struct Boxes3D;
    /// Named accessors for [`Boxes3D`] tensors.
    pub trait Boxes3DChannels { x, y, z, l, w, h, yaw }
}

/// Type alias for a [`Points2D`] channel tensor.
pub type Points2DTensor<T> = ChannelTensor<Points2D, T>;

/// Type alias for a [`Points3D`] channel tensor.
pub type Points3DTensor<T> = ChannelTensor<Points3D, T>;

/// Type alias for a [`Boxes3D`] channel tensor.
pub type Boxes3DTensor<T> = ChannelTensor<Boxes3D, T>;
