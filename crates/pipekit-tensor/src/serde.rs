use serde::ser::SerializeStruct;
use serde::Deserialize;

use crate::{ChannelSpec, ChannelTensor};

impl<C, T> serde::Serialize for ChannelTensor<C, T>
where
    C: ChannelSpec,
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Elements in logical (row-major) order, independent of layout.
        let data: Vec<&T> = self.as_array().iter().collect();
        let mut state = serializer.serialize_struct("ChannelTensor", 2)?;
        state.serialize_field("data", &data)?;
        state.serialize_field("shape", &self.as_array().shape().to_vec())?;
        state.end()
    }
}

impl<'de, C, T> serde::Deserialize<'de> for ChannelTensor<C, T>
where
    C: ChannelSpec,
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TensorData<T> {
            data: Vec<T>,
            shape: Vec<usize>,
        }

        let TensorData { data, shape } = TensorData::deserialize(deserializer)?;

        // Re-validates the channel count, so a tensor cannot round-trip into
        // a variant it does not fit.
        ChannelTensor::from_shape_vec(&shape, data).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::variants::Points3DTensor;
    use ndarray::array;

    #[test]
    fn test_serde() -> Result<(), Box<dyn std::error::Error>> {
        let points =
            Points3DTensor::<f32>::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn())?;
        let serialized = serde_json::to_string(&points)?;
        let deserialized: Points3DTensor<f32> = serde_json::from_str(&serialized)?;
        assert_eq!(deserialized, points);
        Ok(())
    }

    #[test]
    fn test_deserialize_wrong_channel_count() {
        let serialized = r#"{"data":[1.0,2.0],"shape":[1,2]}"#;
        let result: Result<Points3DTensor<f32>, _> = serde_json::from_str(serialized);
        assert!(result.is_err());
    }
}
