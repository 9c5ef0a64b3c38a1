//! JSON conversion through the element type's serde capabilities

use crate::Array;
use polyseq_types::{Capability, Result, TypeDescriptor, dispatch};
use serde::{Serialize, Serializer, ser::SerializeSeq};
use serde_json::Value;

/// Serializes as a sequence, every element through its `to_json` capability.
impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.iter() {
            let value = dispatch::to_json(element).map_err(serde::ser::Error::custom)?;
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

impl Array {
    /// Encodes the array as a JSON array.
    pub fn to_json(&self) -> Result<Value> {
        self.iter()
            .map(dispatch::to_json)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    /// Decodes a JSON array into a new array of `element_type`.
    ///
    /// ```
    /// use polyseq::Array;
    /// use polyseq::builtin::INT;
    ///
    /// let a = Array::from_json(&INT, &serde_json::json!([3, 1, 2]))?;
    /// assert!(a.equals(&[3i64, 1, 2])?);
    /// assert_eq!(a.to_json()?, serde_json::json!([3, 1, 2]));
    /// # Ok::<(), polyseq::Error>(())
    /// ```
    pub fn from_json(element_type: &'static TypeDescriptor, value: &Value) -> Result<Self> {
        dispatch::require(element_type, Capability::Deserialize)?;
        let items = value.as_array().ok_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom(format!(
                "expected a JSON array of {element_type}"
            ))
        })?;

        let mut array = Array::new(element_type);
        array.reserve_exact(items.len())?;
        for item in items {
            let decode = |dst| unsafe { dispatch::from_json(element_type, item, dst) };
            unsafe { array.emplace(decode)? };
        }
        tracing::debug!(
            element_type = element_type.name(),
            len = array.len(),
            "decoded array from JSON"
        );
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyseq_types::{Error, builtin::STRING};
    use serde_json::json;

    #[test]
    fn test_round_trip_strings() {
        let a = Array::from_json(&STRING, &json!(["a", "b"])).unwrap();
        assert_eq!(a.capacity(), 2);
        assert_eq!(a.get_as::<String>(1).unwrap(), "b");
        assert_eq!(serde_json::to_value(&a).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_nested_serialize() {
        let inner = Array::from_slice(&[1i64, 2]).unwrap();
        let mut outer = Array::of::<Array>();
        outer.push(&inner).unwrap();
        outer.push(&inner).unwrap();
        assert_eq!(outer.to_json().unwrap(), json!([[1, 2], [1, 2]]));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Array::from_json(&STRING, &json!({"a": 1})),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            Array::from_json(&STRING, &json!(["ok", 3])),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            Array::from_json(&crate::ARRAY, &json!([])),
            Err(Error::MissingCapability { .. })
        ));
    }
}
