use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a runtime value in the executing program.
///
/// Stable for the value's lifetime as observed by the backend. The frontend
/// never interprets it beyond equality and display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Short descriptor of a child value: its identity plus a display repr.
///
/// Used for sequence elements, mapping entries, and attribute values so that
/// grids can show reprs without fetching full info for every child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSummary {
    /// Identity of the child value
    pub id: ObjectId,
    /// Display repr of the child value
    pub repr: String,
}

impl ValueSummary {
    /// Create a new value summary
    pub fn new(id: ObjectId, repr: impl Into<String>) -> Self {
        Self { id, repr: repr.into() }
    }
}

/// Structured metadata snapshot of one runtime value.
///
/// The record is variable in shape: the optional fields below are present or
/// absent depending on the kind of object, and their presence is what the
/// type-specific inspector views dispatch on. `id`, `repr`, `type` and
/// `type_id` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Identity of the inspected value
    pub id: ObjectId,
    /// Display repr of the value
    pub repr: String,
    /// Type name (e.g. `str`, `list`, `TextIOWrapper`)
    #[serde(rename = "type")]
    pub type_name: String,
    /// Identity of the value's type object
    pub type_id: ObjectId,

    /// Full content of a file-like object. Absent on a backend-side read
    /// error even when the object is file-like (see `file_error`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
    /// Backend-side error message when reading a file-like object failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_error: Option<String>,
    /// Read position of a file-like object, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_tell: Option<usize>,
    /// Text encoding of a file-like object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_encoding: Option<String>,

    /// Source code of a callable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Raw content of a string object. Preferred over round-tripping the
    /// repr, which is fragile for strings with unusual escapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_content: Option<String>,

    /// Ordered child descriptors of a sequence (list, tuple, set, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ValueSummary>>,

    /// Ordered key/value descriptor pairs of a mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<(ValueSummary, ValueSummary)>>,

    /// Whether the object is a DataFrame-style table
    #[serde(rename = "is_DataFrame", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_data_frame: bool,
    /// Column names of a tabular object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Row index labels of a tabular object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Vec<String>>,
    /// Cell values of a tabular object, row-major
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<String>>>,
    /// Total row count of a tabular object (may exceed `values.len()`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,

    /// Encoded image payload (base64)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,

    /// Named attributes, populated only when attribute detail was requested
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, ValueSummary>,
}

impl ObjectInfo {
    /// Create an info record carrying only the always-present fields
    pub fn new(
        id: ObjectId,
        repr: impl Into<String>,
        type_name: impl Into<String>,
        type_id: ObjectId,
    ) -> Self {
        Self {
            id,
            repr: repr.into(),
            type_name: type_name.into(),
            type_id,
            file_content: None,
            file_error: None,
            file_tell: None,
            file_encoding: None,
            source: None,
            string_content: None,
            elements: None,
            entries: None,
            is_data_frame: false,
            columns: None,
            index: None,
            values: None,
            row_count: None,
            image_data: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Minimal record used when the backend could not resolve the id
    pub fn unresolved(id: ObjectId) -> Self {
        Self::new(id, "", "", id)
    }

    /// Whether the object claims to be file-like (content present or a
    /// read error reported)
    pub fn is_file_like(&self) -> bool {
        self.file_content.is_some() || self.file_error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_display_is_hex() {
        assert_eq!(ObjectId(0x1f4).to_string(), "0x1f4");
    }

    #[test]
    fn optional_fields_are_omitted_on_the_wire() {
        let info = ObjectInfo::new(ObjectId(5), "'hi'", "str", ObjectId(1));
        let json = serde_json::to_value(&info).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert_eq!(obj["id"], 5);
        assert_eq!(obj["type"], "str");
        assert!(!obj.contains_key("elements"));
        assert!(!obj.contains_key("is_DataFrame"));
        assert!(!obj.contains_key("attributes"));
    }

    #[test]
    fn data_frame_keeps_original_key_spelling() {
        let mut info = ObjectInfo::new(ObjectId(9), "<df>", "DataFrame", ObjectId(2));
        info.is_data_frame = true;
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["is_DataFrame"], true);

        let back: ObjectInfo = serde_json::from_value(json).unwrap();
        assert!(back.is_data_frame);
    }

    #[test]
    fn round_trips_variable_shape() {
        let mut info = ObjectInfo::new(ObjectId(7), "[1, 2]", "list", ObjectId(3));
        info.elements = Some(vec![
            ValueSummary::new(ObjectId(10), "1"),
            ValueSummary::new(ObjectId(11), "2"),
        ]);
        info.attributes.insert("count".into(), ValueSummary::new(ObjectId(12), "<method>"));

        let json = serde_json::to_string(&info).unwrap();
        let back: ObjectInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
