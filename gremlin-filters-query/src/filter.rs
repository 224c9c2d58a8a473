//! Filter types for building Gremlin property matches.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{QueryError, QueryResult};

/// A member of a graph enumeration, carried as a filter value.
///
/// Enum values are rendered through their variant name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Full type name of the enumeration.
    pub type_name: Cow<'static, str>,
    /// Variant name, used as the text representation.
    pub name: Cow<'static, str>,
    /// Underlying discriminant.
    pub discriminant: i64,
}

impl EnumValue {
    /// Create a new enum value.
    pub fn new(
        type_name: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        discriminant: i64,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            discriminant,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A value whose type has no rendering template.
///
/// Kept around so the renderer can name the offending type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedValue {
    /// Full type name of the original value.
    pub type_name: Cow<'static, str>,
    /// Text form of the original value.
    pub display: String,
}

/// A filter value that can be used in an equality match.
///
/// Serialized as plain JSON where the value is unambiguous (`null`, a 32-bit
/// integer, a string). `Int64`, `Enum` and `Unsupported` are written as
/// one-key objects (`{"int64": 5}`, `{"enum": {..}}`, `{"unsupported": {..}}`)
/// so they read back unchanged. Any other input follows the
/// `From<serde_json::Value>` rules, so floats and booleans become
/// `Unsupported`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// 32-bit integer value.
    Int32(i32),
    /// 64-bit integer value.
    Int64(i64),
    /// Text value.
    String(String),
    /// Enumeration member.
    Enum(EnumValue),
    /// Value of a type that cannot be rendered.
    Unsupported(UnsupportedValue),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Wrap an arbitrary displayable value as unsupported, recording its type.
    pub fn unsupported<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::Unsupported(UnsupportedValue {
            type_name: Cow::Borrowed(std::any::type_name::<T>()),
            display: value.to_string(),
        })
    }

    /// Full type name of the value, `null` for [`FilterValue::Null`].
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Int32(_) => std::any::type_name::<i32>(),
            Self::Int64(_) => std::any::type_name::<i64>(),
            Self::String(_) => std::any::type_name::<String>(),
            Self::Enum(e) => e.type_name.as_ref(),
            Self::Unsupported(u) => u.type_name.as_ref(),
        }
    }

    /// Replace enum members by their text representation.
    pub fn normalized(&self) -> Self {
        match self {
            Self::Enum(e) => Self::String(e.name.to_string()),
            other => other.clone(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int32(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Enum(e) => write!(f, "{}", e),
            Self::Unsupported(u) => f.write_str(&u.display),
        }
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<EnumValue> for FilterValue {
    fn from(v: EnumValue) -> Self {
        Self::Enum(v)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

macro_rules! impl_unsupported_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(v: $ty) -> Self {
                    Self::unsupported(&v)
                }
            }
        )+
    };
}

impl_unsupported_from!(bool, f32, f64, i8, i16, i128, u8, u16, u32, u64, u128, char);

impl From<serde_json::Value> for FilterValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;

        match v {
            Value::Null => Self::Null,
            Value::String(s) => Self::String(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Self::Int32(small),
                        Err(_) => Self::Int64(i),
                    }
                } else if let Some(u) = n.as_u64() {
                    Self::unsupported(&u)
                } else {
                    match n.as_f64() {
                        Some(f) => Self::unsupported(&f),
                        None => Self::unsupported(&n),
                    }
                }
            }
            Value::Bool(b) => Self::unsupported(&b),
            other @ (Value::Array(_) | Value::Object(_)) => Self::unsupported(&other),
        }
    }
}

const INT64_TAG: &str = "int64";
const ENUM_TAG: &str = "enum";
const UNSUPPORTED_TAG: &str = "unsupported";

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Int32(v) => serializer.serialize_i32(*v),
            Self::Int64(v) => serializer.serialize_newtype_variant("FilterValue", 2, INT64_TAG, v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Enum(e) => serializer.serialize_newtype_variant("FilterValue", 4, ENUM_TAG, e),
            Self::Unsupported(u) => {
                serializer.serialize_newtype_variant("FilterValue", 5, UNSUPPORTED_TAG, u)
            }
        }
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        let tagged = match &value {
            Value::Object(map) if map.len() == 1 => {
                map.iter().next().map(|(tag, inner)| (tag.as_str(), inner))
            }
            _ => None,
        };

        let decoded = match tagged {
            Some((INT64_TAG, inner)) => Some(i64::deserialize(inner).map(Self::Int64)),
            Some((ENUM_TAG, inner)) => Some(EnumValue::deserialize(inner).map(Self::Enum)),
            Some((UNSUPPORTED_TAG, inner)) => {
                Some(UnsupportedValue::deserialize(inner).map(Self::Unsupported))
            }
            _ => None,
        };

        match decoded {
            Some(result) => result.map_err(D::Error::custom),
            None => Ok(Self::from(value)),
        }
    }
}

/// A single named-property equality filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Name of the property to match.
    pub property_name: String,
    /// Expected value.
    pub value: FilterValue,
}

impl Filter {
    /// Create a new filter.
    pub fn new(property_name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            property_name: property_name.into(),
            value: value.into(),
        }
    }

    /// Create a filter matching a null property.
    pub fn null(property_name: impl Into<String>) -> Self {
        Self::new(property_name, FilterValue::Null)
    }

    /// Copy of this filter with enum values replaced by their text form.
    pub fn normalized(&self) -> Self {
        Self {
            property_name: self.property_name.clone(),
            value: self.value.normalized(),
        }
    }
}

/// Ordered collection of simple filters keyed by property name.
///
/// Insertion order is kept, since it shows up in the rendered fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: IndexMap<String, FilterValue>,
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, failing if the property is already filtered.
    pub fn insert(
        &mut self,
        property_name: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> QueryResult<()> {
        let property_name = property_name.into();
        if self.filters.contains_key(&property_name) {
            return Err(QueryError::duplicate_filter(property_name));
        }
        self.filters.insert(property_name, value.into());
        Ok(())
    }

    /// Get the value filtered for a property.
    pub fn get(&self, property_name: &str) -> Option<&FilterValue> {
        self.filters.get(property_name)
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if no filters were added.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterate over `(property_name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build the filter list in insertion order.
    pub fn to_filters(&self) -> Vec<Filter> {
        self.iter().map(|(k, v)| Filter::new(k, v.clone())).collect()
    }
}

impl From<FilterSet> for Vec<Filter> {
    fn from(set: FilterSet) -> Self {
        set.filters
            .into_iter()
            .map(|(property_name, value)| Filter { property_name, value })
            .collect()
    }
}
