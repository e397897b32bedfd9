//! value representation
//!
//! A template is a tree of the following data types
//! - null
//! - boolean (true/false)
//! - integer (signed, i64)
//! - decimal (f64)
//! - string (utf-8)
//! - array ("list" of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Object order is kept as loaded. It does not matter for comparison but it does decide the order in which
//! asset families are discovered.
//!
//! Unsigned integers that do not fit into an i64 are stored as decimals.
//!
use indexmap::IndexMap;
use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserializer, Serializer,
};

/// All possible value types
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

/// Structural equality, object member order is not significant
///
/// Unlike `f64`, a NaN decimal equals another NaN so that every value equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a nested object member
    ///
    /// Returns `None` as soon as a segment is missing or the value at that point is not an object.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(self, |value, key| value.as_object()?.get(*key))
    }

    /// Structural differences between `self` (expected) and `other` (actual)
    pub fn diff(&self, other: &Value) -> Vec<Difference> {
        let mut differences = vec![];
        diff_into(String::new(), self, other, &mut differences);
        differences
    }
}

fn diff_into(path: String, expected: &Value, actual: &Value, out: &mut Vec<Difference>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, expected_value) in expected {
                let member_path = join_key(&path, key);
                match actual.get(key) {
                    Some(actual_value) => diff_into(member_path, expected_value, actual_value, out),
                    None => out.push(Difference::new(member_path, DifferenceKind::Removed)),
                }
            }

            for key in actual.keys().filter(|key| !expected.contains_key(*key)) {
                out.push(Difference::new(join_key(&path, key), DifferenceKind::Added));
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            for (index, (expected_value, actual_value)) in expected.iter().zip(actual).enumerate() {
                diff_into(format!("{path}[{index}]"), expected_value, actual_value, out);
            }

            for index in actual.len()..expected.len() {
                out.push(Difference::new(
                    format!("{path}[{index}]"),
                    DifferenceKind::Removed,
                ));
            }
            for index in expected.len()..actual.len() {
                out.push(Difference::new(
                    format!("{path}[{index}]"),
                    DifferenceKind::Added,
                ));
            }
        }
        (expected, actual) => {
            if expected != actual {
                out.push(Difference::new(path, DifferenceKind::Changed));
            }
        }
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// A single location where two values disagree
#[derive(derive_new::new, Debug, Clone, PartialEq)]
pub struct Difference {
    /// dotted path, array indices in brackets. Empty for the root.
    pub path: String,
    pub kind: DifferenceKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DifferenceKind {
    /// only in the actual value
    Added,
    /// only in the expected value
    Removed,
    /// present in both, but different
    Changed,
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            self.path.as_str()
        };

        match self.kind {
            DifferenceKind::Added => write!(f, "+ {path}"),
            DifferenceKind::Removed => write!(f, "- {path}"),
            DifferenceKind::Changed => write!(f, "~ {path}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<K: ToString, V: Into<Value>> From<IndexMap<K, V>> for Value {
    fn from(value: IndexMap<K, V>) -> Self {
        Value::Object(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Number> for Value {
    fn from(value: serde_json::Number) -> Self {
        if let Some(int) = value.as_i64() {
            return Value::Integer(int);
        }

        Value::Decimal(
            value
                .as_f64()
                .expect("a numeric value that is not an integer must be a float"),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => b.into(),
            serde_json::Value::Number(n) => n.into(),
            serde_json::Value::String(s) => s.into(),
            serde_json::Value::Array(a) => a.into(),
            serde_json::Value::Object(o) => Value::Object(
                o.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}

impl<'de> serde::de::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a template value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(match i64::try_from(v) {
            Ok(int) => Value::Integer(int),
            Err(_) => Value::Decimal(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Decimal(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(v.into())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(v.into())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(Value::Array(values))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }

    /// YAML tags (`!Ref Foo`) arrive as enums and become single-member objects (`{Ref: Foo}`)
    fn visit_enum<A>(self, data: A) -> Result<Value, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        use de::VariantAccess;

        let (tag, variant): (String, _) = data.variant()?;
        let value: Value = variant.newtype_variant()?;
        Ok(Value::Object(IndexMap::from([(tag, value)])))
    }
}
