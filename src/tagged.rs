use zbus::zvariant::{OwnedValue, Value};

/*
* The value kinds a player's `Metadata` property is decoded into. Strings, 32-bit signed integers,
* 64-bit unsigned integers and doubles cover the MPRIS metadata guidelines; everything else is
* carried as `Unsupported` together with its D-Bus signature.
*
* See https://www.freedesktop.org/wiki/Specifications/mpris-spec/metadata/
*/
/// A dynamically-typed value, as received from the bus.
#[derive(Debug, PartialEq, Clone)]
pub enum TaggedValue {
    /// Value is a string.
    String(String),

    /// Value is a 32-bit integer.
    Int32(i32),

    /// Value is an unsigned 64-bit integer.
    UInt64(u64),

    /// Value is a 64-bit float.
    Float64(f64),

    /// Value is an array of other values. Elements may be of different kinds.
    Array(Vec<TaggedValue>),

    /// Value has a kind that is not decoded. Holds the D-Bus signature of the value.
    Unsupported(String),
}

impl TaggedValue {
    /// A short name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &str {
        match *self {
            TaggedValue::String(_) => "String",
            TaggedValue::Int32(_) => "Int32",
            TaggedValue::UInt64(_) => "UInt64",
            TaggedValue::Float64(_) => "Float64",
            TaggedValue::Array(_) => "Array",
            TaggedValue::Unsupported(ref signature) => signature,
        }
    }
}

impl<'a> From<Value<'a>> for TaggedValue {
    fn from(value: Value<'a>) -> Self {
        match value {
            Value::Str(v) => TaggedValue::String(v.to_string()),
            Value::I32(v) => TaggedValue::Int32(v),
            Value::U64(v) => TaggedValue::UInt64(v),
            Value::F64(v) => TaggedValue::Float64(v),

            Value::Array(a) => TaggedValue::Array(a.into_iter().map(TaggedValue::from).collect()),

            // Variants are transparent.
            Value::Value(v) => TaggedValue::from(*v),

            other => TaggedValue::Unsupported(other.value_signature().to_string()),
        }
    }
}

impl<'a, 'v> From<&'v Value<'a>> for TaggedValue {
    fn from(value: &'v Value<'a>) -> Self {
        TaggedValue::from(value.clone())
    }
}

impl From<OwnedValue> for TaggedValue {
    fn from(value: OwnedValue) -> Self {
        TaggedValue::from(&*value)
    }
}

impl<'a> From<&'a str> for TaggedValue {
    fn from(string: &'a str) -> TaggedValue {
        TaggedValue::String(String::from(string))
    }
}

impl From<i32> for TaggedValue {
    fn from(val: i32) -> TaggedValue {
        TaggedValue::Int32(val)
    }
}

impl From<u64> for TaggedValue {
    fn from(val: u64) -> TaggedValue {
        TaggedValue::UInt64(val)
    }
}

impl From<f64> for TaggedValue {
    fn from(val: f64) -> TaggedValue {
        TaggedValue::Float64(val)
    }
}

impl From<Vec<TaggedValue>> for TaggedValue {
    fn from(values: Vec<TaggedValue>) -> TaggedValue {
        TaggedValue::Array(values)
    }
}
