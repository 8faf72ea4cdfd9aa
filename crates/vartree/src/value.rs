//! The dynamically-typed [`Value`].
//!
//! A `Value` owns exactly one [`Payload`] and caches the payload's 32-bit
//! content hash. Small scalars (`bool` through `u64`) are stored inline; the
//! floating kinds, strings, and string lists live behind an owned heap
//! allocation. The payload is only reachable through shared references, so
//! the cached hash can never go stale: every change goes through a full
//! replacement that rehashes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::coerce;
use crate::error::{Result, VarError};
use crate::hash::{payload_hash, EMPTY_HASH};
use crate::kind::Kind;

/// Text rendered for an empty value.
pub const EMPTY_TOKEN: &str = "<empty>";

/// The stored data of a [`Value`], one variant per [`Kind`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    Empty,
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(Box<f32>),
    Double(Box<f64>),
    /// The widest floating kind; backed by `f64`.
    ExtendedFloat(Box<f64>),
    String(Box<str>),
    StringList(Box<[String]>),
}

const _: () = assert!(mem::size_of::<Payload>() <= 24);

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Payload::Empty => Kind::Empty,
            Payload::Bool(_) => Kind::Bool,
            Payload::Int8(_) => Kind::Int8,
            Payload::UInt8(_) => Kind::UInt8,
            Payload::Int16(_) => Kind::Int16,
            Payload::UInt16(_) => Kind::UInt16,
            Payload::Int32(_) => Kind::Int32,
            Payload::UInt32(_) => Kind::UInt32,
            Payload::Int64(_) => Kind::Int64,
            Payload::UInt64(_) => Kind::UInt64,
            Payload::Float(_) => Kind::Float,
            Payload::Double(_) => Kind::Double,
            Payload::ExtendedFloat(_) => Kind::ExtendedFloat,
            Payload::String(_) => Kind::String,
            Payload::StringList(_) => Kind::StringList,
        }
    }
}

/// A dynamically-typed value: empty, a boolean, an integer of a fixed width,
/// a float of one of three widths, a string, or a list of strings.
///
/// Equality compares kind and payload; two values of different kinds are
/// never equal, even when their hashes collide. Floating payloads follow IEEE
/// comparison, so a `NaN` value is not equal to itself.
///
/// ```
/// use vartree::{Kind, Value};
///
/// let port = Value::from("8080");
/// assert_eq!(port.kind(), Kind::String);
/// assert_eq!(port.as_uint16().unwrap(), 8080);
/// assert!(port.as_int8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Value {
    payload: Payload,
    hash: u32,
}

impl Default for Value {
    fn default() -> Self {
        Value {
            payload: Payload::Empty,
            hash: EMPTY_HASH,
        }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        let hash = payload_hash(&payload);
        Value { payload, hash }
    }
}

macro_rules! inline_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::from(Payload::$variant(v))
                }
            }
        )*
    };
}

inline_from! {
    bool => Bool,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::from(Payload::Float(Box::new(v)))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::from(Payload::Double(Box::new(v)))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::from(Payload::String(v.into()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::from(Payload::String(v.into_boxed_str()))
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::from(v.as_str())
    }
}

/// `None` builds an empty value rather than an empty string.
impl From<Option<&str>> for Value {
    fn from(v: Option<&str>) -> Self {
        v.map_or_else(Value::default, Value::from)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::from(Payload::StringList(v.into_boxed_slice()))
    }
}

impl From<&[&str]> for Value {
    fn from(v: &[&str]) -> Self {
        v.iter().copied().collect()
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for Value {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Value::from(iter.into_iter().map(Into::into).collect::<Vec<String>>())
    }
}

macro_rules! integer_accessors {
    ($($name:ident -> $t:ty, $variant:ident;)*) => {
        $(
            #[doc = concat!("The `", stringify!($t), "` payload, or a string parsed into one.")]
            pub fn $name(&self) -> Result<$t> {
                match &self.payload {
                    Payload::$variant(v) => Ok(*v),
                    Payload::String(s) => coerce::parse_integer(s),
                    _ => Err(self.mismatch(Kind::$variant)),
                }
            }
        )*
    };
}

impl Value {
    /// An empty value.
    pub fn new() -> Self {
        Value::default()
    }

    /// Build an extended-precision float.
    pub fn extended(v: f64) -> Self {
        Value::from(Payload::ExtendedFloat(Box::new(v)))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.payload, Payload::Empty)
    }

    /// True unless the value is empty.
    pub fn has_payload(&self) -> bool {
        !self.is_empty()
    }

    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    /// Name of the current kind, e.g. `"uint16"`.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(mut self) -> Payload {
        mem::take(&mut self.payload)
    }

    /// The cached content hash. Constant while the value is unchanged and
    /// equal for values with equal content.
    pub fn hash_code(&self) -> u32 {
        self.hash
    }

    /// Release the payload. Idempotent.
    pub fn reset(&mut self) {
        *self = Value::default();
    }

    /// Move the content out, leaving this value empty.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    /// Store `value`, returning the previous content.
    pub fn replace(&mut self, value: impl Into<Value>) -> Value {
        mem::replace(self, value.into())
    }

    /// Typed extraction for any [`FromValue`] type.
    ///
    /// ```
    /// use vartree::Value;
    ///
    /// assert_eq!(Value::from("123").get::<i32>().unwrap(), 123);
    /// assert!(Value::from("123abc").get::<i32>().is_err());
    /// ```
    pub fn get<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    pub fn as_bool(&self) -> Result<bool> {
        match &self.payload {
            Payload::Bool(v) => Ok(*v),
            _ => Err(self.mismatch(Kind::Bool)),
        }
    }

    integer_accessors! {
        as_int8 -> i8, Int8;
        as_uint8 -> u8, UInt8;
        as_int16 -> i16, Int16;
        as_uint16 -> u16, UInt16;
        as_int32 -> i32, Int32;
        as_uint32 -> u32, UInt32;
        as_int64 -> i64, Int64;
        as_uint64 -> u64, UInt64;
    }

    /// The `f32` payload, or a string parsed into one.
    pub fn as_float(&self) -> Result<f32> {
        match &self.payload {
            Payload::Float(v) => Ok(**v),
            Payload::String(s) => coerce::parse_floating(s, Kind::Float),
            _ => Err(self.mismatch(Kind::Float)),
        }
    }

    /// The `f64` payload, or a string parsed into one.
    pub fn as_double(&self) -> Result<f64> {
        match &self.payload {
            Payload::Double(v) => Ok(**v),
            Payload::String(s) => coerce::parse_floating(s, Kind::Double),
            _ => Err(self.mismatch(Kind::Double)),
        }
    }

    /// The extended-precision payload, or a string parsed into one.
    pub fn as_extended(&self) -> Result<f64> {
        match &self.payload {
            Payload::ExtendedFloat(v) => Ok(**v),
            Payload::String(s) => coerce::parse_floating(s, Kind::ExtendedFloat),
            _ => Err(self.mismatch(Kind::ExtendedFloat)),
        }
    }

    /// Never coerces.
    pub fn as_string(&self) -> Result<&str> {
        match &self.payload {
            Payload::String(s) => Ok(&**s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// Never coerces.
    pub fn as_string_list(&self) -> Result<&[String]> {
        match &self.payload {
            Payload::StringList(items) => Ok(&**items),
            _ => Err(self.mismatch(Kind::StringList)),
        }
    }

    fn mismatch(&self, expected: Kind) -> VarError {
        VarError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

/// Feeds the cached hash, so equal values hash equal under any hasher.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

/// Canonical text: integers in base 10, floats in fixed notation with six
/// decimals (`1.500000`), string lists joined with `,`, empty as `<empty>`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Empty => f.write_str(EMPTY_TOKEN),
            Payload::Bool(v) => write!(f, "{v}"),
            Payload::Int8(v) => write!(f, "{v}"),
            Payload::UInt8(v) => write!(f, "{v}"),
            Payload::Int16(v) => write!(f, "{v}"),
            Payload::UInt16(v) => write!(f, "{v}"),
            Payload::Int32(v) => write!(f, "{v}"),
            Payload::UInt32(v) => write!(f, "{v}"),
            Payload::Int64(v) => write!(f, "{v}"),
            Payload::UInt64(v) => write!(f, "{v}"),
            Payload::Float(v) => write!(f, "{:.6}", v),
            Payload::Double(v) | Payload::ExtendedFloat(v) => write!(f, "{:.6}", v),
            Payload::String(v) => f.write_str(v),
            Payload::StringList(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Types that can be extracted from a [`Value`] by [`Value::get`].
///
/// Numeric implementations accept string payloads and parse them; `String`
/// and `Vec<String>` require the exact kind.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

macro_rules! from_value {
    ($($t:ty => $accessor:ident),* $(,)?) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Result<Self> {
                    value.$accessor()
                }
            }
        )*
    };
}

from_value! {
    bool => as_bool,
    i8 => as_int8,
    u8 => as_uint8,
    i16 => as_int16,
    u16 => as_uint16,
    i32 => as_int32,
    u32 => as_uint32,
    i64 => as_int64,
    u64 => as_uint64,
    f32 => as_float,
    f64 => as_double,
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_string().map(str::to_string)
    }
}

impl FromValue for Vec<String> {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_string_list().map(<[String]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_kinds_use_heap_variants() {
        for value in [
            Value::from(1.5f32),
            Value::from(1.5f64),
            Value::extended(1.5),
            Value::from("x"),
            Value::from(vec!["x".to_string()]),
        ] {
            assert!(value.kind().is_heap(), "{:?}", value.kind());
        }
        assert!(!Value::from(7u8).kind().is_heap());
    }

    #[test]
    fn into_payload_keeps_content() {
        let payload = Value::from(-3i16).into_payload();
        assert_eq!(payload, Payload::Int16(-3));
        assert_eq!(Value::from(payload).as_int16(), Ok(-3));
    }

    #[test]
    fn none_str_is_empty() {
        let value = Value::from(None::<&str>);
        assert!(value.is_empty());
        assert_eq!(value.hash_code(), EMPTY_HASH);
        assert_eq!(Value::from(Some("")).kind(), Kind::String);
    }
}
