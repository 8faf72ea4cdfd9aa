//! The closed set of kinds a [`Value`](crate::Value) may hold.

use std::fmt;

use crate::error::VarError;

/// Discriminant of a [`Value`](crate::Value).
///
/// The numeric representation is stable and matches declaration order, so
/// `Kind::FIRST..=Kind::LAST` covers every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Kind {
    Empty = 0,
    Bool = 1,
    Int8 = 2,
    UInt8 = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    ExtendedFloat = 12,
    String = 13,
    StringList = 14,
}

/// Name printed for a discriminant byte beyond the enumerated range.
pub const UNKNOWN_KIND_NAME: &str = "unknown";

const NAMES: [&str; 15] = [
    "empty",
    "bool",
    "int8",
    "uint8",
    "int16",
    "uint16",
    "int32",
    "uint32",
    "int64",
    "uint64",
    "float",
    "double",
    "long double",
    "string",
    "string list",
];

impl Kind {
    pub const FIRST: Kind = Kind::Empty;
    pub const LAST: Kind = Kind::StringList;

    /// Every kind, in declaration order.
    pub const ALL: [Kind; 15] = [
        Kind::Empty,
        Kind::Bool,
        Kind::Int8,
        Kind::UInt8,
        Kind::Int16,
        Kind::UInt16,
        Kind::Int32,
        Kind::UInt32,
        Kind::Int64,
        Kind::UInt64,
        Kind::Float,
        Kind::Double,
        Kind::ExtendedFloat,
        Kind::String,
        Kind::StringList,
    ];

    /// The raw discriminant byte.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Human-readable name, e.g. `"int8"` or `"string list"`.
    pub const fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::Int8
                | Kind::UInt8
                | Kind::Int16
                | Kind::UInt16
                | Kind::Int32
                | Kind::UInt32
                | Kind::Int64
                | Kind::UInt64
        )
    }

    pub const fn is_floating(self) -> bool {
        matches!(self, Kind::Float | Kind::Double | Kind::ExtendedFloat)
    }

    /// Kinds whose accessors accept a string payload and parse it.
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_floating()
    }

    /// Kinds whose payload lives behind an owned heap allocation.
    pub const fn is_heap(self) -> bool {
        self.is_floating() || matches!(self, Kind::String | Kind::StringList)
    }

    /// Parse a kind from its human-readable name.
    pub fn from_name(name: &str) -> Option<Kind> {
        NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Kind::ALL[i])
    }
}

/// Name of a raw discriminant byte, falling back to `"unknown"`.
pub fn kind_name(raw: u8) -> &'static str {
    Kind::try_from(raw).map_or(UNKNOWN_KIND_NAME, Kind::name)
}

impl TryFrom<u8> for Kind {
    type Error = VarError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Kind::ALL.get(raw as usize).copied().ok_or_else(|| {
            VarError::InvalidState(format!(
                "discriminant {raw} is outside {}..={}",
                Kind::FIRST.index(),
                Kind::LAST.index()
            ))
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
