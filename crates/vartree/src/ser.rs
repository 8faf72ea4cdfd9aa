//! `serde` serialization for [`Value`] and [`Node`].
//!
//! Values serialize as their natural data model type: empty as unit, each
//! integer width and float width as itself, a string list as a sequence.
//! Nodes serialize as a map with a `value` entry and, unless the node is a
//! leaf, a `children` entry holding `[key, node]` pairs in hash order. Keys
//! stay typed instead of being stringified.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::node::Node;
use crate::value::{Payload, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.payload() {
            Payload::Empty => serializer.serialize_unit(),
            Payload::Bool(v) => serializer.serialize_bool(*v),
            Payload::Int8(v) => serializer.serialize_i8(*v),
            Payload::UInt8(v) => serializer.serialize_u8(*v),
            Payload::Int16(v) => serializer.serialize_i16(*v),
            Payload::UInt16(v) => serializer.serialize_u16(*v),
            Payload::Int32(v) => serializer.serialize_i32(*v),
            Payload::UInt32(v) => serializer.serialize_u32(*v),
            Payload::Int64(v) => serializer.serialize_i64(*v),
            Payload::UInt64(v) => serializer.serialize_u64(*v),
            Payload::Float(v) => serializer.serialize_f32(**v),
            Payload::Double(v) | Payload::ExtendedFloat(v) => serializer.serialize_f64(**v),
            Payload::String(v) => serializer.serialize_str(v),
            Payload::StringList(items) => serializer.collect_seq(items.iter()),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = if self.is_leaf() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("value", self.value())?;
        if !self.is_leaf() {
            map.serialize_entry("children", &Children(self))?;
        }
        map.end()
    }
}

struct Children<'a>(&'a Node);

impl Serialize for Children<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}
