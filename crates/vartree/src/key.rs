//! Hash-ordered map keys.
//!
//! A [`HashKey`] orders and identifies a [`Value`] by its cached hash alone.
//! This is what [`Node`](crate::Node) keys its children by. It is not a
//! structural comparison: two distinct values whose hashes collide are the
//! same key, and iteration follows hash order rather than value order or
//! insertion order.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct HashKey(Value);

impl HashKey {
    pub fn new(value: impl Into<Value>) -> Self {
        HashKey(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn hash_code(&self) -> u32 {
        self.0.hash_code()
    }
}

impl From<Value> for HashKey {
    fn from(value: Value) -> Self {
        HashKey(value)
    }
}

impl PartialEq for HashKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash_code() == other.hash_code()
    }
}

impl Eq for HashKey {}

impl PartialOrd for HashKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash_code().cmp(&other.hash_code())
    }
}

impl Hash for HashKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}
