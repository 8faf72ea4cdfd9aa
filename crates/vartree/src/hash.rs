//! Content hashing for [`Value`](crate::Value).
//!
//! Every payload hashes through [`FxHasher`], which is deterministic across
//! runs and processes, and the 64-bit result is truncated to 32 bits. Hashes
//! are only comparable between builds using the same `rustc-hash` version.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::value::Payload;

/// Hash of every empty value: the hash of a null pointer.
pub const EMPTY_HASH: u32 = 0;

/// Golden-ratio constant of the order-sensitive combine step.
const GOLDEN_RATIO: u32 = 0x9e37_79b9;

/// Hash a single scalar with the crate-wide hasher.
pub fn scalar_hash<T: Hash + ?Sized>(value: &T) -> u32 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish() as u32
}

/// Mix `hash` into `seed`. Order-sensitive: combining `a` then `b` differs
/// from `b` then `a`.
pub fn hash_combine(seed: u32, hash: u32) -> u32 {
    seed ^ hash
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

pub(crate) fn payload_hash(payload: &Payload) -> u32 {
    match payload {
        Payload::Empty => EMPTY_HASH,
        Payload::Bool(v) => scalar_hash(v),
        Payload::Int8(v) => scalar_hash(v),
        Payload::UInt8(v) => scalar_hash(v),
        Payload::Int16(v) => scalar_hash(v),
        Payload::UInt16(v) => scalar_hash(v),
        Payload::Int32(v) => scalar_hash(v),
        Payload::UInt32(v) => scalar_hash(v),
        Payload::Int64(v) => scalar_hash(v),
        Payload::UInt64(v) => scalar_hash(v),
        Payload::Float(v) => scalar_hash(&f32_bits(**v)),
        Payload::Double(v) | Payload::ExtendedFloat(v) => scalar_hash(&f64_bits(**v)),
        Payload::String(v) => scalar_hash(&**v),
        Payload::StringList(items) => string_list_hash(items),
    }
}

/// Seeded with the element count, then each element combined in order.
fn string_list_hash(items: &[String]) -> u32 {
    items
        .iter()
        .fold(scalar_hash(&(items.len() as u32)), |seed, item| {
            hash_combine(seed, scalar_hash(item.as_str()))
        })
}

// 0.0 and -0.0 compare equal, so they must hash equal.
fn f32_bits(v: f32) -> u32 {
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

fn f64_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_is_null_pointer_hash() {
        assert_eq!(scalar_hash(&std::ptr::null::<()>()), EMPTY_HASH);
    }

    #[test]
    fn combine_is_order_sensitive() {
        let a = scalar_hash("a");
        let b = scalar_hash("b");
        let seed = scalar_hash(&2u32);
        assert_ne!(
            hash_combine(hash_combine(seed, a), b),
            hash_combine(hash_combine(seed, b), a)
        );
    }

    #[test]
    fn signed_zero_hashes_equal() {
        assert_eq!(
            payload_hash(&Payload::Double(Box::new(0.0))),
            payload_hash(&Payload::Double(Box::new(-0.0)))
        );
        assert_eq!(
            payload_hash(&Payload::Float(Box::new(0.0))),
            payload_hash(&Payload::Float(Box::new(-0.0)))
        );
    }

    #[test]
    fn string_list_seed_depends_on_length() {
        let empty = payload_hash(&Payload::StringList(Vec::new().into_boxed_slice()));
        assert_eq!(empty, scalar_hash(&0u32));
        let one = payload_hash(&Payload::StringList(vec![String::new()].into()));
        assert_ne!(empty, one);
    }
}
