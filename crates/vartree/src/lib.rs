//! # vartree
//!
//! Dynamically-typed values and a recursive key/value tree built from them.
//!
//! A [`Value`] holds one of a closed set of kinds (see [`Kind`]): nothing,
//! a boolean, a signed or unsigned integer of 8/16/32/64 bits, a float of
//! three widths, a string, or a list of strings. Typed accessors check the
//! kind; the numeric ones also parse string payloads, with full-input and
//! range checks. Every value carries a cached 32-bit content hash.
//!
//! A [`Node`] pairs a `Value` with an ordered map of child nodes keyed by
//! `Value`s, giving a tree of arbitrary depth for ad-hoc configuration or
//! structured data. Keys are ordered by hash (see [`HashKey`]).
//!
//! ## Quick start
//!
//! ```rust
//! use vartree::{Node, Value, VarError};
//!
//! let mut root = Node::new();
//! root["cmd"]["log"]["level"].set(9);
//! root["cmd"]["log"]["file"].set("/var/log/app.log");
//! root["cmd"]["threads"].set("4");
//!
//! let level: i32 = root["cmd"]["log"]["level"].value().get().unwrap();
//! assert_eq!(level, 9);
//!
//! // String payloads coerce on numeric access.
//! assert_eq!(root["cmd"]["threads"].value().as_uint8().unwrap(), 4);
//!
//! assert!(matches!(root.at("missing"), Err(VarError::KeyNotFound { .. })));
//! assert_eq!(Value::from_iter(["a", "b"]).to_string(), "a,b");
//! ```
//!
//! ## Modules
//!
//! - [`kind`]: the discriminant enumeration and kind names
//! - [`value`]: `Value`, `Payload`, typed extraction, `FromValue`
//! - [`hash`]: content hashing and the combine step
//! - [`key`]: `HashKey`, hash-ordered map keys
//! - [`node`]: `Node`, the recursive tree
//! - [`error`]: error types

mod coerce;
pub mod error;
pub mod hash;
pub mod key;
pub mod kind;
pub mod node;
mod ser;
pub mod value;

pub use error::{Bound, Result, VarError};
pub use hash::EMPTY_HASH;
pub use key::HashKey;
pub use kind::{kind_name, Kind};
pub use node::Node;
pub use value::{FromValue, Payload, Value, EMPTY_TOKEN};
