//! Recursive key/value tree built from [`Value`]s.
//!
//! A [`Node`] holds its own [`Value`] plus an ordered map from keys (also
//! `Value`s) to child nodes. Children are owned outright, so cloning a node
//! deep-copies its whole subtree and dropping it releases every descendant.
//!
//! # Key order
//!
//! Children are keyed by [`HashKey`]: two keys are the same slot when their
//! hashes are equal, and iteration runs in ascending hash order. Distinct
//! keys with colliding hashes therefore share a slot; the first key stored
//! in a slot is the one that is kept.
//!
//! ```
//! use vartree::Node;
//!
//! let mut root = Node::new();
//! root["cmd"]["log"]["level"].set(9);
//! assert_eq!(root["cmd"]["log"]["level"].value().as_int32().unwrap(), 9);
//! assert!(root.at("missing").is_err());
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::error::{Result, VarError};
use crate::key::HashKey;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Node {
    value: Value,
    children: BTreeMap<HashKey, Node>,
}

impl Node {
    /// An empty node with no children.
    pub fn new() -> Self {
        Node::default()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replace this node's own value. Children are untouched.
    pub fn set(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// The child under `key`, inserting an empty node first if absent.
    pub fn entry(&mut self, key: impl Into<Value>) -> &mut Node {
        self.children.entry(HashKey::from(key.into())).or_default()
    }

    /// The child under `key`, or [`VarError::KeyNotFound`].
    pub fn at(&self, key: impl Into<Value>) -> Result<&Node> {
        let key = HashKey::from(key.into());
        self.children.get(&key).ok_or_else(|| not_found(&key))
    }

    pub fn at_mut(&mut self, key: impl Into<Value>) -> Result<&mut Node> {
        let key = HashKey::from(key.into());
        match self.children.get_mut(&key) {
            Some(node) => Ok(node),
            None => Err(not_found(&key)),
        }
    }

    pub fn get(&self, key: impl Into<Value>) -> Option<&Node> {
        self.children.get(&HashKey::from(key.into()))
    }

    pub fn get_mut(&mut self, key: impl Into<Value>) -> Option<&mut Node> {
        self.children.get_mut(&HashKey::from(key.into()))
    }

    pub fn contains_key(&self, key: impl Into<Value>) -> bool {
        self.children.contains_key(&HashKey::from(key.into()))
    }

    /// Follow `path` one key at a time without creating anything. Fails on
    /// the first missing key.
    ///
    /// ```
    /// use vartree::Node;
    ///
    /// let mut root = Node::new();
    /// root.entry_path(["server", "port"]).set(8080u16);
    /// let port = root.at_path(["server", "port"]).unwrap();
    /// assert_eq!(port.value().as_uint16().unwrap(), 8080);
    /// ```
    pub fn at_path<I, K>(&self, path: I) -> Result<&Node>
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
    {
        path.into_iter().try_fold(self, |node, key| node.at(key))
    }

    /// Follow `path`, creating empty nodes for missing keys.
    pub fn entry_path<I, K>(&mut self, path: I) -> &mut Node
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
    {
        path.into_iter().fold(self, |node, key| node.entry(key))
    }

    /// Store `node` under `key`, returning the node it replaced. An existing
    /// slot keeps its original key.
    pub fn insert(&mut self, key: impl Into<Value>, node: impl Into<Node>) -> Option<Node> {
        self.children.insert(HashKey::from(key.into()), node.into())
    }

    pub fn remove(&mut self, key: impl Into<Value>) -> Option<Node> {
        self.children.remove(&HashKey::from(key.into()))
    }

    /// Drop every child, keeping this node's own value.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the node has no children. Says nothing about the node's
    /// own value; see [`Value::is_empty`] for that.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.is_empty()
    }

    /// Children in hash order. Reversible with `.rev()`.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.children.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            inner: self.children.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator + '_ {
        self.children.keys().map(HashKey::value)
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Node> + ExactSizeIterator + '_ {
        self.children.values()
    }

    /// Depth-first, pre-order visit of every descendant. `visit` receives the
    /// depth (0 for direct children), the key, and the child.
    ///
    /// Uses an explicit stack, so arbitrarily deep trees do not exhaust the
    /// call stack.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &Value, &Node),
    {
        let mut stack = vec![(0usize, self.iter())];
        while let Some((depth, iter)) = stack.last_mut() {
            let depth = *depth;
            match iter.next() {
                Some((key, child)) => {
                    visit(depth, key, child);
                    if !child.is_leaf() {
                        stack.push((depth + 1, child.iter()));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Render every descendant, one line each, indented two spaces per level:
    ///
    /// ```text
    /// d[cmd] = <empty>
    ///   d[log] = <empty>
    ///     d[level] = 9
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.walk(|depth, key, node| {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format!("d[{}] = {}\n", key, node.value));
        });
        out
    }
}

fn not_found(key: &HashKey) -> VarError {
    VarError::KeyNotFound {
        key: key.value().to_string(),
    }
}

// Release descendants level by level instead of recursing once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(mem::take(&mut node.children).into_values());
        }
    }
}

/// Deep copy of the whole subtree, built without recursion.
impl Clone for Node {
    fn clone(&self) -> Self {
        // Breadth-first list of (parent index, key, source). Every parent
        // precedes its children.
        let mut order: Vec<(usize, Option<&HashKey>, &Node)> = vec![(0, None, self)];
        let mut next = 0;
        while let Some(&(_, _, source)) = order.get(next) {
            order.extend(source.children.iter().map(|(key, child)| (next, Some(key), child)));
            next += 1;
        }

        let mut built: Vec<Node> = order
            .iter()
            .map(|(_, _, source)| Node::from(source.value.clone()))
            .collect();

        // Attach from the back so each node is complete before it moves.
        while built.len() > 1 {
            let (parent, key, _) = order[built.len() - 1];
            if let (Some(node), Some(key)) = (built.pop(), key) {
                built[parent].children.insert(key.clone(), node);
            }
        }
        built.pop().unwrap_or_default()
    }
}

/// Structural equality: same own value, same keys in the same order, and
/// equal children. Compared without recursion.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.value != b.value || a.len() != b.len() {
                return false;
            }
            for ((ka, ca), (kb, cb)) in a.children.iter().zip(&b.children) {
                if ka.value() != kb.value() {
                    return false;
                }
                pending.push((ca, cb));
            }
        }
        true
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node {
            value,
            children: BTreeMap::new(),
        }
    }
}

macro_rules! node_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Node {
                fn from(v: $t) -> Self {
                    Node::from(Value::from(v))
                }
            }
        )*
    };
}

node_from!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, &str, String, Vec<String>);

impl<K: Into<Value>> Index<K> for Node {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if the key is absent. Use [`Node::at`] or [`Node::get`] to
    /// handle that case.
    fn index(&self, key: K) -> &Node {
        match self.at(key) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Inserts an empty child when the key is absent.
impl<K: Into<Value>> IndexMut<K> for Node {
    fn index_mut(&mut self, key: K) -> &mut Node {
        self.entry(key)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (&'a Value, &'a Node);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Node {
    type Item = (&'a Value, &'a mut Node);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> IterMut<'a> {
        self.iter_mut()
    }
}

/// Iterator over `(key, child)` pairs in hash order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, HashKey, Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Value, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.value(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.value(), v))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Mutable iterator over `(key, child)` pairs in hash order. Keys stay
/// read-only.
#[derive(Debug)]
pub struct IterMut<'a> {
    inner: btree_map::IterMut<'a, HashKey, Node>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a Value, &'a mut Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.value(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for IterMut<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.value(), v))
    }
}

impl ExactSizeIterator for IterMut<'_> {}
impl FusedIterator for IterMut<'_> {}
