//! Recency list backing the cache
//!
//! Entries live in an arena of slots. The hash index and the chain links both
//! address entries by slot handle, so boundary checks compare handles and never
//! keys. The head of the chain is the least recently used entry, the tail the
//! most recently used one.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Index of an entry's slot in the arena
type Handle = usize;

/// Node in the recency chain
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Result of [`LruList::put`]
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Upsert<V> {
    /// The key was new
    Inserted,
    /// The key existed; carries the value it held before
    Updated(V),
}

/// Hash index plus recency chain, without any capacity bound
pub(crate) struct LruList<K, V> {
    map: HashMap<K, Handle, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    free_list: Vec<Handle>,
}

impl<K, V> LruList<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty list with room for `capacity` entries before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
        }
    }

    /// Look up a value and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.promote(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Insert or overwrite a value; the entry ends up most recently used
    pub fn put(&mut self, key: K, value: V) -> Upsert<V> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.nodes[idx].as_mut() {
                let previous = std::mem::replace(&mut node.value, value);
                self.promote(idx);
                return Upsert::Updated(previous);
            }
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_back(idx);
        self.map.insert(key, idx);

        Upsert::Inserted
    }

    /// Remove and return the least recently used entry
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let idx = self.head?;
        self.unlink(idx);

        let node = self.nodes[idx].take()?;
        self.map.remove(&node.key);
        self.free_node(idx);

        Some((node.key, node.value))
    }

    /// The least recently used entry, without touching recency
    pub fn peek_front(&self) -> Option<(&K, &V)> {
        let idx = self.head?;
        self.nodes[idx].as_ref().map(|node| (&node.key, &node.value))
    }

    /// Check for a key without touching recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Walk the chain from least to most recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the list holds no entries
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn promote(&mut self, idx: Handle) {
        if self.tail == Some(idx) {
            return; // Already most recently used
        }

        self.unlink(idx);
        self.push_back(idx);
    }

    fn push_back(&mut self, idx: Handle) {
        let tail = self.tail;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = tail;
            node.next = None;
        }

        match tail {
            Some(tail_idx) => {
                if let Some(tail_node) = &mut self.nodes[tail_idx] {
                    tail_node.next = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }

        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: Handle) {
        let (prev, next) = if let Some(node) = &mut self.nodes[idx] {
            (node.prev.take(), node.next.take())
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> Handle {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: Handle) {
        self.free_list.push(idx);
    }

    /// Panic unless the index and both chain directions agree
    #[cfg(test)]
    pub fn assert_consistent(&self) {
        let len = self.map.len();

        match (self.head, self.tail) {
            (None, None) => assert_eq!(len, 0, "empty chain with indexed entries"),
            (Some(head), Some(tail)) => {
                let head_node = self.nodes[head].as_ref().expect("head slot is free");
                let tail_node = self.nodes[tail].as_ref().expect("tail slot is free");
                assert!(head_node.prev.is_none(), "head has a predecessor");
                assert!(tail_node.next.is_none(), "tail has a successor");
                if len == 1 {
                    assert_eq!(head, tail, "single entry must be both ends");
                }
            }
            ends => panic!("one-sided chain: {:?}", ends),
        }

        let mut forward = Vec::with_capacity(len);
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            assert!(forward.len() < len, "forward walk longer than index");
            let node = self.nodes[idx].as_ref().expect("chain reaches a free slot");
            assert_eq!(self.map.get(&node.key), Some(&idx), "index disagrees with chain");
            forward.push(idx);
            cursor = node.next;
        }
        assert_eq!(forward.len(), len, "forward walk shorter than index");
        assert_eq!(forward.last().copied(), self.tail);

        let mut backward = Vec::with_capacity(len);
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            assert!(backward.len() < len, "backward walk longer than index");
            backward.push(idx);
            cursor = self.nodes[idx].as_ref().and_then(|node| node.prev);
        }
        backward.reverse();
        assert_eq!(forward, backward, "chain directions disagree");

        assert_eq!(self.free_list.len() + len, self.nodes.len(), "leaked slots");
    }
}

/// Iterator over entries from least to most recently used
pub(crate) struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    cursor: Option<Handle>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes[self.cursor?].as_ref()?;
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}
