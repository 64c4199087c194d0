//! Recency order structure
//!
//! Doubly-linked list stored in an arena of slots. `head` is the
//! least-recently-used node, `tail` the most-recently-used one. Links are slot
//! indices, so end-of-list checks compare slot identity, never keys.

use std::iter::FusedIterator;

/// Node in the recency list
struct Node<K> {
    key: K,
    /// Toward the least-recently-used end
    prev: Option<usize>,
    /// Toward the most-recently-used end
    next: Option<usize>,
}

/// Arena-backed doubly-linked list ordered from LRU (head) to MRU (tail)
pub(crate) struct RecencyList<K> {
    nodes: Vec<Option<Node<K>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K> RecencyList<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked nodes
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn key(&self, idx: usize) -> Option<&K> {
        self.nodes.get(idx)?.as_ref().map(|node| &node.key)
    }

    /// Key at the least-recently-used end
    pub(crate) fn head_key(&self) -> Option<&K> {
        self.key(self.head?)
    }

    /// Key at the most-recently-used end
    pub(crate) fn tail_key(&self) -> Option<&K> {
        self.key(self.tail?)
    }

    /// Append a new node at the tail, returning its slot
    pub(crate) fn push_tail(&mut self, key: K) -> usize {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key,
            prev: None,
            next: None,
        });
        self.link_tail(idx);
        idx
    }

    /// Move a linked node to the tail in place
    pub(crate) fn move_to_tail(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return; // Already most recent
        }

        self.unlink(idx);
        self.link_tail(idx);
    }

    /// Unlink and free the head node, returning its key
    pub(crate) fn pop_head(&mut self) -> Option<K> {
        let head_idx = self.head?;
        self.unlink(head_idx);
        let node = self.nodes[head_idx].take()?;
        self.free_node(head_idx);
        Some(node.key)
    }

    /// Iterate keys from most-recently-used to least-recently-used
    pub(crate) fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.tail,
            remaining: self.len,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Walk the chain in both directions and check it agrees with `len`
    pub(crate) fn is_consistent(&self) -> bool {
        if self.head.is_none() != self.tail.is_none() {
            return false;
        }

        let mut forward = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = match self.nodes.get(idx).and_then(Option::as_ref) {
                Some(node) => node,
                None => return false,
            };
            if node.prev != prev || forward > self.len {
                return false;
            }
            forward += 1;
            prev = Some(idx);
            cursor = node.next;
        }
        if prev != self.tail {
            return false;
        }

        let backward = self.iter().count();
        forward == self.len && backward == self.len
    }

    fn link_tail(&mut self, idx: usize) {
        let old_tail = self.tail;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.nodes[tail_idx] {
                    tail.next = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }

        self.tail = Some(idx);
        self.len += 1;
    }

    fn unlink(&mut self, idx: usize) {
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

        self.len = self.len.saturating_sub(1);
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

/// Borrowing iterator over resident keys, most recent first
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let idx = self.cursor?;
        let node = self.list.nodes.get(idx)?.as_ref()?;
        self.cursor = node.prev;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_tail_order() {
        let mut list = RecencyList::with_capacity(4);

        list.push_tail("a");
        list.push_tail("b");
        list.push_tail("c");

        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.head_key(), Some(&"a"));
        assert_eq!(list.tail_key(), Some(&"c"));
        assert_eq!(list.len(), 3);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_move_middle_to_tail() {
        let mut list = RecencyList::with_capacity(4);

        list.push_tail("a");
        let b = list.push_tail("b");
        list.push_tail("c");
        list.move_to_tail(b);

        assert_eq!(keys(&list), vec!["b", "c", "a"]);
        assert_eq!(list.len(), 3);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_move_head_to_tail() {
        let mut list = RecencyList::with_capacity(4);

        let a = list.push_tail("a");
        list.push_tail("b");
        list.move_to_tail(a);

        assert_eq!(keys(&list), vec!["a", "b"]);
        assert_eq!(list.head_key(), Some(&"b"));
        assert!(list.is_consistent());
    }

    #[test]
    fn test_move_tail_is_noop() {
        let mut list = RecencyList::with_capacity(4);

        list.push_tail("a");
        let b = list.push_tail("b");
        list.move_to_tail(b);

        assert_eq!(keys(&list), vec!["b", "a"]);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_pop_head_reuses_slot() {
        let mut list = RecencyList::with_capacity(2);

        let a = list.push_tail("a");
        list.push_tail("b");

        assert_eq!(list.pop_head(), Some("a"));
        assert_eq!(list.key(a), None);

        let c = list.push_tail("c");
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_pop_until_empty() {
        let mut list = RecencyList::with_capacity(2);

        list.push_tail("a");
        assert_eq!(list.pop_head(), Some("a"));
        assert_eq!(list.pop_head(), None);
        assert_eq!(list.len(), 0);
        assert_eq!(list.head_key(), None);
        assert_eq!(list.tail_key(), None);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_iter_exact_size() {
        let mut list = RecencyList::with_capacity(3);

        list.push_tail(1);
        list.push_tail(2);
        list.push_tail(3);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::with_capacity(3);

        list.push_tail(1);
        list.push_tail(2);
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
        assert!(list.is_consistent());
    }
}
