// Linked List - ordered container of keyed records
//
// Nodes live in an arena and link to their successor by slot index. The list
// keeps the index of the first and last node so both ends insert in O(1);
// lookups and removals walk the chain from the head.

use std::fmt;

/// Keyed - anything the list can search and remove by key
pub trait Keyed {
    fn key(&self) -> &str;
}

// ============================================================================
// CORE TYPES
// ============================================================================

#[derive(Debug)]
struct Node<T> {
    value: T,
    next: Option<usize>,
}

/// LinkedList - singly linked, insertion-ordered
///
/// Invariants:
/// - `head` is `None` iff the list is empty, and likewise `tail`
/// - `tail` is the only node whose `next` is `None`
/// - `len` equals the number of nodes reachable from `head`
pub struct LinkedList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of records in the list
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Add a record at the end of the list
    pub fn append(&mut self, value: T) {
        let idx = self.alloc(value);

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// Add a record at the start of the list
    pub fn prepend(&mut self, value: T) {
        let idx = self.alloc(value);

        match self.head {
            Some(head) => self.node_mut(idx).next = Some(head),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|idx| &self.node(idx).value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|idx| &self.node(idx).value)
    }

    /// Head-to-tail iterator. Each call starts over from the head.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// First record matching `pred`, scanning from the head
    pub fn find_by<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|value| pred(value))
    }

    /// Unlink and return the first record matching `pred`
    ///
    /// Only the first match goes; later matches stay in place.
    pub fn remove_by<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let head = self.head?;

        // Head is special: nothing points at it but the list itself
        if pred(&self.node(head).value) {
            let node = self.release(head);
            self.head = node.next;
            if self.head.is_none() {
                self.tail = None;
            }
            self.len -= 1;
            return Some(node.value);
        }

        let mut prev = head;
        while let Some(idx) = self.node(prev).next {
            if pred(&self.node(idx).value) {
                let node = self.release(idx);
                self.node_mut(prev).next = node.next;
                if self.tail == Some(idx) {
                    self.tail = Some(prev);
                }
                self.len -= 1;
                return Some(node.value);
            }
            prev = idx;
        }

        None
    }

    /// Release every node, head first
    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        self.tail = None;

        while let Some(idx) = cursor {
            // Sever the link before the node goes away
            cursor = self.slots[idx].take().and_then(|node| node.next);
        }

        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    // ========================================================================
    // ARENA
    // ========================================================================

    fn alloc(&mut self, value: T) -> usize {
        let node = Node { value, next: None };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> Node<T> {
        let node = self.slots[idx]
            .take()
            .unwrap_or_else(|| unreachable!("slot {idx} is linked but empty"));
        self.free.push(idx);
        node
    }

    fn node(&self, idx: usize) -> &Node<T> {
        self.slots[idx]
            .as_ref()
            .unwrap_or_else(|| unreachable!("slot {idx} is linked but empty"))
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        self.slots[idx]
            .as_mut()
            .unwrap_or_else(|| unreachable!("slot {idx} is linked but empty"))
    }
}

// ============================================================================
// KEYED ACCESS
// ============================================================================

impl<T: Keyed> LinkedList<T> {
    /// Search for the first record whose key equals `key`
    ///
    /// Returns `None` when nothing matches, including on an empty list.
    pub fn search(&self, key: &str) -> Option<&T> {
        self.find_by(|value| value.key() == key)
    }

    /// Remove the first record whose key equals `key`
    ///
    /// A miss (or an empty list) leaves the list untouched and returns `None`.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.remove_by(|value| value.key() == key)
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

// ============================================================================
// TRAVERSAL
// ============================================================================

/// Borrowing head-to-tail iterator over a [`LinkedList`]
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.node(idx);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
