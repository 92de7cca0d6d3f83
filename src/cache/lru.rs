//! LRU List Module
//!
//! Arena-backed doubly-linked list that keeps items in recency order.
//! Links are slot indices into a `Vec`, so no unsafe code or `Rc` cycles are
//! needed, and freed slots are recycled through an intrusive free list.

/// Handle to a slot in an [`LruList`].
pub type NodeId = usize;

/// Null link.
const NIL: NodeId = usize::MAX;

/// Upper bound on slots reserved up front; larger lists grow on demand.
pub(crate) const PREALLOC_LIMIT: usize = 1024;

#[derive(Debug)]
struct Node<T> {
    /// `None` while the slot sits on the free list
    item: Option<T>,
    prev: NodeId,
    next: NodeId,
}

// == LRU List ==
/// Recency-ordered list with O(1) push, move-to-back, remove and pop-front.
///
/// - Front = least recently used
/// - Back = most recently used
#[derive(Debug)]
pub struct LruList<T> {
    nodes: Vec<Node<T>>,
    head: NodeId,
    tail: NodeId,
    free_head: NodeId,
    len: usize,
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for up to `capacity` items before
    /// reallocating. The reservation is capped at `PREALLOC_LIMIT`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            head: NIL,
            tail: NIL,
            free_head: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends an item as the most recently used and returns its handle.
    pub fn push_back(&mut self, item: T) -> NodeId {
        let id = self.alloc(item);
        self.link_back(id);
        self.len += 1;
        id
    }

    // == Touch ==
    /// Marks a node as most recently used (moves it to the back).
    ///
    /// Returns false if `id` is not a live node.
    pub fn touch(&mut self, id: NodeId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        if id != self.tail {
            self.unlink(id);
            self.link_back(id);
        }
        true
    }

    // == Remove ==
    /// Unlinks a node and returns its item. Stale handles yield `None`.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_live(id) {
            return None;
        }
        self.unlink(id);
        let item = self.nodes[id].item.take();
        self.nodes[id].next = self.free_head;
        self.free_head = id;
        self.len -= 1;
        item
    }

    // == Pop Front ==
    /// Removes and returns the least recently used item.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.head == NIL {
            None
        } else {
            self.remove(self.head)
        }
    }

    /// Returns the item behind a handle.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).and_then(|node| node.item.as_ref())
    }

    /// Returns the item behind a handle mutably. Does not change its recency.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).and_then(|node| node.item.as_mut())
    }

    // == Iter ==
    /// Iterates from least to most recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            current: self.head,
            remaining: self.len,
        }
    }

    // == Length ==
    /// Returns the number of live items.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every item and releases all slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free_head = NIL;
        self.len = 0;
    }

    fn is_live(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.item.is_some())
    }

    fn alloc(&mut self, item: T) -> NodeId {
        let node = Node {
            item: Some(item),
            prev: NIL,
            next: NIL,
        };
        if self.free_head != NIL {
            let id = self.free_head;
            self.free_head = self.nodes[id].next;
            self.nodes[id] = node;
            id
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    fn link_back(&mut self, id: NodeId) {
        self.nodes[id].prev = self.tail;
        self.nodes[id].next = NIL;
        if self.tail != NIL {
            self.nodes[self.tail].next = id;
        } else {
            self.head = id;
        }
        self.tail = id;
    }

    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = (self.nodes[id].prev, self.nodes[id].next);
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.nodes[id].prev = NIL;
        self.nodes[id].next = NIL;
    }
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Front-to-back iterator over `(handle, item)` pairs.
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    current: NodeId,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let id = self.current;
        let node = &self.nodes[id];
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.item.as_ref().map(|item| (id, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
