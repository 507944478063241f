//! Index-linked LRU queues over a shared node arena.
//!
//! All three segments of a policy link nodes stored in one [`NodeArena`], so
//! moving an entry between segments never reallocates. The head of a queue is
//! its least recently used end and the tail its most recently used end.

use cache_core::QueueType;

/// Index of a node in the arena.
pub(crate) type NodeId = u32;

/// Sentinel for "no node".
const NIL: NodeId = NodeId::MAX;

/// A resident entry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) key: u64,
    pub(crate) queue: QueueType,
    prev: NodeId,
    next: NodeId,
}

/// Fixed-capacity node storage with a free list.
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Allocate an unlinked node.
    pub(crate) fn alloc(&mut self, key: u64, queue: QueueType) -> NodeId {
        let node = Node {
            key,
            queue,
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id as usize] = node;
                id
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as NodeId
            }
        }
    }

    /// Return an unlinked node to the free list.
    pub(crate) fn release(&mut self, id: NodeId) {
        self.free.push(id);
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }
}

/// A doubly linked LRU queue.
pub(crate) struct LruQueue {
    head: NodeId,
    tail: NodeId,
    len: usize,
}

impl LruQueue {
    pub(crate) fn new() -> Self {
        Self {
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// The least recently used node.
    #[inline]
    pub(crate) fn front(&self) -> Option<NodeId> {
        (self.head != NIL).then_some(self.head)
    }

    /// Link `id` at the most recently used end.
    pub(crate) fn push_back(&mut self, arena: &mut NodeArena, id: NodeId) {
        let node = arena.get_mut(id);
        node.prev = self.tail;
        node.next = NIL;

        if self.tail == NIL {
            self.head = id;
        } else {
            arena.get_mut(self.tail).next = id;
        }
        self.tail = id;
        self.len += 1;
    }

    /// Unlink `id`, which must be a member of this queue.
    pub(crate) fn unlink(&mut self, arena: &mut NodeArena, id: NodeId) {
        let Node { prev, next, .. } = *arena.get(id);

        if prev == NIL {
            self.head = next;
        } else {
            arena.get_mut(prev).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            arena.get_mut(next).prev = prev;
        }

        let node = arena.get_mut(id);
        node.prev = NIL;
        node.next = NIL;
        self.len -= 1;
    }

    /// Unlink and return the least recently used node.
    pub(crate) fn pop_front(&mut self, arena: &mut NodeArena) -> Option<NodeId> {
        let id = self.front()?;
        self.unlink(arena, id);
        Some(id)
    }

    /// Move `id`, a member of this queue, to the most recently used end.
    pub(crate) fn move_to_back(&mut self, arena: &mut NodeArena, id: NodeId) {
        if self.tail != id {
            self.unlink(arena, id);
            self.push_back(arena, id);
        }
    }

    /// Keys from least to most recently used.
    #[cfg(test)]
    pub(crate) fn keys(&self, arena: &NodeArena) -> Vec<u64> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while cursor != NIL {
            let node = arena.get(cursor);
            keys.push(node.key);
            cursor = node.next;
        }
        keys
    }
}
