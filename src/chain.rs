//! Entries, collision chains and traversal.
//!
//! Entries live in a generational arena owned by the table; each one
//! carries the `EntryId` of its successor in the same bucket. A bucket
//! head is an `Option<EntryId>`. Every live entry is reachable from exactly
//! one bucket head, so the arena length is the table size.

use crate::key::Key;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub(crate) struct EntryId;
}

#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
    // Cached so growth relinks without touching key bytes.
    pub(crate) hash: u64,
    pub(crate) next: Option<EntryId>,
}

pub(crate) type Entries<V> = SlotMap<EntryId, Entry<V>>;

/// Iterator over one bucket's chain, head to tail.
pub struct Chain<'a, V> {
    entries: &'a Entries<V>,
    cursor: Option<EntryId>,
}

impl<'a, V> Chain<'a, V> {
    pub(crate) fn new(entries: &'a Entries<V>, head: Option<EntryId>) -> Self {
        Self {
            entries,
            cursor: head,
        }
    }
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (&'a Key, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entries: &'a Entries<V> = self.entries;
        let e = &entries[self.cursor?];
        self.cursor = e.next;
        Some((&e.key, &e.value))
    }
}

/// Iterator over every entry, in bucket order and then chain order.
///
/// Not a snapshot: the borrow on the table prevents mutation while it lives.
pub struct Iter<'a, V> {
    entries: &'a Entries<V>,
    buckets: core::slice::Iter<'a, Option<EntryId>>,
    chain: Chain<'a, V>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(entries: &'a Entries<V>, buckets: &'a [Option<EntryId>]) -> Self {
        Self {
            entries,
            buckets: buckets.iter(),
            chain: Chain::new(entries, None),
            remaining: entries.len(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                self.remaining -= 1;
                return Some(item);
            }
            let head = *self.buckets.next()?;
            self.chain = Chain::new(self.entries, head);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

impl<'a, V> core::iter::FusedIterator for Iter<'a, V> {}
