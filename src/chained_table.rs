//! ChainedTable: separate-chaining container with incremental growth.

use crate::chain::{Chain, Entries, Entry, EntryId, Iter};
use crate::config::TableConfig;
use crate::dispose::{Dispose, DropValue};
use crate::error::TableError;
use crate::hash::{bucket_index, hash_bytes};
use crate::key::Key;
use core::fmt;
use std::io;

/// Hash table from byte-string keys to values of type `V`.
///
/// Every value leaving the table goes through the destructor policy `D`
/// exactly once: on `delete`, when `put` overwrites it, and on teardown.
pub struct ChainedTable<V, D = DropValue>
where
    D: Dispose<V>,
{
    config: TableConfig,
    buckets: Vec<Option<EntryId>>, // chain heads, len == capacity
    entries: Entries<V>,
    dispose: D,
}

fn alloc_buckets(buckets: usize) -> Result<Vec<Option<EntryId>>, TableError> {
    let mut v = Vec::new();
    v.try_reserve_exact(buckets)
        .map_err(|_| TableError::AllocationFailed { buckets })?;
    v.resize(buckets, None);
    Ok(v)
}

impl<V> ChainedTable<V> {
    /// Default sizing, values released by dropping them.
    pub fn with_drop_policy() -> Self {
        Self::new(DropValue)
    }
}

impl<V> Default for ChainedTable<V> {
    fn default() -> Self {
        Self::with_drop_policy()
    }
}

impl<V, D> ChainedTable<V, D>
where
    D: Dispose<V>,
{
    /// Create an empty table with the default configuration.
    pub fn new(dispose: D) -> Self {
        let config = TableConfig::default();
        log::trace!("creating table with {} buckets", config.initial_capacity);
        Self {
            buckets: vec![None; config.initial_capacity],
            entries: Entries::with_key(),
            config,
            dispose,
        }
    }

    pub fn with_config(config: TableConfig, dispose: D) -> Result<Self, TableError> {
        config.validate()?;
        log::trace!("creating table with {} buckets", config.initial_capacity);
        Ok(Self {
            buckets: alloc_buckets(config.initial_capacity)?,
            entries: Entries::with_key(),
            config,
            dispose,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Index of the bucket `key` hashes to under the current capacity.
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        bucket_index(hash_bytes(key.as_ref()), self.capacity())
    }

    fn find(&self, bytes: &[u8], hash: u64) -> Option<EntryId> {
        let mut cursor = self.buckets[bucket_index(hash, self.capacity())];
        while let Some(id) = cursor {
            let e = &self.entries[id];
            if e.hash == hash && e.key.as_bytes() == bytes {
                return Some(id);
            }
            cursor = e.next;
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let bytes = key.as_ref();
        let id = self.find(bytes, hash_bytes(bytes))?;
        Some(&self.entries[id].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let bytes = key.as_ref();
        let id = self.find(bytes, hash_bytes(bytes))?;
        Some(&mut self.entries[id].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let bytes = key.as_ref();
        self.find(bytes, hash_bytes(bytes)).is_some()
    }

    /// Associate `value` with `key`.
    ///
    /// An existing entry keeps its key and has its value replaced; the
    /// superseded value goes to the destructor policy. A new key is linked
    /// at the head of its bucket, and if that brings the table to its load
    /// threshold the bucket table grows before returning.
    ///
    /// The grown bucket array is allocated before the new entry is linked,
    /// so on error the table is unchanged. The rejected `key` and `value`
    /// are dropped in place; the destructor policy only sees values the
    /// table has stored, so it is not run for them.
    pub fn put(&mut self, key: impl Into<Key>, value: V) -> Result<(), TableError> {
        let key = key.into();
        let hash = hash_bytes(key.as_bytes());

        if let Some(id) = self.find(key.as_bytes(), hash) {
            let old = core::mem::replace(&mut self.entries[id].value, value);
            self.dispose.dispose(old);
            return Ok(());
        }

        let len = self.len() + 1;
        let grown = if self.config.exceeds_load(len, self.capacity()) {
            Some(self.reserve_growth(len)?)
        } else {
            None
        };

        let idx = bucket_index(hash, self.capacity());
        let id = self.entries.insert(Entry {
            key,
            value,
            hash,
            next: self.buckets[idx],
        });
        self.buckets[idx] = Some(id);

        if let Some(buckets) = grown {
            self.rehash_into(buckets);
        }
        Ok(())
    }

    /// Remove `key`, handing its value to the destructor policy.
    ///
    /// Returns whether an entry was removed; a missing key is a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let bytes = key.as_ref();
        let hash = hash_bytes(bytes);
        let idx = bucket_index(hash, self.capacity());

        // `prev == None` means the link to patch is the bucket head.
        let mut prev: Option<EntryId> = None;
        let mut cursor = self.buckets[idx];
        while let Some(id) = cursor {
            let e = &self.entries[id];
            if e.hash == hash && e.key.as_bytes() == bytes {
                break;
            }
            prev = Some(id);
            cursor = e.next;
        }
        let Some(id) = cursor else {
            return false;
        };

        // Unlink before dispose so the policy never sees a dangling chain.
        let entry = self
            .entries
            .remove(id)
            .expect("chain links must point at live entries");
        match prev {
            None => self.buckets[idx] = entry.next,
            Some(p) => self.entries[p].next = entry.next,
        }
        self.dispose.dispose(entry.value);
        true
    }

    /// Tear the table down, disposing every value. Same as dropping it.
    pub fn free(self) {
        drop(self)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.entries, &self.buckets)
    }

    /// Chain of bucket `index`, or `None` past the last bucket.
    pub fn bucket(&self, index: usize) -> Option<Chain<'_, V>> {
        self.buckets
            .get(index)
            .map(|&head| Chain::new(&self.entries, head))
    }

    /// Write one `key: <key> value: <value>` line per entry to `sink`, in
    /// traversal order. Debugging aid only.
    pub fn print<W, F, S>(&self, mut format: F, sink: &mut W) -> io::Result<()>
    where
        W: io::Write + ?Sized,
        F: FnMut(&V) -> S,
        S: fmt::Display,
    {
        for (k, v) in self.iter() {
            writeln!(sink, "key: {} value: {}", k, format(v))?;
        }
        Ok(())
    }

    fn reserve_growth(&self, len: usize) -> Result<Vec<Option<EntryId>>, TableError> {
        let capacity = self
            .config
            .grown_capacity(self.capacity(), len)
            .and_then(alloc_buckets);
        if let Err(e) = &capacity {
            log::warn!("cannot grow table past {} buckets: {}", self.capacity(), e);
        }
        capacity
    }

    /// Relink every entry into `buckets`. Entries, keys and values are
    /// moved as-is; only the old head array is released.
    fn rehash_into(&mut self, buckets: Vec<Option<EntryId>>) {
        let capacity = buckets.len();
        let old = core::mem::replace(&mut self.buckets, buckets);
        for &head in old.iter() {
            let mut cursor = head;
            while let Some(id) = cursor {
                let e = &mut self.entries[id];
                cursor = e.next;
                let idx = bucket_index(e.hash, capacity);
                e.next = self.buckets[idx];
                self.buckets[idx] = Some(id);
            }
        }
        log::debug!(
            "grew table from {} to {} buckets ({} entries)",
            old.len(),
            capacity,
            self.entries.len()
        );
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut seen = std::collections::HashSet::new();
        let mut reachable = 0usize;
        for (i, &head) in self.buckets.iter().enumerate() {
            let mut cursor = head;
            while let Some(id) = cursor {
                let e = self.entries.get(id).expect("dangling chain link");
                assert_eq!(e.hash, hash_bytes(e.key.as_bytes()), "stale cached hash");
                assert_eq!(bucket_index(e.hash, self.capacity()), i, "entry in wrong bucket");
                assert!(seen.insert(e.key.clone()), "duplicate key {:?}", e.key);
                reachable += 1;
                cursor = e.next;
            }
        }
        assert_eq!(reachable, self.entries.len(), "unreachable entries");
        assert!(
            !self.config.exceeds_load(self.len(), self.capacity()),
            "load threshold not restored"
        );
    }
}

impl<V, D> Drop for ChainedTable<V, D>
where
    D: Dispose<V>,
{
    fn drop(&mut self) {
        log::trace!("freeing table with {} entries", self.entries.len());
        for head in self.buckets.iter_mut() {
            let mut cursor = head.take();
            while let Some(id) = cursor {
                let entry = self
                    .entries
                    .remove(id)
                    .expect("chain links must point at live entries");
                cursor = entry.next;
                self.dispose.dispose(entry.value);
            }
        }
    }
}

impl<V, D> fmt::Debug for ChainedTable<V, D>
where
    V: fmt::Debug,
    D: Dispose<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, D> IntoIterator for &'a ChainedTable<V, D>
where
    D: Dispose<V>,
{
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
