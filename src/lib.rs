//! chained-table: a single-threaded hash table from byte-string keys to
//! owned values, using separate chaining and geometric growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a dictionary whose ownership rules are structural, so lost
//!   entries, stale links after growth and double disposal cannot happen.
//! - Layers:
//!   - `hash`: fixed multiplicative string hash (`acc * 97 + byte`).
//!   - `chain`: entries stored in a generational arena (`slotmap`), each
//!     holding the id of its successor in the same bucket.
//!   - `ChainedTable<V, D>`: bucket heads, size/capacity bookkeeping,
//!     get/put/delete, growth, and the destructor policy `D`.
//!
//! Constraints
//! - Single-threaded; no internal locking.
//! - Keys are unique. A `put` on an existing key replaces the value in
//!   place and never creates or destroys an entry.
//! - `len < capacity * max_load_factor` holds between operations; the
//!   insertion that reaches the threshold grows the table before `put`
//!   returns.
//!
//! Ownership
//! - The table owns every entry and its key. Values pass to the
//!   destructor policy exactly once: on `delete`, when overwritten by
//!   `put`, or on teardown (`free` or `Drop`). Entries are unlinked before
//!   their value is handed over.
//! - Growth relinks the existing entries into a new head array. Keys are
//!   never duplicated and values are never disposed by growth; only the
//!   old head array is released.
//!
//! Hashing and rehashing
//! - Each entry caches its `u64` hash; growth recomputes bucket indices
//!   from the cached hash without reading key bytes.
//!
//! Errors
//! - A missing key is a normal result (`None` / `false`).
//! - Bad sizing, capacity overflow and bucket-array allocation failure
//!   surface as `TableError`. Growth allocates before linking anything, so
//!   a failed `put` leaves the table as it was.
//!
//! Notes and non-goals
//! - No shrinking, no eviction, no pluggable hashing, no open addressing.
//! - Traversal (`iter`, `bucket`, `print`) is for diagnostics; order is
//!   bucket index, then chain position, and changes across growth.

mod chain;
mod chained_table;
mod chained_table_proptest;
pub mod config;
mod dispose;
mod error;
mod hash;
mod key;

// Public surface
pub use chain::{Chain, Iter};
pub use chained_table::ChainedTable;
pub use config::TableConfig;
pub use dispose::{Dispose, DropValue};
pub use error::TableError;
pub use hash::{hash_bytes, MULTIPLIER};
pub use key::Key;
