//! Destructor policy for stored values.
//!
//! The table hands a value to its policy exactly once, when the owning
//! entry leaves the table: on `delete`, on teardown, or when `put`
//! supersedes it with a new value. The entry is already unlinked by then,
//! so a policy never observes a half-updated chain.

/// Cleanup routine invoked with ownership of one discarded value.
pub trait Dispose<V> {
    fn dispose(&mut self, value: V);
}

/// Default policy: release the value by dropping it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DropValue;

impl<V> Dispose<V> for DropValue {
    #[inline]
    fn dispose(&mut self, value: V) {
        drop(value);
    }
}

impl<V, F> Dispose<V> for F
where
    F: FnMut(V),
{
    #[inline]
    fn dispose(&mut self, value: V) {
        self(value)
    }
}
