//! Table sizing: initial capacity, growth factor and load threshold.

use crate::error::TableError;

pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;
pub const DEFAULT_GROWTH_FACTOR: usize = 2;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 1.0;

/// Sizing policy fixed at table creation.
///
/// A table grows whenever `len >= capacity * max_load_factor` after an
/// insertion, multiplying its capacity by `growth_factor` until the
/// threshold is clear again. Capacity never shrinks. A valid config has
/// room for at least one entry in its initial bucket table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub growth_factor: usize,
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidConfig {
                reason: "initial capacity must be at least 1",
            });
        }
        if self.growth_factor < 2 {
            return Err(TableError::InvalidConfig {
                reason: "growth factor must be at least 2",
            });
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(TableError::InvalidConfig {
                reason: "max load factor must be finite and positive",
            });
        }
        if self.initial_capacity as f64 * self.max_load_factor < 1.0 {
            return Err(TableError::InvalidConfig {
                reason: "initial capacity times max load factor must be at least 1",
            });
        }
        Ok(())
    }

    /// True when `len` entries in `capacity` buckets reach the load threshold.
    #[inline]
    pub(crate) fn exceeds_load(&self, len: usize, capacity: usize) -> bool {
        len as f64 >= capacity as f64 * self.max_load_factor
    }

    /// Smallest geometric successor of `capacity` that holds `len` entries
    /// under the load threshold.
    pub(crate) fn grown_capacity(&self, capacity: usize, len: usize) -> Result<usize, TableError> {
        let mut next = capacity;
        loop {
            next = next
                .checked_mul(self.growth_factor)
                .ok_or(TableError::CapacityOverflow {
                    capacity: next,
                    growth_factor: self.growth_factor,
                })?;
            if !self.exceeds_load(len, next) {
                return Ok(next);
            }
        }
    }
}
