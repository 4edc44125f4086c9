//! Error kinds surfaced by table construction and growth.
//!
//! A missing key is not an error: lookups return `None` and `delete`
//! reports `false`.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid table configuration: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("bucket capacity overflow growing {capacity} buckets by a factor of {growth_factor}")]
    CapacityOverflow {
        capacity: usize,
        growth_factor: usize,
    },

    #[error("failed to allocate a bucket table of {buckets} buckets")]
    AllocationFailed { buckets: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn messages() {
        assert_eq!(
            TableError::InvalidConfig {
                reason: "initial capacity must be at least 1"
            }
            .to_string(),
            "invalid table configuration: initial capacity must be at least 1"
        );
        assert_eq!(
            TableError::CapacityOverflow {
                capacity: usize::MAX,
                growth_factor: 2
            }
            .to_string(),
            format!(
                "bucket capacity overflow growing {} buckets by a factor of 2",
                usize::MAX
            )
        );
        assert_eq!(
            TableError::AllocationFailed { buckets: 8 }.to_string(),
            "failed to allocate a bucket table of 8 buckets"
        );
    }
}
