use super::Error;

/// Error when a batch observes a cancellation request between partitions.
#[derive(Debug)]
pub(super) struct Cancelled {
    pub(super) completed: u64,
}

impl std::error::Error for Cancelled {}

impl core::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "operation cancelled after {} affected rows",
            self.completed
        )
    }
}

impl Error {
    /// Creates a cancellation error. `completed` is the number of rows
    /// affected by the partitions that ran before cancellation was observed.
    pub fn cancelled(completed: u64) -> Error {
        Error::from(super::ErrorKind::Cancelled(Cancelled { completed }))
    }

    /// Returns `true` if this error is a cancellation error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Cancelled(_))
    }
}
