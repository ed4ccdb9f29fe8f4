use super::Error;

/// Error when a multi-mapping selector does not match the shape of the query.
#[derive(Debug)]
pub(super) struct InvalidArity {
    pub(super) expected: usize,
    pub(super) actual: usize,
}

impl std::error::Error for InvalidArity {}

impl core::fmt::Display for InvalidArity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid arity: selector takes {} entities but the query selects {}",
            self.expected, self.actual
        )
    }
}

impl Error {
    /// Creates an invalid arity error.
    pub fn invalid_arity(expected: usize, actual: usize) -> Error {
        Error::from(super::ErrorKind::InvalidArity(InvalidArity {
            expected,
            actual,
        }))
    }

    /// Returns `true` if this error is an invalid arity error.
    pub fn is_invalid_arity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidArity(_))
    }
}
