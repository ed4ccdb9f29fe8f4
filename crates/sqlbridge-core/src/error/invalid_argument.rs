use super::Error;

/// Error when a required input is missing or out of range.
///
/// These are reported up front, before any SQL is generated or executed.
#[derive(Debug)]
pub(super) struct InvalidArgument {
    pub(super) name: &'static str,
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidArgument {}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid argument `{}`: {}", self.name, self.message)
    }
}

impl Error {
    /// Creates an invalid argument error for the argument `name`.
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArgument(InvalidArgument {
            name,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidArgument(_))
    }
}
