use super::Error;

/// Error when two column modifications bound into the same parameter bag
/// share a parameter name.
#[derive(Debug)]
pub(super) struct DuplicateParameter {
    pub(super) name: Box<str>,
}

impl std::error::Error for DuplicateParameter {}

impl core::fmt::Display for DuplicateParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "duplicate parameter name `{}`", self.name)
    }
}

impl Error {
    /// Creates a duplicate parameter error.
    pub fn duplicate_parameter(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateParameter(DuplicateParameter {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate parameter error.
    pub fn is_duplicate_parameter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateParameter(_))
    }
}
