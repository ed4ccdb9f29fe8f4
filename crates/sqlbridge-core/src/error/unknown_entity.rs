use super::Error;

/// Error when an operation names an entity that was never registered.
#[derive(Debug)]
pub(super) struct UnknownEntity {
    pub(super) name: Box<str>,
}

impl std::error::Error for UnknownEntity {}

impl core::fmt::Display for UnknownEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "entity `{}` is not registered", self.name)
    }
}

impl Error {
    /// Creates an unknown entity error.
    pub fn unknown_entity(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownEntity(UnknownEntity {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown entity error.
    pub fn is_unknown_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownEntity(_))
    }
}
