use super::Error;

/// Error when an explicit (local, target) column pairing of a foreign key
/// does not line up with the target model's primary key.
#[derive(Debug)]
pub(super) struct InvalidReferencePair {
    model: Box<str>,
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidReferencePair {}

impl core::fmt::Display for InvalidReferencePair {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid reference pair on `{}.{}`: {}",
            self.model, self.field, self.reason
        )
    }
}

impl Error {
    /// Creates an invalid reference pair error.
    pub fn invalid_reference_pair(
        model: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidReferencePair(InvalidReferencePair {
            model: model.into().into(),
            field: field.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid reference pair error.
    pub fn is_invalid_reference_pair(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidReferencePair(_))
    }
}
