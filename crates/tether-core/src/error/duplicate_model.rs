use super::Error;

/// Error when two models claim the same identity.
///
/// Raised by the registry when a model name is registered twice, and by the
/// assembler when two models map to the same table name.
#[derive(Debug)]
pub(super) struct DuplicateModel {
    model: Box<str>,
    table: Option<Box<str>>,
}

impl std::error::Error for DuplicateModel {}

impl core::fmt::Display for DuplicateModel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.table {
            Some(table) => write!(
                f,
                "model `{}` maps to table `{}`, which another model already uses",
                self.model, table
            ),
            None => write!(f, "model `{}` is already registered", self.model),
        }
    }
}

impl Error {
    /// Creates a duplicate model error.
    pub fn duplicate_model(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateModel(DuplicateModel {
            model: model.into().into(),
            table: None,
        }))
    }

    /// Creates a duplicate model error for a table name collision.
    pub fn duplicate_table(model: impl Into<String>, table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateModel(DuplicateModel {
            model: model.into().into(),
            table: Some(table.into().into()),
        }))
    }

    /// Returns `true` if this error is a duplicate model error.
    pub fn is_duplicate_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateModel(_))
    }
}
