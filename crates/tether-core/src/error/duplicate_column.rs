use super::Error;

/// Error when a model ends up with two columns (or foreign key fields) of the
/// same name.
///
/// This occurs when:
/// - A model declares the same column twice
/// - A foreign key field shares its name with a column or another foreign key
/// - A synthesized foreign key column collides with a declared column
#[derive(Debug)]
pub(super) struct DuplicateColumn {
    model: Box<str>,
    column: Box<str>,
}

impl std::error::Error for DuplicateColumn {}

impl core::fmt::Display for DuplicateColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "duplicate column `{}` on model `{}`",
            self.column, self.model
        )
    }
}

impl Error {
    /// Creates a duplicate column error.
    pub fn duplicate_column(model: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateColumn(DuplicateColumn {
            model: model.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate column error.
    pub fn is_duplicate_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateColumn(_))
    }
}
