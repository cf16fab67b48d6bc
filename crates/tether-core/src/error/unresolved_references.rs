use super::Error;

/// Error when the assembler finds foreign key references that were never
/// resolved.
#[derive(Debug)]
pub(super) struct UnresolvedReferences {
    references: Box<[Box<str>]>,
}

impl std::error::Error for UnresolvedReferences {}

impl core::fmt::Display for UnresolvedReferences {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("unresolved foreign key references: ")?;
        for (i, reference) in self.references.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{reference}`")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an unresolved references error naming each `Model.field`.
    pub fn unresolved_references<I>(references: I) -> Error
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Error::from(super::ErrorKind::UnresolvedReferences(UnresolvedReferences {
            references: references
                .into_iter()
                .map(|reference| reference.into().into())
                .collect(),
        }))
    }

    /// Returns `true` if this error is an unresolved references error.
    pub fn is_unresolved_references(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvedReferences(_))
    }
}
