use super::Error;

/// Error when primary keys depend on each other through key-participating
/// foreign keys.
///
/// The path lists the `Model.field` references forming the cycle, repeating
/// the first one at the end.
#[derive(Debug)]
pub(super) struct CyclicKeyDependency {
    path: Box<[Box<str>]>,
}

impl std::error::Error for CyclicKeyDependency {}

impl core::fmt::Display for CyclicKeyDependency {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("cyclic primary key dependency: ")?;
        for (i, step) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "`{step}`")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a cyclic key dependency error.
    pub fn cyclic_key_dependency<I>(path: I) -> Error
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Error::from(super::ErrorKind::CyclicKeyDependency(CyclicKeyDependency {
            path: path.into_iter().map(|step| step.into().into()).collect(),
        }))
    }

    /// Returns `true` if this error is a cyclic key dependency error.
    pub fn is_cyclic_key_dependency(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CyclicKeyDependency(_))
    }
}
