use super::Error;

/// Error when a model name is not present in the registry.
///
/// When raised while resolving a foreign key, the error also names the
/// referencing field.
#[derive(Debug)]
pub(super) struct UnknownTargetModel {
    target: Box<str>,
    referenced_by: Option<(Box<str>, Box<str>)>,
}

impl std::error::Error for UnknownTargetModel {}

impl core::fmt::Display for UnknownTargetModel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.referenced_by {
            Some((model, field)) => write!(
                f,
                "field `{model}.{field}` references model `{}`, which is not registered",
                self.target
            ),
            None => write!(f, "model `{}` is not registered", self.target),
        }
    }
}

impl Error {
    /// Creates an unknown model error for a plain registry lookup.
    pub fn unknown_model(target: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownTargetModel(UnknownTargetModel {
            target: target.into().into(),
            referenced_by: None,
        }))
    }

    /// Creates an unknown target model error for a foreign key field.
    pub fn unknown_target_model(
        model: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnknownTargetModel(UnknownTargetModel {
            target: target.into().into(),
            referenced_by: Some((model.into().into(), field.into().into())),
        }))
    }

    /// Returns `true` if this error is an unknown target model error.
    pub fn is_unknown_target_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownTargetModel(_))
    }
}
