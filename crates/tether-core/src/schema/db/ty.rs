use crate::schema::app::ColumnTy;
use std::fmt;

/// Storage class of a column in the embedded database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Integer,
    Real,
    Text,
    Blob,
}

impl Type {
    pub fn from_app(ty: ColumnTy) -> Self {
        match ty {
            ColumnTy::Integer => Self::Integer,
            ColumnTy::Real => Self::Real,
            ColumnTy::Text => Self::Text,
            ColumnTy::Blob => Self::Blob,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
        }
    }
}

impl From<ColumnTy> for Type {
    fn from(ty: ColumnTy) -> Self {
        Self::from_app(ty)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
