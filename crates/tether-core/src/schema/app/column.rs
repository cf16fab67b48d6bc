use std::fmt;

/// One declared (or synthesized) column of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The column name, unique within the containing model.
    pub name: String,

    /// Semantic SQL type
    pub ty: ColumnTy,

    /// True if the column can hold `NULL`.
    pub nullable: bool,

    /// True if the column is part of the model's primary key
    pub primary_key: bool,

    /// True if the column participates in a foreign key
    pub foreign_key: bool,

    /// Set when the column was synthesized while resolving the foreign key
    /// field of this name.
    pub(crate) synthesized_by: Option<String>,

    /// The `foreign_key` flag as declared, before resolution marks the
    /// column as the source of a reference.
    pub(crate) declared_foreign_key: bool,
}

/// The fixed set of column types understood by the embedded database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnTy {
    Integer,
    Real,
    Text,
    Blob,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnTy) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            primary_key: false,
            foreign_key: false,
            synthesized_by: None,
            declared_foreign_key: false,
        }
    }

    /// Marks the column as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column as participating in a foreign key.
    pub fn foreign_key(mut self) -> Self {
        self.foreign_key = true;
        self
    }

    /// Returns true if the column was synthesized by the resolver rather than
    /// declared.
    pub fn is_synthesized(&self) -> bool {
        self.synthesized_by.is_some()
    }

    /// The foreign key field whose resolution produced this column.
    pub fn synthesized_by(&self) -> Option<&str> {
        self.synthesized_by.as_deref()
    }
}

impl ColumnTy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::Blob => "blob",
        }
    }
}

impl fmt::Display for ColumnTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
