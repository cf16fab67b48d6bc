use super::{Column, ColumnTy};

/// The shape of a model's primary key at a point in time.
///
/// The resolver records the shape each reference was resolved against so a
/// later change to the target's key can be detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Key columns, in declaration order
    pub columns: Vec<PrimaryKeyColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyColumn {
    pub name: String,
    pub ty: ColumnTy,
    pub nullable: bool,
}

impl PrimaryKey {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }

    /// Position of the named column within the key.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

impl From<&Column> for PrimaryKeyColumn {
    fn from(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            ty: column.ty,
            nullable: column.nullable,
        }
    }
}
