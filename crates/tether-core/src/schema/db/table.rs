use super::{Column, ColumnId, ForeignKeyConstraint};

use std::fmt;

/// A database table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table
    pub name: String,

    /// Name of the model the table was built from
    pub model: String,

    /// The table's columns, in model declaration order
    pub columns: Vec<Column>,

    pub primary_key: Vec<ColumnId>,

    pub foreign_keys: Vec<ForeignKeyConstraint>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableId(pub usize);

impl Table {
    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key
            .iter()
            .map(|column_id| &self.columns[column_id.index])
    }

    /// The constraint declared by the named model field.
    pub fn foreign_key(&self, field: &str) -> Option<&ForeignKeyConstraint> {
        self.foreign_keys.iter().find(|fk| fk.field == field)
    }

    pub(crate) fn new(id: TableId, name: String, model: String) -> Self {
        Self {
            id,
            name,
            model,
            columns: vec![],
            primary_key: vec![],
            foreign_keys: vec![],
        }
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
