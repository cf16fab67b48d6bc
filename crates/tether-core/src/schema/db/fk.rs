use super::{ColumnId, TableId};
use crate::schema::app::ForeignKeyAction;

/// A resolved foreign key: the columns of one table referencing the primary
/// key of another (or the same) table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignKeyConstraint {
    /// The model field that declared the reference
    pub field: String,

    /// Referenced table
    pub target: TableId,

    /// Column pairs, in the referenced table's primary key order
    pub columns: Vec<ForeignKeyColumn>,

    pub on_delete: ForeignKeyAction,

    pub on_update: ForeignKeyAction,

    pub deferred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignKeyColumn {
    /// Column on the referencing table
    pub source: ColumnId,

    /// Primary key column on the referenced table
    pub target: ColumnId,
}
