//! Table-level schema handed to the persistence layer

mod column;
pub use column::{Column, ColumnId};

mod fk;
pub use fk::{ForeignKeyColumn, ForeignKeyConstraint};

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId};

mod ty;
pub use ty::Type;
