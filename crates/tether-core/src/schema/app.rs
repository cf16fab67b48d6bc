//! Model descriptors: the declarative input of a schema build

mod column;
pub use column::{Column, ColumnTy};

mod fk;
pub(crate) use fk::Resolution;
pub use fk::{ForeignKey, ForeignKeyAction, ForeignKeyPair};

mod model;
pub use model::{Model, ModelId};

mod pk;
pub use pk::{PrimaryKey, PrimaryKeyColumn};
