pub mod app;

mod builder;
pub use builder::Builder;

pub mod db;

mod registry;
pub use registry::Registry;

mod resolve;
pub use resolve::Resolver;

mod verify;

use crate::Result;
use app::Model;
use db::{Table, TableId};
use std::sync::Arc;

/// A completed schema build.
///
/// Holds the registry frozen in its resolved state together with the tables
/// assembled from it.
#[derive(Debug)]
pub struct Schema {
    /// Model-level schema
    pub app: Registry,

    /// Table-level schema
    pub db: Arc<db::Schema>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn model(&self, name: &str) -> Result<&Model> {
        self.app.lookup(name)
    }

    pub fn table_for(&self, model: &str) -> Result<&Table> {
        Ok(self.db.table(self.table_id_for(model)?))
    }

    pub fn table_id_for(&self, model: &str) -> Result<TableId> {
        Ok(TableId(self.app.lookup(model)?.id().0))
    }
}
