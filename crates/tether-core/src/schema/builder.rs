use super::{app, db, resolve, Registry, Resolver, Schema};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Assembles resolved models into tables.
///
/// Also carries the options for a schema build: table naming, the separator
/// used for synthesized columns, and whether the result is verified.
#[derive(Debug, Clone)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    /// Resolves references before assembly
    resolver: Resolver,

    /// Run structural verification on the assembled schema
    verify: bool,
}

/// Used to track state during assembly
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    registry: &'a Registry,

    /// Maps table names to identifiers
    table_lookup: IndexMap<String, db::TableId>,

    /// Tables as they are built
    tables: Vec<db::Table>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
            resolver: Resolver::new(),
            verify: true,
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Sets the separator between field and key column names in
    /// synthesized columns. Defaults to `_`.
    pub fn column_name_separator(&mut self, separator: &str) -> &mut Self {
        self.resolver.separator(separator);
        self
    }

    pub fn verify(&mut self, verify: bool) -> &mut Self {
        self.verify = verify;
        self
    }

    /// Resolves every reference in `registry`, then assembles the tables.
    ///
    /// The registry is frozen into the returned [`Schema`]. Any failure aborts
    /// the build; no partial schema is returned.
    pub fn build(&self, mut registry: Registry) -> Result<Schema> {
        self.resolver.resolve(&mut registry)?;
        let db = self.assemble(&registry)?;

        Ok(Schema {
            app: registry,
            db: Arc::new(db),
        })
    }

    /// Assembles tables from an already resolved registry.
    ///
    /// Fails with an unresolved references error, naming every offending
    /// `Model.field`, if any reference is unresolved or was resolved against a
    /// key that has since changed.
    pub fn assemble(&self, registry: &Registry) -> Result<db::Schema> {
        BuildSchema {
            builder: self,
            registry,
            table_lookup: IndexMap::new(),
            tables: vec![],
        }
        .build()
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSchema<'_> {
    fn build(mut self) -> Result<db::Schema> {
        self.ensure_resolved()?;

        let registry = self.registry;

        for model in registry.models() {
            self.build_table(model)?;
        }

        // Constraints are built once every table exists, as they may point at
        // tables built later (or at their own table).
        for model in registry.models() {
            self.build_foreign_keys(model)?;
        }

        let schema = db::Schema {
            tables: self.tables,
        };

        if self.builder.verify {
            schema.verify()?;
        }

        debug!(tables = schema.tables.len(), "assembled schema");

        Ok(schema)
    }

    fn ensure_resolved(&self) -> Result<()> {
        let mut unresolved = vec![];

        for model in self.registry.models() {
            for fk in model.foreign_keys() {
                if !fk.is_resolved() || resolve::is_stale(self.registry, fk) {
                    unresolved.push(format!("{}.{}", model.name(), fk.field));
                }
            }
        }

        if unresolved.is_empty() {
            Ok(())
        } else {
            Err(Error::unresolved_references(unresolved))
        }
    }

    fn build_table(&mut self, model: &app::Model) -> Result<()> {
        let name = self.table_name_for(model);

        if self.table_lookup.contains_key(&name) {
            return Err(Error::duplicate_table(model.name(), name));
        }

        let id = db::TableId(self.tables.len());
        debug_assert_eq!(id.0, model.id().0);
        self.table_lookup.insert(name.clone(), id);

        let mut table = db::Table::new(id, name, model.name().to_string());

        for column in model.columns() {
            let column_id = db::ColumnId {
                table: id,
                index: table.columns.len(),
            };

            if column.primary_key {
                table.primary_key.push(column_id);
            }

            table.columns.push(db::Column {
                id: column_id,
                name: column.name.clone(),
                ty: db::Type::from_app(column.ty),
                nullable: column.nullable,
                primary_key: column.primary_key,
                foreign_key: column.foreign_key,
            });
        }

        if table.primary_key.is_empty() {
            return Err(Error::missing_primary_key(model.name()));
        }

        self.tables.push(table);
        Ok(())
    }

    fn build_foreign_keys(&mut self, model: &app::Model) -> Result<()> {
        let source = db::TableId(model.id().0);

        for fk in model.foreign_keys() {
            let Some(target) = fk.resolved_target() else {
                crate::bail!("`{}.{}` is not resolved", model.name(), fk.field);
            };
            let target = db::TableId(target.0);

            let mut columns = Vec::with_capacity(fk.pairs().len());

            for pair in fk.pairs() {
                columns.push(db::ForeignKeyColumn {
                    source: self.column_id(source, &pair.local)?,
                    target: self.column_id(target, &pair.target)?,
                });
            }

            self.tables[source.0]
                .foreign_keys
                .push(db::ForeignKeyConstraint {
                    field: fk.field.clone(),
                    target,
                    columns,
                    on_delete: fk.on_delete,
                    on_update: fk.on_update,
                    deferred: fk.deferred,
                });
        }

        Ok(())
    }

    fn column_id(&self, table: db::TableId, name: &str) -> Result<db::ColumnId> {
        let table = &self.tables[table.0];

        match table.column_by_name(name) {
            Some(column) => Ok(column.id),
            None => crate::bail!("table `{}` has no column `{}`", table.name, name),
        }
    }

    fn table_name_for(&self, model: &app::Model) -> String {
        let base = model.table_name().unwrap_or(model.name());

        match &self.builder.table_name_prefix {
            Some(prefix) => format!("{prefix}{base}"),
            None => base.to_string(),
        }
    }
}
