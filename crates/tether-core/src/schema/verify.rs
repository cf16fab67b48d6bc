use super::db::{self, TableId};
use crate::Result;

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a db::Schema,
}

impl db::Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        debug_assert!(self.verify_ids_populated());

        self.verify_each_table_has_primary_key()?;
        self.verify_column_names_are_unique()?;
        self.verify_foreign_keys_reference_primary_keys()?;
        self.verify_foreign_key_column_types_match()?;
        Ok(())
    }

    fn verify_ids_populated(&self) -> bool {
        for (index, table) in self.schema.tables.iter().enumerate() {
            assert_eq!(table.id, TableId(index));

            for (index, column) in table.columns.iter().enumerate() {
                assert_eq!(column.id.table, table.id);
                assert_eq!(column.id.index, index);
            }
        }

        true
    }

    fn verify_each_table_has_primary_key(&self) -> Result<()> {
        for table in &self.schema.tables {
            if table.primary_key.is_empty() {
                crate::bail!("table `{}` has no primary key", table.name);
            }

            for column in table.primary_key_columns() {
                if !column.primary_key {
                    crate::bail!(
                        "column `{}.{}` is in the primary key but not flagged as key",
                        table.name,
                        column.name
                    );
                }
            }
        }

        Ok(())
    }

    fn verify_column_names_are_unique(&self) -> Result<()> {
        for table in &self.schema.tables {
            let mut names = HashSet::new();

            for column in &table.columns {
                if !names.insert(&column.name) {
                    crate::bail!("duplicate column `{}.{}`", table.name, column.name);
                }
            }
        }

        Ok(())
    }

    /// Each constraint must cover the referenced table's complete primary
    /// key, in key order, using columns of its own table.
    fn verify_foreign_keys_reference_primary_keys(&self) -> Result<()> {
        for table in &self.schema.tables {
            for fk in &table.foreign_keys {
                let target = self.schema.table(fk.target);
                let referenced: Vec<_> = fk.columns.iter().map(|column| column.target).collect();

                if referenced != target.primary_key {
                    crate::bail!(
                        "foreign key `{}.{}` does not reference the primary key of `{}`",
                        table.name,
                        fk.field,
                        target.name
                    );
                }

                for column in &fk.columns {
                    if column.source.table != table.id {
                        crate::bail!(
                            "foreign key `{}.{}` uses a column of another table",
                            table.name,
                            fk.field
                        );
                    }
                }
            }
        }

        Ok(())
    }

    fn verify_foreign_key_column_types_match(&self) -> Result<()> {
        for table in &self.schema.tables {
            for fk in &table.foreign_keys {
                for column in &fk.columns {
                    let source = self.schema.column(column.source);
                    let target = self.schema.column(column.target);

                    if source.ty != target.ty {
                        crate::bail!(
                            "foreign key `{}.{}` pairs `{}` ({}) with `{}` ({})",
                            table.name,
                            fk.field,
                            source.name,
                            source.ty,
                            target.name,
                            target.ty
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
