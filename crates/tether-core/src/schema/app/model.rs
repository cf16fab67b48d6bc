use super::{Column, ForeignKey, PrimaryKey, PrimaryKeyColumn};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::fmt;

/// The full description of one model: its columns, in declaration order, and
/// the foreign key references it declares.
#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the registry. Assigned on
    /// registration.
    id: ModelId,

    /// Name of the model
    name: String,

    /// If the model maps to a table with a different name, this is set.
    table_name: Option<String>,

    /// Columns keyed by name, in declaration order. Synthesized columns are
    /// appended when their reference resolves.
    columns: IndexMap<String, Column>,

    foreign_keys: Vec<ForeignKey>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub(crate) usize);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ModelId::placeholder(),
            name: name.into(),
            table_name: None,
            columns: IndexMap::new(),
            foreign_keys: vec![],
        }
    }

    /// Maps the model to an explicitly named table.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Adds a column after all previously added columns.
    pub fn add_column(&mut self, mut column: Column) -> Result<()> {
        if self.is_name_taken(&column.name) {
            return Err(Error::duplicate_column(&self.name, &column.name));
        }

        column.declared_foreign_key = column.foreign_key;
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    /// Declares a foreign key reference. The field name shares the column
    /// namespace.
    ///
    /// Columns synthesized for the reference take the field's place in the
    /// declaration order: after the columns added before it and before the
    /// columns added after it.
    pub fn add_foreign_key(&mut self, mut foreign_key: ForeignKey) -> Result<()> {
        if self.is_name_taken(&foreign_key.field) {
            return Err(Error::duplicate_column(&self.name, &foreign_key.field));
        }

        foreign_key.slot = self.declared_columns().count();
        self.foreign_keys.push(foreign_key);
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.values()
    }

    /// Iterate the columns flagged as key, in declaration order.
    pub fn primary_key_columns(&self) -> Result<impl Iterator<Item = &Column> + '_> {
        if !self.columns.values().any(|column| column.primary_key) {
            return Err(Error::missing_primary_key(&self.name));
        }

        Ok(self.columns.values().filter(|column| column.primary_key))
    }

    /// Snapshot of the current primary key shape.
    pub fn primary_key(&self) -> Result<PrimaryKey> {
        Ok(PrimaryKey {
            columns: self
                .primary_key_columns()?
                .map(PrimaryKeyColumn::from)
                .collect(),
        })
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub fn foreign_key(&self, field: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.field == field)
    }

    /// True once every reference contributing to the primary key has been
    /// resolved. Only then can other references rely on the key's shape.
    pub fn is_key_final(&self) -> bool {
        self.foreign_keys
            .iter()
            .filter(|fk| fk.primary_key)
            .all(ForeignKey::is_resolved)
    }

    pub(crate) fn set_id(&mut self, id: ModelId) {
        self.id = id;
    }

    pub(crate) fn foreign_key_mut(&mut self, index: usize) -> &mut ForeignKey {
        &mut self.foreign_keys[index]
    }

    /// Adds the columns synthesized for a reference at the reference's
    /// declaration slot.
    pub(crate) fn add_synthesized(&mut self, columns: Vec<Column>) -> Result<()> {
        for column in columns {
            self.add_column(column)?;
        }

        self.arrange_columns();
        Ok(())
    }

    /// Removes the columns synthesized for `field`, returning how many were
    /// removed.
    pub(crate) fn remove_synthesized(&mut self, field: &str) -> usize {
        let before = self.columns.len();
        self.columns
            .retain(|_, column| column.synthesized_by.as_deref() != Some(field));
        before - self.columns.len()
    }

    /// Recomputes which columns are the source of a reference: declared as
    /// such, synthesized, or paired by a resolved reference.
    pub(crate) fn sync_foreign_key_flags(&mut self) {
        let mut referenced = vec![];

        for fk in &self.foreign_keys {
            if fk.is_resolved() {
                referenced.extend(fk.pairs().iter().map(|pair| pair.local.clone()));
            }
        }

        for column in self.columns.values_mut() {
            column.foreign_key = column.declared_foreign_key
                || column.is_synthesized()
                || referenced.contains(&column.name);
        }
    }

    /// Sorts synthesized columns into the slot of the reference that produced
    /// them. Declared columns keep their relative order, and so do the
    /// columns of a single reference.
    fn arrange_columns(&mut self) {
        let mut declared = 0;
        let mut entries = Vec::with_capacity(self.columns.len());

        for (name, column) in std::mem::take(&mut self.columns) {
            let position = match &column.synthesized_by {
                Some(field) => {
                    match self.foreign_keys.iter().position(|fk| fk.field == *field) {
                        Some(index) => (self.foreign_keys[index].slot, 0, index),
                        None => (usize::MAX, 0, usize::MAX),
                    }
                }
                None => {
                    declared += 1;
                    (declared - 1, 1, 0)
                }
            };

            entries.push((position, name, column));
        }

        entries.sort_by_key(|(position, ..)| *position);
        self.columns = entries
            .into_iter()
            .map(|(_, name, column)| (name, column))
            .collect();
    }

    fn declared_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.values().filter(|column| !column.is_synthesized())
    }

    fn is_name_taken(&self, name: &str) -> bool {
        self.columns.contains_key(name) || self.foreign_keys.iter().any(|fk| fk.field == name)
    }
}

impl ModelId {
    pub(crate) const fn placeholder() -> Self {
        Self(usize::MAX)
    }

    /// Position of the model in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
