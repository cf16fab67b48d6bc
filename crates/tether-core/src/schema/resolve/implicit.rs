use crate::{
    schema::app::{Column, ForeignKey, ForeignKeyPair, Model, PrimaryKey},
    Error, Result,
};

/// Builds one column per target key column for a reference declared without
/// pairs.
///
/// Columns are named `<field><separator><key column>`, inherit the key
/// column's type and nullability, and are returned in the target's key order.
/// Nothing is added to `owner`; name collisions are reported up front so a
/// failed reference never leaves a partial set of columns behind.
pub(super) fn synthesize(
    owner: &Model,
    fk: &ForeignKey,
    key: &PrimaryKey,
    separator: &str,
) -> Result<Vec<(Column, ForeignKeyPair)>> {
    let mut synthesized = Vec::with_capacity(key.len());

    for key_column in &key.columns {
        let name = format!("{}{separator}{}", fk.field, key_column.name);

        if owner.column(&name).is_some() || owner.foreign_key(&name).is_some() {
            return Err(Error::duplicate_column(owner.name(), name));
        }

        let column = Column {
            name: name.clone(),
            ty: key_column.ty,
            nullable: key_column.nullable,
            primary_key: fk.primary_key,
            foreign_key: true,
            synthesized_by: Some(fk.field.clone()),
            declared_foreign_key: false,
        };

        synthesized.push((
            column,
            ForeignKeyPair {
                local: name,
                target: key_column.name.clone(),
            },
        ));
    }

    Ok(synthesized)
}
