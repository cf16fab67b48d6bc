use crate::{
    schema::app::{ForeignKey, ForeignKeyPair, Model, PrimaryKey},
    Error, Result,
};

/// Checks a reference's declared pairs against the target's primary key and
/// returns them in key order.
///
/// Every pair must name an existing local column and a key column of the
/// target, each key column must be covered exactly once, and the paired
/// columns must agree on type. A local column may be nullable when its
/// target is not, but not the other way around.
pub(super) fn validate(
    owner: &Model,
    fk: &ForeignKey,
    target: &Model,
    key: &PrimaryKey,
) -> Result<Vec<ForeignKeyPair>> {
    let invalid = |reason: String| Error::invalid_reference_pair(owner.name(), &fk.field, reason);

    let mut slots: Vec<Option<&ForeignKeyPair>> = vec![None; key.len()];

    for pair in &fk.references {
        let Some(local) = owner.column(&pair.local) else {
            return Err(invalid(format!(
                "local column `{}` does not exist on `{}`",
                pair.local,
                owner.name()
            )));
        };

        if target.column(&pair.target).is_none() {
            return Err(invalid(format!(
                "target column `{}` does not exist on `{}`",
                pair.target,
                target.name()
            )));
        }

        let Some(position) = key.position(&pair.target) else {
            return Err(invalid(format!(
                "`{}.{}` is not part of the primary key",
                target.name(),
                pair.target
            )));
        };

        if slots[position].is_some() {
            return Err(invalid(format!(
                "`{}.{}` is referenced more than once",
                target.name(),
                pair.target
            )));
        }

        if fk
            .references
            .iter()
            .filter(|other| other.local == pair.local)
            .count()
            > 1
        {
            return Err(invalid(format!(
                "local column `{}` is paired more than once",
                pair.local
            )));
        }

        let key_column = &key.columns[position];

        if local.ty != key_column.ty {
            return Err(invalid(format!(
                "`{}.{}` is {} but `{}.{}` is {}",
                owner.name(),
                local.name,
                local.ty,
                target.name(),
                key_column.name,
                key_column.ty
            )));
        }

        if key_column.nullable && !local.nullable {
            return Err(invalid(format!(
                "`{}.{}` must be nullable because `{}.{}` is",
                owner.name(),
                local.name,
                target.name(),
                key_column.name
            )));
        }

        if fk.primary_key && !local.primary_key {
            return Err(invalid(format!(
                "`{}.{}` must be part of the primary key of `{}`",
                owner.name(),
                local.name,
                owner.name()
            )));
        }

        slots[position] = Some(pair);
    }

    let missing: Vec<_> = key
        .columns
        .iter()
        .zip(&slots)
        .filter(|(_, slot)| slot.is_none())
        .map(|(key_column, _)| format!("`{}`", key_column.name))
        .collect();

    if !missing.is_empty() {
        return Err(invalid(format!(
            "primary key column(s) {} of `{}` not referenced",
            missing.join(", "),
            target.name()
        )));
    }

    Ok(slots.into_iter().flatten().cloned().collect())
}
