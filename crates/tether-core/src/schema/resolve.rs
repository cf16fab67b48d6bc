mod explicit;
mod implicit;

use super::{
    app::{ForeignKey, ForeignKeyPair, ModelId, Resolution},
    Registry,
};
use crate::{Error, Result};

use tracing::{debug, trace};

/// Separator placed between the field name and the target key column name
/// when synthesizing reference columns.
pub(crate) const DEFAULT_SEPARATOR: &str = "_";

/// Turns every foreign key reference in a [`Registry`] into a fully specified
/// column pairing.
///
/// References with explicit pairs are validated against the target's primary
/// key. References without pairs get one synthesized column per target key
/// column, named `<field><separator><key column>`, in the target's key order.
///
/// Resolution runs as a fixed-point iteration: a reference is resolved only
/// once its target is registered and the target's primary key is final (every
/// reference contributing to that key is resolved). Declaration and
/// registration order therefore do not affect the result.
#[derive(Debug, Clone)]
pub struct Resolver {
    separator: String,
}

/// Identifies a foreign key by its owning model and position in that model's
/// reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReferenceId {
    model: ModelId,
    index: usize,
}

enum Attempt {
    Resolved,
    Deferred,
}

/// Tracks state for one resolution run
struct ResolveRegistry<'a> {
    separator: &'a str,
    registry: &'a mut Registry,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Sets the separator used in synthesized column names.
    pub fn separator(&mut self, separator: &str) -> &mut Self {
        self.separator = separator.to_string();
        self
    }

    /// Resolves all references in the registry.
    ///
    /// Running this again on an already resolved registry changes nothing,
    /// unless a target key changed in between, in which case the affected
    /// references are resolved again against the new key.
    ///
    /// On failure the registry is left exactly as it was passed in.
    pub fn resolve(&self, registry: &mut Registry) -> Result<()> {
        let mut resolved = registry.clone();

        ResolveRegistry {
            separator: &self.separator,
            registry: &mut resolved,
        }
        .run()?;

        *registry = resolved;
        Ok(())
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveRegistry<'_> {
    fn run(&mut self) -> Result<()> {
        self.invalidate_stale();

        let mut pending = self.unresolved();

        // Every productive pass finalizes the key of at least one more model,
        // so the number of passes needed is bounded by the model count.
        let max_passes = self.registry.len() + 1;
        let mut passes = 0;

        while !pending.is_empty() && passes < max_passes {
            passes += 1;
            trace!(pass = passes, pending = pending.len(), "resolution pass");

            let before = pending.len();
            let mut deferred = vec![];

            for reference in pending {
                if let Attempt::Deferred = self.attempt(reference)? {
                    deferred.push(reference);
                }
            }

            pending = deferred;

            if pending.len() == before {
                break;
            }
        }

        if !pending.is_empty() {
            return Err(self.stalled(&pending));
        }

        for model in self.registry.models() {
            let _ = model.primary_key_columns()?;
        }

        debug!(
            models = self.registry.len(),
            passes, "resolved foreign key references"
        );

        Ok(())
    }

    fn unresolved(&self) -> Vec<ReferenceId> {
        let mut references = vec![];

        for model in self.registry.models() {
            for (index, fk) in model.foreign_keys().iter().enumerate() {
                if !fk.is_resolved() {
                    references.push(ReferenceId {
                        model: model.id(),
                        index,
                    });
                }
            }
        }

        references
    }

    fn attempt(&mut self, reference: ReferenceId) -> Result<Attempt> {
        let owner = self.registry.model(reference.model);
        let fk = &owner.foreign_keys()[reference.index];

        let Some(target_id) = self.registry.id_of(&fk.target) else {
            trace!(
                model = owner.name(),
                field = %fk.field,
                target = %fk.target,
                "target not registered; deferring"
            );
            return Ok(Attempt::Deferred);
        };

        let target = self.registry.model(target_id);

        if !target.is_key_final() {
            trace!(
                model = owner.name(),
                field = %fk.field,
                target = %fk.target,
                "target key not final; deferring"
            );
            return Ok(Attempt::Deferred);
        }

        let key = target.primary_key()?;

        let pairs = if fk.is_implicit() {
            let (columns, pairs): (Vec<_>, Vec<_>) =
                implicit::synthesize(owner, fk, &key, self.separator)?
                    .into_iter()
                    .unzip();

            self.registry
                .model_mut(reference.model)
                .add_synthesized(columns)?;

            pairs
        } else {
            explicit::validate(owner, fk, target, &key)?
        };

        let owner = self.registry.model_mut(reference.model);
        let owner_name = owner.name().to_string();
        let fk = owner.foreign_key_mut(reference.index);

        debug!(
            model = %owner_name,
            field = %fk.field,
            target = %fk.target,
            implicit = fk.is_implicit(),
            columns = ?pairs_locals(&pairs),
            "resolved foreign key"
        );

        fk.resolution = Some(Resolution {
            target: target_id,
            key,
            pairs,
        });
        owner.sync_foreign_key_flags();

        Ok(Attempt::Resolved)
    }

    /// Drops every resolution whose target key no longer has the shape it was
    /// resolved against, along with the columns it synthesized.
    ///
    /// Dropping a key-participating resolution changes its owner's key, so
    /// this repeats until nothing else goes stale.
    fn invalidate_stale(&mut self) {
        loop {
            let mut stale = vec![];

            for model in self.registry.models() {
                for (index, fk) in model.foreign_keys().iter().enumerate() {
                    if is_stale(self.registry, fk) {
                        stale.push(ReferenceId {
                            model: model.id(),
                            index,
                        });
                    }
                }
            }

            if stale.is_empty() {
                return;
            }

            for reference in stale {
                let owner = self.registry.model_mut(reference.model);
                let field = owner.foreign_keys()[reference.index].field.clone();
                let removed = owner.remove_synthesized(&field);
                owner.foreign_key_mut(reference.index).resolution = None;
                owner.sync_foreign_key_flags();

                debug!(
                    model = owner.name(),
                    field = %field,
                    removed,
                    "target key changed; resolving again"
                );
            }
        }
    }

    /// Builds the error for a run that stopped making progress.
    ///
    /// A deferred reference either targets an unregistered model or waits on
    /// a key that is itself waiting on an unresolved key reference. Following
    /// those key references must revisit a model, which is the cycle.
    fn stalled(&self, pending: &[ReferenceId]) -> Error {
        for reference in pending {
            let owner = self.registry.model(reference.model);
            let fk = &owner.foreign_keys()[reference.index];

            if !self.registry.contains(&fk.target) {
                return Error::unknown_target_model(owner.name(), &fk.field, &fk.target);
            }
        }

        let first = &self.registry.model(pending[0].model).foreign_keys()[pending[0].index];
        let mut current = match self.registry.id_of(&first.target) {
            Some(id) => id,
            None => return crate::err!("resolution stalled on `{}`", first.target),
        };
        let mut path: Vec<(ModelId, String)> = vec![];

        loop {
            if let Some(start) = path.iter().position(|(model, _)| *model == current) {
                let mut cycle: Vec<String> =
                    path.drain(start..).map(|(_, step)| step).collect();
                cycle.push(cycle[0].clone());
                return Error::cyclic_key_dependency(cycle);
            }

            let model = self.registry.model(current);
            let Some(fk) = model
                .foreign_keys()
                .iter()
                .find(|fk| fk.primary_key && !fk.is_resolved())
            else {
                return crate::err!(
                    "resolution stalled on `{}` without a pending key reference",
                    model.name()
                );
            };

            path.push((current, format!("{}.{}", model.name(), fk.field)));

            current = match self.registry.id_of(&fk.target) {
                Some(id) => id,
                None => {
                    return Error::unknown_target_model(model.name(), &fk.field, &fk.target)
                }
            };
        }
    }
}

/// True if `fk` was resolved against a key shape its target no longer has.
pub(crate) fn is_stale(registry: &Registry, fk: &ForeignKey) -> bool {
    let Some(resolution) = &fk.resolution else {
        return false;
    };

    match registry.model(resolution.target).primary_key() {
        Ok(key) => key != resolution.key,
        Err(_) => true,
    }
}

fn pairs_locals(pairs: &[ForeignKeyPair]) -> Vec<&str> {
    pairs.iter().map(|pair| pair.local.as_str()).collect()
}
