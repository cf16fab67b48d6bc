use super::{
    app::{Model, ModelId},
    Resolver,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use tracing::debug;

/// Every model known to a schema build, in registration order.
///
/// Registration (or replacing a registered model by name) is the only way
/// models enter or change in the build. Otherwise the resolver is the only
/// writer, and only to add the columns it synthesizes.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    models: IndexMap<String, Model>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model, assigning its [`ModelId`].
    ///
    /// Models may be registered in any order; references to models that are
    /// not yet registered are resolved later.
    pub fn register(&mut self, mut model: Model) -> Result<ModelId> {
        if self.models.contains_key(model.name()) {
            return Err(Error::duplicate_model(model.name()));
        }

        let id = ModelId(self.models.len());
        model.set_id(id);

        debug!(
            model = model.name(),
            id = id.0,
            columns = model.columns().len(),
            foreign_keys = model.foreign_keys().len(),
            "registered model"
        );

        self.models.insert(model.name().to_string(), model);
        Ok(id)
    }

    /// Get a model by name
    pub fn lookup(&self, name: &str) -> Result<&Model> {
        self.models
            .get(name)
            .ok_or_else(|| Error::unknown_model(name))
    }

    /// Replaces a registered model with a new declaration of the same name.
    ///
    /// The model keeps its [`ModelId`]. Its own references start unresolved,
    /// and references to it that were resolved against a key it no longer
    /// has are resolved again by the next resolution run.
    pub fn replace(&mut self, mut model: Model) -> Result<ModelId> {
        let Some(id) = self.id_of(model.name()) else {
            return Err(Error::unknown_model(model.name()));
        };

        model.set_id(id);

        debug!(
            model = model.name(),
            id = id.0,
            columns = model.columns().len(),
            foreign_keys = model.foreign_keys().len(),
            "replaced model"
        );

        *self.model_mut(id) = model;
        Ok(id)
    }

    /// Get a model by ID
    ///
    /// # Panics
    ///
    /// Panics if `id` was not assigned by this registry.
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models
            .get_index(id.into().0)
            .map(|(_, model)| model)
            .expect("invalid model ID")
    }

    /// Get a model by ID, if `id` belongs to this registry.
    pub fn get(&self, id: impl Into<ModelId>) -> Option<&Model> {
        self.models
            .get_index(id.into().0)
            .map(|(_, model)| model)
    }

    pub(crate) fn model_mut(&mut self, id: impl Into<ModelId>) -> &mut Model {
        self.models
            .get_index_mut(id.into().0)
            .map(|(_, model)| model)
            .expect("invalid model ID")
    }

    pub fn id_of(&self, name: &str) -> Option<ModelId> {
        self.models.get_index_of(name).map(ModelId)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// All models, in registration order.
    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> + '_ {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Resolves every foreign key reference using the default options.
    ///
    /// See [`Resolver`] for the resolution rules.
    pub fn resolve(&mut self) -> Result<()> {
        Resolver::new().resolve(self)
    }
}
