use super::{ModelId, PrimaryKey};

/// A relationship declared by one field of a model, pointing at another
/// (or the same) model.
///
/// With no explicit `references`, the resolver synthesizes one local column
/// per primary key column of the target.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// The field on the owning model that declares the relationship
    pub field: String,

    /// Name of the target model. The target does not need to be registered
    /// before the reference is declared.
    pub target: String,

    /// Explicit (local column, target column) pairings. May be empty.
    pub references: Vec<ForeignKeyPair>,

    /// When true, the columns backing this reference are part of the owning
    /// model's primary key, so the owning key depends on the target's key.
    pub primary_key: bool,

    /// Action taken when the referenced row is deleted
    pub on_delete: ForeignKeyAction,

    /// Action taken when the referenced key is updated
    pub on_update: ForeignKeyAction,

    /// True if the constraint check is deferred to the end of the transaction.
    pub deferred: bool,

    /// Number of declared columns preceding the field on its model.
    /// Synthesized columns are placed at this position.
    pub(crate) slot: usize,

    /// Populated by the resolver.
    pub(crate) resolution: Option<Resolution>,
}

/// A single local column to target column pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyPair {
    /// Column on the owning model
    pub local: String,

    /// Primary key column on the target model
    pub target: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForeignKeyAction {
    #[default]
    NoAction,
    Restrict,
    SetNull,
    SetDefault,
    Cascade,
}

#[derive(Debug, Clone)]
pub(crate) struct Resolution {
    /// Registry identifier of the target model
    pub(crate) target: ModelId,

    /// Target key shape the pairs were computed from
    pub(crate) key: PrimaryKey,

    /// Fully specified pairs, in the target's key order
    pub(crate) pairs: Vec<ForeignKeyPair>,
}

impl ForeignKey {
    pub fn new(field: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            target: target.into(),
            references: vec![],
            primary_key: false,
            on_delete: ForeignKeyAction::default(),
            on_update: ForeignKeyAction::default(),
            deferred: false,
            slot: 0,
            resolution: None,
        }
    }

    /// Adds an explicit pairing of a local column with a target column.
    pub fn references(mut self, local: impl Into<String>, target: impl Into<String>) -> Self {
        self.references.push(ForeignKeyPair {
            local: local.into(),
            target: target.into(),
        });
        self
    }

    /// Makes the reference part of the owning model's primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }

    pub fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    /// True if no explicit pairs were declared.
    pub fn is_implicit(&self) -> bool {
        self.references.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// The column pairs backing this reference.
    ///
    /// Once resolved, this is the full pairing in the target's key order and
    /// is never empty. Before resolution it is the declared pairing.
    pub fn pairs(&self) -> &[ForeignKeyPair] {
        match &self.resolution {
            Some(resolution) => &resolution.pairs,
            None => &self.references,
        }
    }

    /// Registry identifier of the target, once resolved.
    pub fn resolved_target(&self) -> Option<ModelId> {
        self.resolution.as_ref().map(|resolution| resolution.target)
    }
}
