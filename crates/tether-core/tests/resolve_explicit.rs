use tether_core::schema::app::*;
use tether_core::Registry;

fn parent() -> Model {
    let mut model = Model::new("Parent");
    model
        .add_column(Column::new("code", ColumnTy::Text).primary_key())
        .unwrap();
    model
        .add_column(Column::new("rev", ColumnTy::Integer).primary_key())
        .unwrap();
    model
        .add_column(Column::new("title", ColumnTy::Text))
        .unwrap();
    model
}

fn child(columns: Vec<Column>, fk: ForeignKey) -> Model {
    let mut model = Model::new("Child");
    model
        .add_column(Column::new("id", ColumnTy::Integer).primary_key())
        .unwrap();
    for column in columns {
        model.add_column(column).unwrap();
    }
    model.add_foreign_key(fk).unwrap();
    model
}

fn local_columns() -> Vec<Column> {
    vec![
        Column::new("localCode", ColumnTy::Text).foreign_key(),
        Column::new("localRev", ColumnTy::Integer).foreign_key(),
    ]
}

fn resolve(child: Model) -> tether_core::Result<Registry> {
    let mut registry = Registry::new();
    registry.register(parent())?;
    registry.register(child)?;
    registry.resolve()?;
    Ok(registry)
}

fn resolve_err(child: Model) -> tether_core::Error {
    match resolve(child) {
        Ok(_) => panic!("expected resolution to fail"),
        Err(err) => err,
    }
}

#[test]
fn full_explicit_pairing_is_normalized_to_key_order() {
    let registry = resolve(child(
        local_columns(),
        ForeignKey::new("parent", "Parent")
            .references("localRev", "rev")
            .references("localCode", "code"),
    ))
    .unwrap();

    let child = registry.lookup("Child").unwrap();
    let fk = child.foreign_key("parent").unwrap();
    let pairs: Vec<_> = fk
        .pairs()
        .iter()
        .map(|pair| (pair.local.as_str(), pair.target.as_str()))
        .collect();
    assert_eq!(pairs, [("localCode", "code"), ("localRev", "rev")]);

    // Explicit references never synthesize columns
    assert!(child.columns().all(|column| !column.is_synthesized()));
    assert_eq!(child.columns().len(), 3);
}

#[test]
fn partial_composite_pairing() {
    let err = resolve_err(child(
        local_columns(),
        ForeignKey::new("parent", "Parent").references("localCode", "code"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert_eq!(
        err.to_string(),
        "invalid reference pair on `Child.parent`: primary key column(s) `rev` of `Parent` not referenced"
    );
}

#[test]
fn local_column_must_exist() {
    let err = resolve_err(child(
        vec![],
        ForeignKey::new("parent", "Parent")
            .references("localCode", "code")
            .references("localRev", "rev"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert!(err
        .to_string()
        .contains("local column `localCode` does not exist on `Child`"));
}

#[test]
fn target_column_must_exist() {
    let err = resolve_err(child(
        local_columns(),
        ForeignKey::new("parent", "Parent")
            .references("localCode", "slug")
            .references("localRev", "rev"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert!(err
        .to_string()
        .contains("target column `slug` does not exist on `Parent`"));
}

#[test]
fn target_column_must_be_in_primary_key() {
    let err = resolve_err(child(
        local_columns(),
        ForeignKey::new("parent", "Parent")
            .references("localCode", "title")
            .references("localRev", "rev"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert!(err
        .to_string()
        .contains("`Parent.title` is not part of the primary key"));
}

#[test]
fn key_column_referenced_twice() {
    let err = resolve_err(child(
        local_columns(),
        ForeignKey::new("parent", "Parent")
            .references("localCode", "code")
            .references("localRev", "code"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert!(err.to_string().contains("referenced more than once"));
}

#[test]
fn local_column_paired_twice() {
    let err = resolve_err(child(
        local_columns(),
        ForeignKey::new("parent", "Parent")
            .references("localCode", "code")
            .references("localCode", "rev"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert!(err.to_string().contains("paired more than once"));
}

#[test]
fn types_must_match() {
    let err = resolve_err(child(
        vec![
            Column::new("localCode", ColumnTy::Blob),
            Column::new("localRev", ColumnTy::Integer),
        ],
        ForeignKey::new("parent", "Parent")
            .references("localCode", "code")
            .references("localRev", "rev"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert!(err
        .to_string()
        .contains("`Child.localCode` is blob but `Parent.code` is text"));
}

#[test]
fn paired_local_columns_become_foreign_keys() {
    let mut registry = resolve(child(
        vec![
            Column::new("localCode", ColumnTy::Text).nullable(),
            Column::new("localRev", ColumnTy::Integer).nullable(),
            Column::new("label", ColumnTy::Text),
        ],
        ForeignKey::new("parent", "Parent")
            .references("localCode", "code")
            .references("localRev", "rev"),
    ))
    .unwrap();

    let flags = |registry: &Registry| -> Vec<(String, bool)> {
        registry
            .lookup("Child")
            .unwrap()
            .columns()
            .map(|column| (column.name.clone(), column.foreign_key))
            .collect()
    };

    let expected = vec![
        ("id".to_string(), false),
        ("localCode".to_string(), true),
        ("localRev".to_string(), true),
        ("label".to_string(), false),
    ];
    assert_eq!(flags(&registry), expected);

    // Making `code` nullable changes the key shape, so the reference is
    // dropped and resolved again.
    let mut relaxed = Model::new("Parent");
    relaxed
        .add_column(Column::new("code", ColumnTy::Text).primary_key().nullable())
        .unwrap();
    relaxed
        .add_column(Column::new("rev", ColumnTy::Integer).primary_key())
        .unwrap();
    registry.replace(relaxed).unwrap();
    registry.resolve().unwrap();
    assert_eq!(flags(&registry), expected);
}

#[test]
fn nullable_local_column_is_compatible() {
    let registry = resolve(child(
        vec![
            Column::new("localCode", ColumnTy::Text).nullable(),
            Column::new("localRev", ColumnTy::Integer).nullable(),
        ],
        ForeignKey::new("parent", "Parent")
            .references("localCode", "code")
            .references("localRev", "rev"),
    ))
    .unwrap();

    assert!(registry
        .lookup("Child")
        .unwrap()
        .foreign_key("parent")
        .unwrap()
        .is_resolved());
}

#[test]
fn nullable_target_requires_nullable_local() {
    let mut target = Model::new("Parent");
    target
        .add_column(Column::new("id", ColumnTy::Integer).primary_key().nullable())
        .unwrap();

    let mut registry = Registry::new();
    registry.register(target).unwrap();
    registry
        .register(child(
            vec![Column::new("parent_ref", ColumnTy::Integer)],
            ForeignKey::new("parent", "Parent").references("parent_ref", "id"),
        ))
        .unwrap();

    let err = registry.resolve().unwrap_err();
    assert!(err.is_invalid_reference_pair());
    assert!(err.to_string().contains("must be nullable"));
}

#[test]
fn key_participating_explicit_reference_needs_key_columns() {
    let err = resolve_err(child(
        local_columns(),
        ForeignKey::new("parent", "Parent")
            .primary_key()
            .references("localCode", "code")
            .references("localRev", "rev"),
    ));

    assert!(err.is_invalid_reference_pair());
    assert!(err
        .to_string()
        .contains("`Child.localCode` must be part of the primary key of `Child`"));
}
