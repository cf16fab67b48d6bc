use pretty_assertions::assert_eq;
use tether_core::schema::app::*;
use tether_core::{Builder, Registry};

fn parent(key: &[(&str, ColumnTy)]) -> Model {
    let mut model = Model::new("Parent");
    for (name, ty) in key {
        model
            .add_column(Column::new(*name, *ty).primary_key())
            .unwrap();
    }
    model
}

fn registry() -> Registry {
    let mut child = Model::new("Child");
    child
        .add_column(Column::new("id", ColumnTy::Integer).primary_key())
        .unwrap();
    child
        .add_foreign_key(ForeignKey::new("parent", "Parent"))
        .unwrap();
    child
        .add_column(Column::new("note", ColumnTy::Text).nullable())
        .unwrap();

    let mut registry = Registry::new();
    registry.register(child).unwrap();
    registry
        .register(parent(&[("id", ColumnTy::Integer)]))
        .unwrap();
    registry
}

fn column_names(registry: &Registry, model: &str) -> Vec<String> {
    registry
        .lookup(model)
        .unwrap()
        .columns()
        .map(|column| column.name.clone())
        .collect()
}

#[test]
fn changed_target_key_is_resolved_again() {
    let mut registry = registry();
    registry.resolve().unwrap();
    assert_eq!(column_names(&registry, "Child"), ["id", "parent_id", "note"]);

    registry
        .replace(parent(&[("id", ColumnTy::Integer), ("rev", ColumnTy::Integer)]))
        .unwrap();

    registry.resolve().unwrap();

    // Columns synthesized again land where the reference was declared
    assert_eq!(
        column_names(&registry, "Child"),
        ["id", "parent_id", "parent_rev", "note"]
    );

    let fk = registry
        .lookup("Child")
        .unwrap()
        .foreign_key("parent")
        .unwrap();
    assert_eq!(fk.pairs().len(), 2);
}

#[test]
fn assembling_a_stale_registry_fails() {
    let mut registry = registry();
    registry.resolve().unwrap();

    registry
        .replace(parent(&[("id", ColumnTy::Integer), ("rev", ColumnTy::Integer)]))
        .unwrap();

    let err = Builder::new().assemble(&registry).unwrap_err();
    assert!(err.is_unresolved_references());
    assert_eq!(
        err.to_string(),
        "unresolved foreign key references: `Child.parent`"
    );
}

#[test]
fn failed_re_resolution_keeps_previous_state() {
    let mut registry = registry();
    registry.resolve().unwrap();

    // The new key is text, and the replacement's own reference collides
    // with a declared column.
    let mut broken = parent(&[("id", ColumnTy::Text)]);
    broken
        .add_column(Column::new("owner_id", ColumnTy::Integer))
        .unwrap();
    broken
        .add_foreign_key(ForeignKey::new("owner", "Parent"))
        .unwrap();
    registry.replace(broken).unwrap();

    let before = column_names(&registry, "Child");
    let err = registry.resolve().unwrap_err();
    assert!(err.is_duplicate_column());

    assert_eq!(column_names(&registry, "Child"), before);
    assert_eq!(
        registry
            .lookup("Child")
            .unwrap()
            .column("parent_id")
            .unwrap()
            .ty,
        ColumnTy::Integer
    );
}

#[test]
fn staleness_propagates_through_key_references() {
    // Line's key comes from Order; Shipment references Line.
    let mut order = Model::new("Order");
    order
        .add_column(Column::new("id", ColumnTy::Integer).primary_key())
        .unwrap();

    let mut line = Model::new("Line");
    line.add_foreign_key(ForeignKey::new("order", "Order").primary_key())
        .unwrap();

    let mut shipment = Model::new("Shipment");
    shipment
        .add_column(Column::new("id", ColumnTy::Integer).primary_key())
        .unwrap();
    shipment
        .add_foreign_key(ForeignKey::new("line", "Line"))
        .unwrap();

    let mut registry = Registry::new();
    registry.register(order).unwrap();
    registry.register(line).unwrap();
    registry.register(shipment).unwrap();
    registry.resolve().unwrap();
    assert_eq!(column_names(&registry, "Shipment"), ["id", "line_order_id"]);

    let mut order = Model::new("Order");
    order
        .add_column(Column::new("id", ColumnTy::Integer).primary_key())
        .unwrap();
    order
        .add_column(Column::new("region", ColumnTy::Text).primary_key())
        .unwrap();
    registry.replace(order).unwrap();
    registry.resolve().unwrap();

    assert_eq!(
        column_names(&registry, "Line"),
        ["order_id", "order_region"]
    );
    assert_eq!(
        column_names(&registry, "Shipment"),
        ["id", "line_order_id", "line_order_region"]
    );
}
