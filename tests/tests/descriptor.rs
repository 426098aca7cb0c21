use rowbind::{
    schema::{self, Entity},
    stmt::Type,
};
use std::sync::Arc;

#[derive(Debug, Default, rowbind::Entity)]
#[entity(schema = "sales", table = "Customers", key = "Id")]
struct Customer {
    #[column("Id")]
    id: i64,

    #[column("Name")]
    name: String,

    #[column("Rating")]
    rating: Option<i32>,

    #[nested]
    address: Address,

    #[nested]
    billing: Option<Address>,

    // not mapped
    scratch: Vec<u8>,
}

#[derive(Debug, Default, rowbind::Entity)]
#[entity]
struct Address {
    #[column("City")]
    city: String,
}

#[derive(Debug, Default, rowbind::Entity)]
struct Undeclared {
    #[column]
    value: i32,
}

#[derive(Debug, Default, rowbind::Entity)]
#[entity]
struct Empty {}

#[test]
fn descriptors_are_built_once() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(schema::descriptor::<Customer>))
        .collect();

    let descriptors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for descriptor in &descriptors {
        assert!(Arc::ptr_eq(descriptor, &descriptors[0]));
        assert_eq!(descriptor.fields().len(), 3);
        assert_eq!(descriptor.nested().len(), 2);
    }

    assert!(Arc::ptr_eq(&descriptors[0], &schema::descriptor::<Customer>()));
}

#[test]
fn optional_fields_map_to_the_inner_type() {
    let descriptor = schema::descriptor::<Customer>();

    let rating = descriptor.field("Rating").unwrap();
    assert_eq!(rating.member, "rating");
    assert_eq!(rating.ty, Type::I32);
    assert!(rating.nullable);

    let id = descriptor.field("Id").unwrap();
    assert_eq!(id.ty, Type::I64);
    assert!(!id.nullable);
}

#[test]
fn declaration_is_recorded() {
    let descriptor = schema::descriptor::<Customer>();
    let declaration = descriptor.declaration().unwrap();

    assert_eq!(declaration.schema, Some("sales"));
    assert_eq!(declaration.key, Some("Id"));
    assert_eq!(descriptor.table_name(), "Customers");

    assert_eq!(schema::descriptor::<Address>().table_name(), "Address");
    assert!(Undeclared::declaration().is_none());
}

#[test]
fn bare_column_uses_the_field_name() {
    let descriptor = schema::descriptor::<Undeclared>();
    assert_eq!(descriptor.fields()[0].column, "value");
}

#[test]
fn entity_validity() {
    assert!(rowbind::is_valid_entity::<Customer>().unwrap());
    assert!(!rowbind::is_valid_entity::<Empty>().unwrap());

    let err = rowbind::is_valid_entity::<Undeclared>().unwrap_err();
    assert!(err.is_missing_declaration());
}
