use crate::support::*;
use graphql_kernel::ast;
use graphql_kernel::ast::OperationType;
use graphql_kernel::ast::Value;
use graphql_kernel::Schema;
use graphql_kernel::SchemaBuilder;

fn base_schema() -> Schema {
    Schema::from_document(&doc(vec![object_type(
        "Query",
        &[],
        vec![field("a", named("Int"))],
    )]))
    .unwrap()
}

fn extend_query_with_b() -> ast::Definition {
    ast::ObjectTypeExtension {
        name: name("Query"),
        implements_interfaces: vec![],
        directives: vec![],
        fields: vec![field("b", named("Int")).into()],
    }
    .into()
}

#[test]
fn extension_appends_fields_without_touching_the_input_schema() {
    let schema = base_schema();
    let before = schema.clone();

    let extended = schema.extend(&doc(vec![extend_query_with_b()])).unwrap();

    let extended_fields: Vec<&str> = extended
        .get_object("Query")
        .unwrap()
        .fields
        .keys()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(extended_fields, ["a", "b"]);

    // The input schema is untouched, and still structurally equal
    // to its state before the extension
    let original_fields: Vec<&str> = schema
        .get_object("Query")
        .unwrap()
        .fields
        .keys()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(original_fields, ["a"]);
    assert_eq!(schema, before);
}

#[test]
fn extension_components_remember_their_origin() {
    let schema = base_schema();
    let extended = schema.extend(&doc(vec![extend_query_with_b()])).unwrap();
    let query = extended.get_object("Query").unwrap();
    assert!(query.fields["a"].origin.extension_id().is_none());
    assert!(query.fields["b"].origin.extension_id().is_some());
    assert_eq!(query.extension_ast_nodes.len(), 1);
}

#[test]
fn extending_with_nothing_new_yields_an_equal_schema() {
    let schema = base_schema();

    let extended = schema.extend(&ast::Document::new()).unwrap();
    assert_eq!(extended, schema);

    // Executable definitions do not contribute anything either
    let extended = schema
        .extend(&doc(vec![
            query(vec![sel("a")]),
            fragment_def("F", "Query", vec![sel("a")]),
        ]))
        .unwrap();
    assert_eq!(extended, schema);
}

#[test]
fn extension_appends_union_members_and_enum_values() {
    let schema = Schema::from_document(&doc(vec![
        object_type("Query", &[], vec![field("pet", named("Pet"))]),
        object_type("Dog", &[], vec![field("name", named("String"))]),
        object_type("Cat", &[], vec![field("name", named("String"))]),
        union_type("Pet", &["Dog"]),
        enum_type("Mood", &["HAPPY"]),
    ]))
    .unwrap();

    let union_extension: ast::Definition = ast::UnionTypeExtension {
        name: name("Pet"),
        directives: vec![],
        members: vec![name("Cat"), name("Dog")],
    }
    .into();
    let enum_extension: ast::Definition = ast::EnumTypeExtension {
        name: name("Mood"),
        directives: vec![],
        values: vec![ast::EnumValueDefinition {
            description: None,
            value: name("GRUMPY"),
            directives: vec![],
        }
        .into()],
    }
    .into();
    let extended = schema
        .extend(&doc(vec![union_extension, enum_extension]))
        .unwrap();

    // Members keep definition order; the duplicate `Dog` keeps its first entry
    let members: Vec<&str> = extended
        .get_union("Pet")
        .unwrap()
        .members
        .iter()
        .map(|member| member.as_str())
        .collect();
    assert_eq!(members, ["Dog", "Cat"]);

    let values: Vec<&str> = extended
        .get_enum("Mood")
        .unwrap()
        .values
        .keys()
        .map(|value| value.as_str())
        .collect();
    assert_eq!(values, ["HAPPY", "GRUMPY"]);
}

#[test]
fn extension_overwrites_specified_by_url() {
    let schema = Schema::from_document(&doc(vec![
        object_type("Query", &[], vec![field("a", named("Url"))]),
        scalar_type(
            "Url",
            vec![directive(
                "specifiedBy",
                vec![("url", Value::string("https://example.com/v1"))],
            )],
        ),
    ]))
    .unwrap();
    let extension: ast::Definition = ast::ScalarTypeExtension {
        name: name("Url"),
        directives: vec![directive(
            "specifiedBy",
            vec![("url", Value::string("https://example.com/v2"))],
        )
        .into()],
    }
    .into();
    let extended = schema.extend(&doc(vec![extension])).unwrap();
    assert_eq!(
        extended.get_scalar("Url").unwrap().specified_by_url.as_deref(),
        Some("https://example.com/v2")
    );
    // The input schema still carries the original URL
    assert_eq!(
        schema.get_scalar("Url").unwrap().specified_by_url.as_deref(),
        Some("https://example.com/v1")
    );
}

#[test]
fn schema_extension_overrides_root_operations() {
    let schema = base_schema();
    let extension: ast::Definition = ast::SchemaExtension {
        directives: vec![],
        root_operations: vec![(OperationType::Mutation, name("M"))],
    }
    .into();
    let extended = schema
        .extend(&doc(vec![
            object_type("M", &[], vec![field("set", named("Int"))]),
            extension,
        ]))
        .unwrap();
    assert_eq!(extended.mutation_type.as_ref().unwrap().as_str(), "M");
    assert_eq!(extended.query_type.as_ref().unwrap().as_str(), "Query");
    assert!(schema.mutation_type.is_none());
}

#[test]
fn duplicate_field_from_extension_wins_but_keeps_position() {
    let extension: ast::Definition = ast::ObjectTypeExtension {
        name: name("Query"),
        implements_interfaces: vec![],
        directives: vec![],
        fields: vec![field("a", named("String")).into()],
    }
    .into();
    // The duplicate is a validation error, so build without validating
    let schema = SchemaBuilder::extending(&base_schema())
        .assume_valid()
        .build(&doc(vec![extension]))
        .unwrap();
    let query = schema.get_object("Query").unwrap();
    let field_names: Vec<&str> = query.fields.keys().map(|name| name.as_str()).collect();
    assert_eq!(field_names, ["a"]);
    assert_eq!(query.fields["a"].ty, named("String"));

    // The assume-valid flag short-circuits validation entirely
    assert!(schema.validate().is_ok());
    assert!(schema.assume_valid);
}

#[test]
fn new_directive_definitions_are_appended() {
    let schema = base_schema();
    let directive_def: ast::Definition = ast::DirectiveDefinition {
        description: None,
        name: name("tag"),
        arguments: vec![arg("value", named("String")).into()],
        repeatable: true,
        locations: vec![ast::DirectiveLocation::FieldDefinition],
    }
    .into();
    let extended = schema.extend(&doc(vec![directive_def])).unwrap();
    assert!(extended.directive_definitions.contains_key("tag"));
    assert!(!schema.directive_definitions.contains_key("tag"));
    // Built-ins are still first and unchanged
    assert_eq!(
        extended.directive_definitions.keys().next().unwrap().as_str(),
        "skip"
    );
}
