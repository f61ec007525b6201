use crate::support::*;
use graphql_kernel::ast;
use graphql_kernel::ast::Type;
use graphql_kernel::ast::Value;
use graphql_kernel::Schema;
use graphql_kernel::SchemaError;
use graphql_kernel::TypeSystemError;

/// Build the document and return the collected validation diagnostics,
/// panicking if the build itself failed or validation passed
fn diagnostics(definitions: Vec<ast::Definition>) -> Vec<TypeSystemError> {
    match Schema::from_document(&doc(definitions)) {
        Err(SchemaError::Validation(list)) => {
            list.into_iter().map(|diagnostic| diagnostic.error).collect()
        }
        Err(SchemaError::Build(error)) => panic!("build failed before validation: {error}"),
        Ok(_) => panic!("expected validation to fail"),
    }
}

#[test]
fn interface_argument_types_are_invariant() {
    let errors = diagnostics(vec![
        interface_type(
            "I",
            &[],
            vec![field_with_args(
                "f",
                named("Int"),
                vec![arg("x", named("Int").non_null())],
            )],
        ),
        object_type(
            "Query",
            &["I"],
            vec![field_with_args("f", named("Int"), vec![arg("x", named("Int"))])],
        ),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::InterfaceArgMismatch {
            implementer,
            interface,
            field,
            argument,
            ..
        } if implementer == "Query"
            && interface == "I"
            && field == "f"
            && argument == "x"
    )));
}

#[test]
fn additional_arguments_must_not_be_required() {
    let errors = diagnostics(vec![
        interface_type(
            "I",
            &[],
            vec![field_with_args(
                "f",
                named("Int"),
                vec![arg("x", named("Int").non_null())],
            )],
        ),
        object_type(
            "Query",
            &["I"],
            vec![field_with_args(
                "f",
                named("Int"),
                vec![
                    arg("x", named("Int").non_null()),
                    arg("y", named("Int").non_null()),
                ],
            )],
        ),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::ExtraRequiredArgument {
            implementer,
            field,
            argument,
            ..
        } if implementer == "Query" && field == "f" && argument == "y"
    )));
}

#[test]
fn additional_arguments_may_be_nullable_or_defaulted() {
    let schema = Schema::from_document(&doc(vec![
        interface_type("I", &[], vec![field("f", named("Int"))]),
        object_type(
            "Query",
            &["I"],
            vec![field_with_args(
                "f",
                named("Int"),
                vec![
                    arg("nullable", named("Int")),
                    arg_with_default("defaulted", named("Int").non_null(), Value::Int(0)),
                ],
            )],
        ),
    ]));
    assert!(schema.is_ok());
}

#[test]
fn interface_field_types_are_covariant() {
    // Dog! is a valid implementation type for a field declared as Pet,
    // and [Dog!]! for a field declared as [Pet]
    let schema = Schema::from_document(&doc(vec![
        interface_type("Pet", &[], vec![field("nickname", named("String"))]),
        object_type("Dog", &["Pet"], vec![field("nickname", named("String"))]),
        interface_type(
            "HasPets",
            &[],
            vec![
                field("favorite", named("Pet")),
                field("all", named("Pet").list()),
            ],
        ),
        object_type(
            "Query",
            &["HasPets"],
            vec![
                field("favorite", named("Dog").non_null()),
                field("all", named("Dog").non_null().list().non_null()),
            ],
        ),
    ]));
    assert!(schema.is_ok(), "covariant implementation must validate");
}

#[test]
fn interface_field_type_mismatch_is_reported() {
    let errors = diagnostics(vec![
        interface_type("I", &[], vec![field("f", named("Int"))]),
        object_type("Query", &["I"], vec![field("f", named("String"))]),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::InterfaceFieldTypeMismatch { found, expected, .. }
            if *found == named("String") && *expected == named("Int")
    )));
}

#[test]
fn nullable_implementation_of_non_null_interface_field_is_rejected() {
    let errors = diagnostics(vec![
        interface_type("I", &[], vec![field("f", named("Int").non_null())]),
        object_type("Query", &["I"], vec![field("f", named("Int"))]),
    ]);
    assert!(errors
        .iter()
        .any(|error| matches!(error, TypeSystemError::InterfaceFieldTypeMismatch { .. })));
}

#[test]
fn missing_interface_field_is_reported() {
    let errors = diagnostics(vec![
        interface_type("I", &[], vec![field("f", named("Int"))]),
        object_type("Query", &["I"], vec![field("other", named("Int"))]),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::MissingInterfaceField { implementer, field, .. }
            if implementer == "Query" && field == "f"
    )));
}

#[test]
fn transitively_implemented_interfaces_must_be_declared() {
    let errors = diagnostics(vec![
        interface_type("Node", &[], vec![field("id", named("ID"))]),
        interface_type("Resource", &["Node"], vec![field("id", named("ID"))]),
        object_type("Query", &["Resource"], vec![field("id", named("ID"))]),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::MissingTransitiveInterface {
            implementer,
            through,
            interface,
        } if implementer == "Query" && through == "Resource" && interface == "Node"
    )));
}

#[test]
fn implements_target_must_be_an_interface() {
    let errors = diagnostics(vec![
        object_type("NotAnInterface", &[], vec![field("a", named("Int"))]),
        object_type(
            "Query",
            &["NotAnInterface"],
            vec![field("a", named("Int"))],
        ),
    ]);
    assert!(errors
        .iter()
        .any(|error| matches!(error, TypeSystemError::ImplementsNonInterface { .. })));
}

#[test]
fn interfaces_cannot_implement_themselves() {
    let errors = diagnostics(vec![
        object_type("Query", &[], vec![field("a", named("Int"))]),
        interface_type("I", &["I"], vec![field("a", named("Int"))]),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::SelfImplementedInterface { name } if name == "I"
    )));
}

#[test]
fn root_operation_types_must_be_objects() {
    let errors = diagnostics(vec![
        schema_def(vec![(ast::OperationType::Query, "Q")]),
        enum_type("Q", &["A"]),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::RootOperationNotObject { name, .. } if name == "Q"
    )));
}

#[test]
fn union_members_must_be_objects() {
    let errors = diagnostics(vec![
        object_type("Query", &[], vec![field("u", named("U"))]),
        enum_type("E", &["A"]),
        union_type("U", &["E"]),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::UnionMemberNotObject { union_name, member }
            if union_name == "U" && member == "E"
    )));
}

#[test]
fn enum_values_must_be_unique_and_unreserved() {
    let errors = diagnostics(vec![
        object_type("Query", &[], vec![field("e", named("E"))]),
        enum_type("E", &["A", "A", "true"]),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::DuplicateEnumValue { value, .. } if value == "A"
    )));
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::ReservedEnumValue { value, .. } if value == "true"
    )));
}

#[test]
fn duplicate_fields_are_reported_from_the_ast() {
    let errors = diagnostics(vec![object_type(
        "Query",
        &[],
        vec![field("a", named("Int")), field("a", named("String"))],
    )]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::DuplicateField { type_name, field }
            if type_name == "Query" && field == "a"
    )));
}

#[test]
fn non_null_input_object_cycles_are_rejected() {
    let errors = diagnostics(vec![
        object_type(
            "Query",
            &[],
            vec![field_with_args("q", named("Int"), vec![arg("a", named("A"))])],
        ),
        input_object_type("A", vec![], vec![arg("b", named("B").non_null())]),
        input_object_type("B", vec![], vec![arg("a", named("A").non_null())]),
    ]);
    assert!(errors
        .iter()
        .any(|error| matches!(error, TypeSystemError::InputObjectCycle { .. })));
}

#[test]
fn a_list_breaks_an_input_object_cycle() {
    let schema = Schema::from_document(&doc(vec![
        object_type(
            "Query",
            &[],
            vec![field_with_args("q", named("Int"), vec![arg("a", named("A"))])],
        ),
        input_object_type(
            "A",
            vec![],
            vec![arg("children", named("A").non_null().list().non_null())],
        ),
    ]));
    assert!(schema.is_ok(), "list-wrapped self reference is constructible");
}

#[test]
fn one_of_fields_must_be_nullable_and_default_free() {
    let errors = diagnostics(vec![
        object_type(
            "Query",
            &[],
            vec![field_with_args("q", named("Int"), vec![arg("p", named("P"))])],
        ),
        input_object_type(
            "P",
            vec![directive("oneOf", vec![])],
            vec![
                arg("bad", named("Int").non_null()),
                arg_with_default("worse", named("Int"), Value::Int(3)),
            ],
        ),
    ]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::OneOfNonNullableField { field, .. } if field == "bad"
    )));
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::OneOfFieldWithDefault { field, .. } if field == "worse"
    )));
}

#[test]
fn applied_directives_must_be_defined_and_legal() {
    let errors = diagnostics(vec![object_type(
        "Query",
        &[],
        vec![
            field_with_directives("a", named("Int"), vec![directive("nope", vec![])]),
            field_with_directives(
                "b",
                named("Int"),
                vec![
                    directive("deprecated", vec![]),
                    directive("deprecated", vec![]),
                ],
            ),
            field_with_directives("c", named("Int"), vec![directive("oneOf", vec![])]),
        ],
    )]);
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::UndefinedDirective { name } if name == "nope"
    )));
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::RepeatedDirective { name } if name == "deprecated"
    )));
    assert!(errors.iter().any(|error| matches!(
        error,
        TypeSystemError::MisplacedDirective { name, location }
            if name == "oneOf" && *location == ast::DirectiveLocation::FieldDefinition
    )));
}

#[test]
fn validation_collects_every_error() {
    let errors = diagnostics(vec![
        interface_type("I", &[], vec![field("f", named("Int"))]),
        object_type(
            "Query",
            &["I"],
            vec![field_with_directives(
                "other",
                named("Int"),
                vec![directive("nope", vec![])],
            )],
        ),
        enum_type("E", &["null"]),
    ]);
    // One walk reports all three unrelated violations
    assert!(errors.len() >= 3, "expected at least 3 errors, got {errors:?}");
}

#[test]
fn argument_type_must_exist_before_covariance_is_checked() {
    // A sanity check that the validator runs on linked schemas only:
    // the builder already rejected unknown references, so the
    // implementing field's type always resolves here
    let schema = Schema::from_document(&doc(vec![
        interface_type("I", &[], vec![field("f", Type::Named(name("Int")))]),
        object_type("Query", &["I"], vec![field("f", named("Int"))]),
    ]));
    assert!(schema.is_ok());
}
