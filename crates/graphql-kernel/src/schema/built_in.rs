//! Built-in scalars, introspection types, and built-in directives.
//!
//! These are constructed once per process and shared by every schema:
//! the type nodes of two schemas built independently are `ptr_eq`.
//! They are always present in a schema and are never replaced by user
//! definitions of the same name.

use super::Component;
use super::ExtendedType;
use super::FieldDefinition;
use super::ScalarType;
use crate::ast;
use crate::ast::Type;
use crate::name;
use crate::Name;
use crate::Node;
use indexmap::IndexMap;
use std::sync::OnceLock;

/// Built-in scalar and introspection types, in specification order
pub(crate) fn types() -> &'static IndexMap<Name, ExtendedType> {
    static TYPES: OnceLock<IndexMap<Name, ExtendedType>> = OnceLock::new();
    TYPES.get_or_init(|| {
        [
            scalar(
                name!(Int),
                "The `Int` scalar type represents non-fractional signed whole numeric values. \
                 Int can represent values between -(2^31) and 2^31 - 1.",
            ),
            scalar(
                name!(Float),
                "The `Float` scalar type represents signed double-precision fractional values \
                 as specified by IEEE 754.",
            ),
            scalar(
                name!(String),
                "The `String` scalar type represents textual data, represented as UTF-8 \
                 character sequences.",
            ),
            scalar(name!(Boolean), "The `Boolean` scalar type represents `true` or `false`."),
            scalar(
                name!(ID),
                "The `ID` scalar type represents a unique identifier. \
                 It is serialized in the same way as a String, \
                 but it is not intended to be human-readable.",
            ),
            object(
                name!(__Schema),
                "A GraphQL Schema defines the capabilities of a GraphQL server.",
                vec![
                    field("description", named("String")),
                    field("types", named("__Type").non_null().list().non_null()),
                    field("queryType", named("__Type").non_null()),
                    field("mutationType", named("__Type")),
                    field("subscriptionType", named("__Type")),
                    field("directives", named("__Directive").non_null().list().non_null()),
                ],
            ),
            object(
                name!(__Type),
                "The fundamental unit of any GraphQL Schema is the type. \
                 There are many kinds of types in GraphQL; \
                 the `__TypeKind` enum distinguishes them.",
                vec![
                    field("kind", named("__TypeKind").non_null()),
                    field("name", named("String")),
                    field("description", named("String")),
                    field("specifiedByURL", named("String")),
                    field_with_args(
                        "fields",
                        named("__Field").non_null().list(),
                        vec![include_deprecated_arg()],
                    ),
                    field("interfaces", named("__Type").non_null().list()),
                    field("possibleTypes", named("__Type").non_null().list()),
                    field_with_args(
                        "enumValues",
                        named("__EnumValue").non_null().list(),
                        vec![include_deprecated_arg()],
                    ),
                    field_with_args(
                        "inputFields",
                        named("__InputValue").non_null().list(),
                        vec![include_deprecated_arg()],
                    ),
                    field("ofType", named("__Type")),
                    field("isOneOf", named("Boolean")),
                ],
            ),
            enum_type(
                name!(__TypeKind),
                "An enum describing what kind of type a given `__Type` is.",
                &[
                    "SCALAR",
                    "OBJECT",
                    "INTERFACE",
                    "UNION",
                    "ENUM",
                    "INPUT_OBJECT",
                    "LIST",
                    "NON_NULL",
                ],
            ),
            object(
                name!(__Field),
                "Object and Interface types are described by a list of Fields, \
                 each of which has a name, potentially a list of arguments, \
                 and a return type.",
                vec![
                    field("name", named("String").non_null()),
                    field("description", named("String")),
                    field_with_args(
                        "args",
                        named("__InputValue").non_null().list().non_null(),
                        vec![include_deprecated_arg()],
                    ),
                    field("type", named("__Type").non_null()),
                    field("isDeprecated", named("Boolean").non_null()),
                    field("deprecationReason", named("String")),
                ],
            ),
            object(
                name!(__InputValue),
                "Arguments provided to Fields or Directives and the input fields of an \
                 InputObject are represented as Input Values which describe their type and \
                 optionally a default value.",
                vec![
                    field("name", named("String").non_null()),
                    field("description", named("String")),
                    field("type", named("__Type").non_null()),
                    field("defaultValue", named("String")),
                    field("isDeprecated", named("Boolean").non_null()),
                    field("deprecationReason", named("String")),
                ],
            ),
            object(
                name!(__EnumValue),
                "One possible value for a given Enum. Enum values are unique values, not a \
                 placeholder for a string or numeric value.",
                vec![
                    field("name", named("String").non_null()),
                    field("description", named("String")),
                    field("isDeprecated", named("Boolean").non_null()),
                    field("deprecationReason", named("String")),
                ],
            ),
            object(
                name!(__Directive),
                "A Directive provides a way to describe alternate runtime execution and type \
                 validation behavior in a GraphQL document.",
                vec![
                    field("name", named("String").non_null()),
                    field("description", named("String")),
                    field(
                        "locations",
                        named("__DirectiveLocation").non_null().list().non_null(),
                    ),
                    field_with_args(
                        "args",
                        named("__InputValue").non_null().list().non_null(),
                        vec![include_deprecated_arg()],
                    ),
                    field("isRepeatable", named("Boolean").non_null()),
                ],
            ),
            enum_type(
                name!(__DirectiveLocation),
                "A Directive can be adjacent to many parts of the GraphQL language, \
                 a __DirectiveLocation describes one such possible adjacency.",
                &[
                    "QUERY",
                    "MUTATION",
                    "SUBSCRIPTION",
                    "FIELD",
                    "FRAGMENT_DEFINITION",
                    "FRAGMENT_SPREAD",
                    "INLINE_FRAGMENT",
                    "VARIABLE_DEFINITION",
                    "SCHEMA",
                    "SCALAR",
                    "OBJECT",
                    "FIELD_DEFINITION",
                    "ARGUMENT_DEFINITION",
                    "INTERFACE",
                    "UNION",
                    "ENUM",
                    "ENUM_VALUE",
                    "INPUT_OBJECT",
                    "INPUT_FIELD_DEFINITION",
                ],
            ),
        ]
        .into_iter()
        .map(|ty| (ty.name().clone(), ty))
        .collect()
    })
}

/// Built-in directive definitions, in specification order
pub(crate) fn directives() -> &'static IndexMap<Name, Node<ast::DirectiveDefinition>> {
    use ast::DirectiveLocation as L;
    static DIRECTIVES: OnceLock<IndexMap<Name, Node<ast::DirectiveDefinition>>> = OnceLock::new();
    DIRECTIVES.get_or_init(|| {
        [
            directive(
                name!(skip),
                "Directs the executor to skip this field or fragment \
                 when the `if` argument is true.",
                vec![arg("if", named("Boolean").non_null(), None)],
                &[L::Field, L::FragmentSpread, L::InlineFragment],
            ),
            directive(
                name!(include),
                "Directs the executor to include this field or fragment \
                 only when the `if` argument is true.",
                vec![arg("if", named("Boolean").non_null(), None)],
                &[L::Field, L::FragmentSpread, L::InlineFragment],
            ),
            directive(
                name!(deprecated),
                "Marks an element of a GraphQL schema as no longer supported.",
                vec![arg(
                    "reason",
                    named("String"),
                    Some(ast::Value::string("No longer supported")),
                )],
                &[
                    L::FieldDefinition,
                    L::ArgumentDefinition,
                    L::InputFieldDefinition,
                    L::EnumValue,
                ],
            ),
            directive(
                name!(specifiedBy),
                "Exposes a URL that specifies the behavior of this scalar.",
                vec![arg("url", named("String").non_null(), None)],
                &[L::Scalar],
            ),
            directive(
                name!(oneOf),
                "Indicates exactly one field must be supplied \
                 and this field must not be `null`.",
                vec![],
                &[L::InputObject],
            ),
        ]
        .into_iter()
        .map(|def| (def.name.clone(), def))
        .collect()
    })
}

/// Returns whether `name` names a built-in scalar or introspection type
pub(crate) fn is_built_in_type(name: &str) -> bool {
    types().contains_key(name)
}

fn named(name: &str) -> Type {
    Type::Named(Name::new_unchecked(name))
}

fn scalar(name: Name, description: &str) -> ExtendedType {
    ExtendedType::Scalar(Node::new(ScalarType {
        name,
        description: Some(description.to_owned()),
        directives: super::DirectiveList::new(),
        specified_by_url: None,
        coercer: None,
        ast_node: None,
        extension_ast_nodes: Vec::new(),
    }))
}

fn object(name: Name, description: &str, fields: Vec<Component<FieldDefinition>>) -> ExtendedType {
    ExtendedType::Object(Node::new(super::ObjectType {
        name,
        description: Some(description.to_owned()),
        implements_interfaces: Default::default(),
        directives: super::DirectiveList::new(),
        fields: fields
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect(),
        is_type_of: None,
        ast_node: None,
        extension_ast_nodes: Vec::new(),
    }))
}

fn enum_type(name: Name, description: &str, values: &[&str]) -> ExtendedType {
    ExtendedType::Enum(Node::new(super::EnumType {
        name,
        description: Some(description.to_owned()),
        directives: super::DirectiveList::new(),
        values: values
            .iter()
            .map(|value| {
                let value = Name::new_unchecked(value);
                (
                    value.clone(),
                    Component::new(ast::EnumValueDefinition {
                        description: None,
                        value,
                        directives: Vec::new(),
                    }),
                )
            })
            .collect(),
        ast_node: None,
        extension_ast_nodes: Vec::new(),
    }))
}

fn field(name: &str, ty: Type) -> Component<FieldDefinition> {
    field_with_args(name, ty, Vec::new())
}

fn field_with_args(
    name: &str,
    ty: Type,
    arguments: Vec<Node<ast::InputValueDefinition>>,
) -> Component<FieldDefinition> {
    Component::new(FieldDefinition {
        description: None,
        name: Name::new_unchecked(name),
        arguments,
        ty,
        directives: Vec::new(),
        resolver: None,
        subscriber: None,
    })
}

fn arg(name: &str, ty: Type, default_value: Option<ast::Value>) -> Node<ast::InputValueDefinition> {
    Node::new(ast::InputValueDefinition {
        description: None,
        name: Name::new_unchecked(name),
        ty,
        default_value: default_value.map(Node::new),
        directives: Vec::new(),
    })
}

fn include_deprecated_arg() -> Node<ast::InputValueDefinition> {
    arg(
        "includeDeprecated",
        named("Boolean"),
        Some(ast::Value::Boolean(false)),
    )
}

fn directive(
    name: Name,
    description: &str,
    arguments: Vec<Node<ast::InputValueDefinition>>,
    locations: &[ast::DirectiveLocation],
) -> Node<ast::DirectiveDefinition> {
    Node::new(ast::DirectiveDefinition {
        description: Some(description.to_owned()),
        name,
        arguments,
        repeatable: false,
        locations: locations.to_vec(),
    })
}
