//! Shared helpers for building AST documents programmatically:
//! the parser is external to this crate, so tests construct documents
//! the same way an embedding parser would.

#![allow(dead_code)] // not every test module uses every helper

use graphql_kernel::ast;
use graphql_kernel::ast::Type;
use graphql_kernel::JsonValue;
use graphql_kernel::Name;

pub fn doc(definitions: Vec<ast::Definition>) -> ast::Document {
    ast::Document { definitions }
}

pub fn name(value: &str) -> Name {
    Name::new(value).expect("valid test name")
}

pub fn named(ty: &str) -> Type {
    Type::Named(name(ty))
}

pub fn object_type(
    type_name: &str,
    interfaces: &[&str],
    fields: Vec<ast::FieldDefinition>,
) -> ast::Definition {
    ast::ObjectTypeDefinition {
        description: None,
        name: name(type_name),
        implements_interfaces: interfaces.iter().map(|i| name(i)).collect(),
        directives: vec![],
        fields: fields.into_iter().map(Into::into).collect(),
    }
    .into()
}

pub fn interface_type(
    type_name: &str,
    interfaces: &[&str],
    fields: Vec<ast::FieldDefinition>,
) -> ast::Definition {
    ast::InterfaceTypeDefinition {
        description: None,
        name: name(type_name),
        implements_interfaces: interfaces.iter().map(|i| name(i)).collect(),
        directives: vec![],
        fields: fields.into_iter().map(Into::into).collect(),
    }
    .into()
}

pub fn union_type(type_name: &str, members: &[&str]) -> ast::Definition {
    ast::UnionTypeDefinition {
        description: None,
        name: name(type_name),
        directives: vec![],
        members: members.iter().map(|m| name(m)).collect(),
    }
    .into()
}

pub fn enum_type(type_name: &str, values: &[&str]) -> ast::Definition {
    ast::EnumTypeDefinition {
        description: None,
        name: name(type_name),
        directives: vec![],
        values: values
            .iter()
            .map(|value| {
                ast::EnumValueDefinition {
                    description: None,
                    value: name(value),
                    directives: vec![],
                }
                .into()
            })
            .collect(),
    }
    .into()
}

pub fn input_object_type(
    type_name: &str,
    directives: Vec<ast::Directive>,
    fields: Vec<ast::InputValueDefinition>,
) -> ast::Definition {
    ast::InputObjectTypeDefinition {
        description: None,
        name: name(type_name),
        directives: directives.into_iter().map(Into::into).collect(),
        fields: fields.into_iter().map(Into::into).collect(),
    }
    .into()
}

pub fn scalar_type(type_name: &str, directives: Vec<ast::Directive>) -> ast::Definition {
    ast::ScalarTypeDefinition {
        description: None,
        name: name(type_name),
        directives: directives.into_iter().map(Into::into).collect(),
    }
    .into()
}

pub fn field(field_name: &str, ty: Type) -> ast::FieldDefinition {
    ast::FieldDefinition {
        description: None,
        name: name(field_name),
        arguments: vec![],
        ty,
        directives: vec![],
    }
}

pub fn field_with_args(
    field_name: &str,
    ty: Type,
    arguments: Vec<ast::InputValueDefinition>,
) -> ast::FieldDefinition {
    ast::FieldDefinition {
        arguments: arguments.into_iter().map(Into::into).collect(),
        ..field(field_name, ty)
    }
}

pub fn field_with_directives(
    field_name: &str,
    ty: Type,
    directives: Vec<ast::Directive>,
) -> ast::FieldDefinition {
    ast::FieldDefinition {
        directives: directives.into_iter().map(Into::into).collect(),
        ..field(field_name, ty)
    }
}

pub fn arg(arg_name: &str, ty: Type) -> ast::InputValueDefinition {
    ast::InputValueDefinition {
        description: None,
        name: name(arg_name),
        ty,
        default_value: None,
        directives: vec![],
    }
}

pub fn arg_with_default(
    arg_name: &str,
    ty: Type,
    default: ast::Value,
) -> ast::InputValueDefinition {
    ast::InputValueDefinition {
        default_value: Some(default.into()),
        ..arg(arg_name, ty)
    }
}

pub fn directive(directive_name: &str, arguments: Vec<(&str, ast::Value)>) -> ast::Directive {
    ast::Directive {
        name: name(directive_name),
        arguments: arguments
            .into_iter()
            .map(|(arg_name, value)| (name(arg_name), value.into()))
            .collect(),
    }
}

pub fn schema_def(root_operations: Vec<(ast::OperationType, &str)>) -> ast::Definition {
    ast::SchemaDefinition {
        description: None,
        directives: vec![],
        root_operations: root_operations
            .into_iter()
            .map(|(operation_type, type_name)| (operation_type, name(type_name)))
            .collect(),
    }
    .into()
}

pub fn operation(
    operation_type: ast::OperationType,
    operation_name: Option<&str>,
    variables: Vec<ast::VariableDefinition>,
    selection_set: Vec<ast::Selection>,
) -> ast::Definition {
    ast::OperationDefinition {
        operation_type,
        name: operation_name.map(name),
        variables: variables.into_iter().map(Into::into).collect(),
        directives: vec![],
        selection_set,
    }
    .into()
}

pub fn query(selection_set: Vec<ast::Selection>) -> ast::Definition {
    operation(ast::OperationType::Query, None, vec![], selection_set)
}

pub fn mutation(selection_set: Vec<ast::Selection>) -> ast::Definition {
    operation(ast::OperationType::Mutation, None, vec![], selection_set)
}

pub fn subscription(selection_set: Vec<ast::Selection>) -> ast::Definition {
    operation(ast::OperationType::Subscription, None, vec![], selection_set)
}

pub fn var_def(var_name: &str, ty: Type) -> ast::VariableDefinition {
    ast::VariableDefinition {
        name: name(var_name),
        ty,
        default_value: None,
        directives: vec![],
    }
}

pub fn sel(field_name: &str) -> ast::Selection {
    sel_full(field_name, vec![], vec![], vec![])
}

pub fn sel_sub(field_name: &str, selection_set: Vec<ast::Selection>) -> ast::Selection {
    sel_full(field_name, vec![], vec![], selection_set)
}

pub fn sel_args(field_name: &str, arguments: Vec<(&str, ast::Value)>) -> ast::Selection {
    sel_full(field_name, arguments, vec![], vec![])
}

pub fn sel_directives(field_name: &str, directives: Vec<ast::Directive>) -> ast::Selection {
    sel_full(field_name, vec![], directives, vec![])
}

pub fn sel_full(
    field_name: &str,
    arguments: Vec<(&str, ast::Value)>,
    directives: Vec<ast::Directive>,
    selection_set: Vec<ast::Selection>,
) -> ast::Selection {
    ast::Selection::Field(
        ast::Field {
            alias: None,
            name: name(field_name),
            arguments: arguments
                .into_iter()
                .map(|(arg_name, value)| (name(arg_name), value.into()))
                .collect(),
            directives: directives.into_iter().map(Into::into).collect(),
            selection_set,
        }
        .into(),
    )
}

pub fn fragment_def(
    fragment_name: &str,
    type_condition: &str,
    selection_set: Vec<ast::Selection>,
) -> ast::Definition {
    ast::FragmentDefinition {
        name: name(fragment_name),
        type_condition: name(type_condition),
        directives: vec![],
        selection_set,
    }
    .into()
}

pub fn fragment_spread(fragment_name: &str) -> ast::Selection {
    ast::Selection::FragmentSpread(
        ast::FragmentSpread {
            fragment_name: name(fragment_name),
            directives: vec![],
        }
        .into(),
    )
}

pub fn inline_fragment(type_condition: Option<&str>, selection_set: Vec<ast::Selection>) -> ast::Selection {
    ast::Selection::InlineFragment(
        ast::InlineFragment {
            type_condition: type_condition.map(name),
            directives: vec![],
            selection_set,
        }
        .into(),
    )
}

/// Convert a `serde_json` value (e.g. from the `json!` macro) into the
/// reference-counted JSON representation the executor works on
pub fn json(value: serde_json::Value) -> JsonValue {
    serde_json::from_value(value).expect("JSON values convert losslessly")
}

pub fn json_map(value: serde_json::Value) -> graphql_kernel::JsonMap {
    match json(value) {
        JsonValue::Object(map) => map,
        other => panic!("expected a JSON object, got {other:?}"),
    }
}
