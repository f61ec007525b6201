//! Type-system invariant checks on a linked schema.
//!
//! Validation is collecting: the whole graph is walked and every violation is
//! reported with the AST location that produced it, when one is known.

use super::Component;
use super::ComponentName;
use super::DirectiveList;
use super::EnumType;
use super::ExtendedType;
use super::FieldDefinition;
use super::InputObjectType;
use super::InterfaceType;
use super::ObjectType;
use super::Schema;
use super::UnionType;
use crate::ast;
use crate::ast::DirectiveLocation;
use crate::ast::OperationType;
use crate::ast::Type;
use crate::diagnostics::DiagnosticList;
use crate::diagnostics::TypeSystemError;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashSet;

pub(crate) fn validate_schema(errors: &mut DiagnosticList, schema: &Schema) {
    validate_root_operations(errors, schema);
    validate_directives(
        errors,
        schema,
        DirectiveLocation::Schema,
        component_nodes(&schema.directives),
    );
    for ty in schema.types.values() {
        match ty {
            ExtendedType::Scalar(def) => validate_directives(
                errors,
                schema,
                DirectiveLocation::Scalar,
                component_nodes(&def.directives),
            ),
            ExtendedType::Object(def) => validate_object(errors, schema, def),
            ExtendedType::Interface(def) => validate_interface(errors, schema, def),
            ExtendedType::Union(def) => validate_union(errors, schema, def),
            ExtendedType::Enum(def) => validate_enum(errors, schema, def),
            ExtendedType::InputObject(def) => validate_input_object(errors, schema, def),
        }
    }
    find_input_object_cycles(errors, schema);
}

/// Root operation types, if present, must be object types
fn validate_root_operations(errors: &mut DiagnosticList, schema: &Schema) {
    for operation_type in [
        OperationType::Query,
        OperationType::Mutation,
        OperationType::Subscription,
    ] {
        if let Some(root) = schema.root_operation(operation_type) {
            if !matches!(schema.types.get(root.as_str()), Some(ExtendedType::Object(_))) {
                errors.push(
                    root.name.location().cloned(),
                    TypeSystemError::RootOperationNotObject {
                        operation: operation_type,
                        name: root.name.clone(),
                    },
                );
            }
        }
    }
}

fn validate_object(errors: &mut DiagnosticList, schema: &Schema, def: &Node<ObjectType>) {
    validate_directives(
        errors,
        schema,
        DirectiveLocation::Object,
        component_nodes(&def.directives),
    );
    let occurrences = def
        .ast_node
        .iter()
        .flat_map(|node| node.fields.iter())
        .chain(
            def.extension_ast_nodes
                .iter()
                .flat_map(|node| node.fields.iter()),
        )
        .map(|field| (&field.name, field.location()));
    report_duplicates(errors, occurrences, |field| TypeSystemError::DuplicateField {
        type_name: def.name.clone(),
        field: field.clone(),
    });
    validate_fields(errors, schema, &def.fields);
    validate_implements(
        errors,
        schema,
        &def.name,
        &def.implements_interfaces,
        &def.fields,
        false,
        def.location(),
    );
}

fn validate_interface(errors: &mut DiagnosticList, schema: &Schema, def: &Node<InterfaceType>) {
    validate_directives(
        errors,
        schema,
        DirectiveLocation::Interface,
        component_nodes(&def.directives),
    );
    let occurrences = def
        .ast_node
        .iter()
        .flat_map(|node| node.fields.iter())
        .chain(
            def.extension_ast_nodes
                .iter()
                .flat_map(|node| node.fields.iter()),
        )
        .map(|field| (&field.name, field.location()));
    report_duplicates(errors, occurrences, |field| TypeSystemError::DuplicateField {
        type_name: def.name.clone(),
        field: field.clone(),
    });
    validate_fields(errors, schema, &def.fields);
    validate_implements(
        errors,
        schema,
        &def.name,
        &def.implements_interfaces,
        &def.fields,
        true,
        def.location(),
    );
}

fn validate_union(errors: &mut DiagnosticList, schema: &Schema, def: &Node<UnionType>) {
    validate_directives(
        errors,
        schema,
        DirectiveLocation::Union,
        component_nodes(&def.directives),
    );
    for member in &def.members {
        if !matches!(
            schema.types.get(member.as_str()),
            Some(ExtendedType::Object(_))
        ) {
            errors.push(
                member.name.location().cloned(),
                TypeSystemError::UnionMemberNotObject {
                    union_name: def.name.clone(),
                    member: member.name.clone(),
                },
            );
        }
    }
}

fn validate_enum(errors: &mut DiagnosticList, schema: &Schema, def: &Node<EnumType>) {
    validate_directives(
        errors,
        schema,
        DirectiveLocation::Enum,
        component_nodes(&def.directives),
    );
    let occurrences = def
        .ast_node
        .iter()
        .flat_map(|node| node.values.iter())
        .chain(
            def.extension_ast_nodes
                .iter()
                .flat_map(|node| node.values.iter()),
        )
        .map(|value| (&value.value, value.location()));
    report_duplicates(errors, occurrences, |value| {
        TypeSystemError::DuplicateEnumValue {
            enum_name: def.name.clone(),
            value: value.clone(),
        }
    });
    for (value_name, value) in &def.values {
        if matches!(value_name.as_str(), "true" | "false" | "null") {
            errors.push(
                value.location().cloned().or_else(|| def.location().cloned()),
                TypeSystemError::ReservedEnumValue {
                    enum_name: def.name.clone(),
                    value: value_name.clone(),
                },
            );
        }
        validate_directives(
            errors,
            schema,
            DirectiveLocation::EnumValue,
            value.directives.iter(),
        );
    }
}

fn validate_input_object(errors: &mut DiagnosticList, schema: &Schema, def: &Node<InputObjectType>) {
    validate_directives(
        errors,
        schema,
        DirectiveLocation::InputObject,
        component_nodes(&def.directives),
    );
    let occurrences = def
        .ast_node
        .iter()
        .flat_map(|node| node.fields.iter())
        .chain(
            def.extension_ast_nodes
                .iter()
                .flat_map(|node| node.fields.iter()),
        )
        .map(|field| (&field.name, field.location()));
    report_duplicates(errors, occurrences, |field| {
        TypeSystemError::DuplicateInputField {
            type_name: def.name.clone(),
            field: field.clone(),
        }
    });
    for (field_name, field) in &def.fields {
        validate_directives(
            errors,
            schema,
            DirectiveLocation::InputFieldDefinition,
            field.directives.iter(),
        );
        if def.is_one_of {
            if field.ty.is_non_null() {
                errors.push(
                    field.location().cloned(),
                    TypeSystemError::OneOfNonNullableField {
                        type_name: def.name.clone(),
                        field: field_name.clone(),
                    },
                );
            }
            if field.default_value.is_some() {
                errors.push(
                    field.location().cloned(),
                    TypeSystemError::OneOfFieldWithDefault {
                        type_name: def.name.clone(),
                        field: field_name.clone(),
                    },
                );
            }
        }
    }
}

fn validate_fields(
    errors: &mut DiagnosticList,
    schema: &Schema,
    fields: &IndexMap<Name, Component<FieldDefinition>>,
) {
    for field in fields.values() {
        validate_directives(
            errors,
            schema,
            DirectiveLocation::FieldDefinition,
            field.directives.iter(),
        );
        for arg in &field.arguments {
            validate_directives(
                errors,
                schema,
                DirectiveLocation::ArgumentDefinition,
                arg.directives.iter(),
            );
        }
    }
}

/// Interface implementation: every interface field must be implemented with a
/// covariant type, same-name arguments are invariant, and additional arguments
/// must not be required. Interfaces declared by an implemented interface must
/// be implemented as well (transitivity).
#[allow(clippy::too_many_arguments)]
fn validate_implements(
    errors: &mut DiagnosticList,
    schema: &Schema,
    implementer_name: &Name,
    interfaces: &IndexSet<ComponentName>,
    fields: &IndexMap<Name, Component<FieldDefinition>>,
    is_interface: bool,
    location: Option<&NodeLocation>,
) {
    for interface in interfaces {
        if is_interface && interface.name == *implementer_name {
            errors.push(
                interface.name.location().cloned(),
                TypeSystemError::SelfImplementedInterface {
                    name: interface.name.clone(),
                },
            );
            continue;
        }
        let Some(interface_def) = schema.get_interface(interface.as_str()) else {
            errors.push(
                interface.name.location().cloned(),
                TypeSystemError::ImplementsNonInterface {
                    implementer: implementer_name.clone(),
                    name: interface.name.clone(),
                },
            );
            continue;
        };
        for transitive in &interface_def.implements_interfaces {
            if transitive.name != *implementer_name && !interfaces.contains(transitive.as_str()) {
                errors.push(
                    interface.name.location().cloned(),
                    TypeSystemError::MissingTransitiveInterface {
                        implementer: implementer_name.clone(),
                        through: interface.name.clone(),
                        interface: transitive.name.clone(),
                    },
                );
            }
        }
        for (field_name, interface_field) in &interface_def.fields {
            let Some(field) = fields.get(field_name) else {
                errors.push(
                    location.cloned(),
                    TypeSystemError::MissingInterfaceField {
                        implementer: implementer_name.clone(),
                        interface: interface.name.clone(),
                        field: field_name.clone(),
                    },
                );
                continue;
            };
            if !is_subtype_of(schema, &field.ty, &interface_field.ty) {
                errors.push(
                    field.location().cloned(),
                    TypeSystemError::InterfaceFieldTypeMismatch {
                        implementer: implementer_name.clone(),
                        interface: interface.name.clone(),
                        field: field_name.clone(),
                        found: field.ty.clone(),
                        expected: interface_field.ty.clone(),
                    },
                );
            }
            for interface_arg in &interface_field.arguments {
                match field.argument_by_name(&interface_arg.name) {
                    None => errors.push(
                        field.location().cloned(),
                        TypeSystemError::MissingInterfaceFieldArgument {
                            implementer: implementer_name.clone(),
                            interface: interface.name.clone(),
                            field: field_name.clone(),
                            argument: interface_arg.name.clone(),
                        },
                    ),
                    // Same-name arguments are invariant: exactly the same type
                    Some(arg) => {
                        if arg.ty != interface_arg.ty {
                            errors.push(
                                arg.location().cloned(),
                                TypeSystemError::InterfaceArgMismatch {
                                    implementer: implementer_name.clone(),
                                    interface: interface.name.clone(),
                                    field: field_name.clone(),
                                    argument: interface_arg.name.clone(),
                                    found: arg.ty.clone(),
                                    expected: interface_arg.ty.clone(),
                                },
                            );
                        }
                    }
                }
            }
            for arg in &field.arguments {
                if interface_field.argument_by_name(&arg.name).is_none() && arg.is_required() {
                    errors.push(
                        arg.location().cloned(),
                        TypeSystemError::ExtraRequiredArgument {
                            implementer: implementer_name.clone(),
                            interface: interface.name.clone(),
                            field: field_name.clone(),
                            argument: arg.name.clone(),
                        },
                    );
                }
            }
        }
    }
}

/// Covariant subtyping for interface field implementation:
/// a type is a valid subtype of another if they are equal, non-null unwraps to
/// a subtype, both are lists of covariant element types, or the supertype is
/// an abstract type the subtype is a member of.
pub(crate) fn is_subtype_of(schema: &Schema, maybe_subtype: &Type, super_type: &Type) -> bool {
    match (maybe_subtype, super_type) {
        (Type::NonNullNamed(sub), Type::NonNullNamed(sup))
        | (Type::NonNullNamed(sub), Type::Named(sup))
        | (Type::Named(sub), Type::Named(sup)) => is_named_subtype(schema, sub, sup),
        (Type::NonNullList(sub), Type::NonNullList(sup))
        | (Type::NonNullList(sub), Type::List(sup))
        | (Type::List(sub), Type::List(sup)) => is_subtype_of(schema, sub, sup),
        _ => false,
    }
}

fn is_named_subtype(schema: &Schema, sub: &Name, sup: &Name) -> bool {
    sub == sup || schema.is_subtype(sup.as_str(), sub.as_str())
}

/// Applied directives must be defined, legal at this location,
/// and unrepeated unless declared repeatable
fn validate_directives<'a>(
    errors: &mut DiagnosticList,
    schema: &Schema,
    location: DirectiveLocation,
    directives: impl Iterator<Item = &'a Node<ast::Directive>> + Clone,
) {
    let mut seen: HashSet<&str> = HashSet::new();
    for directive in directives {
        let Some(definition) = schema.directive_definitions.get(directive.name.as_str()) else {
            errors.push(
                directive.location().cloned(),
                TypeSystemError::UndefinedDirective {
                    name: directive.name.clone(),
                },
            );
            continue;
        };
        if !definition.locations.contains(&location) {
            errors.push(
                directive.location().cloned(),
                TypeSystemError::MisplacedDirective {
                    name: directive.name.clone(),
                    location,
                },
            );
        }
        if !seen.insert(directive.name.as_str()) && !definition.repeatable {
            errors.push(
                directive.location().cloned(),
                TypeSystemError::RepeatedDirective {
                    name: directive.name.clone(),
                },
            );
        }
    }
}

/// Input objects must not reference themselves through a chain of non-null
/// fields: such a value could never be constructed
fn find_input_object_cycles(errors: &mut DiagnosticList, schema: &Schema) {
    let mut visited = HashSet::new();
    for ty in schema.types.values() {
        if let ExtendedType::InputObject(def) = ty {
            if !visited.contains(def.name.as_str()) {
                let mut stack = Vec::new();
                let mut edges = Vec::new();
                visit_input_object(errors, schema, def, &mut visited, &mut stack, &mut edges);
            }
        }
    }
}

fn visit_input_object(
    errors: &mut DiagnosticList,
    schema: &Schema,
    def: &Node<InputObjectType>,
    visited: &mut HashSet<Name>,
    stack: &mut Vec<Name>,
    edges: &mut Vec<String>,
) {
    visited.insert(def.name.clone());
    stack.push(def.name.clone());
    for (field_name, field) in &def.fields {
        // Only a chain of non-null fields (with no list in between)
        // makes a value impossible to construct
        let Type::NonNullNamed(inner) = &field.ty else {
            continue;
        };
        let Some(target) = schema.get_input_object(inner.as_str()) else {
            continue;
        };
        let edge = format!("{}.{}", def.name, field_name);
        if let Some(position) = stack.iter().position(|name| *name == target.name) {
            let path = edges[position..]
                .iter()
                .map(String::as_str)
                .chain([edge.as_str()])
                .collect::<Vec<_>>()
                .join(" -> ");
            errors.push(
                field.location().cloned(),
                TypeSystemError::InputObjectCycle {
                    type_name: target.name.clone(),
                    path,
                },
            );
        } else if !visited.contains(target.name.as_str()) {
            edges.push(edge);
            visit_input_object(errors, schema, target, visited, stack, edges);
            edges.pop();
        }
    }
    stack.pop();
}

fn component_nodes(
    directives: &DirectiveList,
) -> impl Iterator<Item = &Node<ast::Directive>> + Clone {
    directives.0.iter().map(|component| &component.node)
}

/// The builder tolerates duplicate member names (the later definition wins);
/// here they are recounted from the retained AST nodes and reported.
fn report_duplicates<'a>(
    errors: &mut DiagnosticList,
    occurrences: impl Iterator<Item = (&'a Name, Option<&'a NodeLocation>)>,
    mut make_error: impl FnMut(&Name) -> TypeSystemError,
) {
    let mut seen: HashSet<&str> = HashSet::new();
    for (name, location) in occurrences {
        if !seen.insert(name.as_str()) {
            errors.push(location.cloned(), make_error(name));
        }
    }
}
