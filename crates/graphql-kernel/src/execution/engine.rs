//! The field execution engine: field collection, resolver invocation,
//! and response assembly.
//!
//! Response field order follows selection-set order regardless of resolver
//! completion order. Query fields resolve concurrently; mutation fields and
//! subscription event fields resolve in order, one at a time.

use crate::ast;
use crate::ast::Selection;
use crate::execution::input_coercion::coerce_argument_values;
use crate::execution::resolver::default_resolve;
use crate::execution::resolver::Resolved;
use crate::execution::resolver::ResolverContext;
use crate::execution::response::GraphQLError;
use crate::execution::response::PathElement;
use crate::execution::result_coercion::complete_value;
use crate::execution::ExecutionContext;
use crate::execution::JsonMap;
use crate::execution::JsonValue;
use crate::execution::RequestError;
use crate::execution::RequestErrorKind;
use crate::execution::Response;
use crate::name;
use crate::schema::ExtendedType;
use crate::schema::FieldDefinition;
use crate::schema::ObjectType;
use crate::Name;
use crate::NodeLocation;
use crate::Schema;
use futures::future::join_all;
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashSet;
use std::sync::OnceLock;

/// <https://spec.graphql.org/October2021/#sec-Normal-and-Serial-Execution>
#[derive(Debug, Copy, Clone)]
pub(crate) enum ExecutionMode {
    /// Allowed to resolve fields in any order, including concurrently
    Normal,
    /// Top-level fields of a mutation operation, and the fields of each
    /// subscription event, must be executed in order
    Sequential,
}

/// Returned in `Err` when a field error occurred at some non-nullable place
///
/// <https://spec.graphql.org/October2021/#sec-Handling-Field-Errors>
pub(crate) struct PropagateNull;

/// Linked-list version of `Vec<PathElement>`,
/// taking advantage of the future stack
pub(crate) type LinkedPath<'a> = Option<&'a LinkedPathElement<'a>>;

pub(crate) struct LinkedPathElement<'a> {
    pub(crate) element: PathElement,
    pub(crate) next: LinkedPath<'a>,
}

/// Execute a query or mutation request to completion.
///
/// The returned response carries either the requested data (with any field
/// errors collected along the way) or, if a request error prevented execution
/// from starting, `data: null` and that single error.
pub async fn execute(
    schema: &Schema,
    document: &ast::Document,
    operation_name: Option<&str>,
    variable_values: &JsonMap,
    root_value: &JsonValue,
    context: &(dyn Any + Send + Sync),
) -> Response {
    match ExecutionContext::new(
        schema,
        document,
        operation_name,
        variable_values,
        root_value,
        context,
    ) {
        Ok(ctx) => execute_operation(&ctx).await,
        Err(error) => error.into_response(),
    }
}

/// <https://spec.graphql.org/October2021/#ExecuteQuery()>, and the per-event
/// execution of subscriptions
pub(crate) async fn execute_operation(ctx: &ExecutionContext<'_>) -> Response {
    let operation_type = ctx.operation.operation_type;
    let root = ctx
        .schema
        .root_operation(operation_type)
        .and_then(|root| ctx.schema.get_object(root.as_str()));
    let Some(object_type) = root else {
        return RequestError::new(RequestErrorKind::UnsupportedOperation(operation_type))
            .into_response();
    };
    let result = execute_selection_set(
        ctx,
        None,
        ctx.mode(),
        object_type,
        ctx.root_value,
        &ctx.operation.selection_set,
    )
    .await;
    Response {
        errors: ctx.take_errors(),
        data: result.ok(),
        extensions: JsonMap::new(),
    }
}

/// <https://spec.graphql.org/October2021/#ExecuteSelectionSet()>
pub(crate) async fn execute_selection_set<'a>(
    ctx: &ExecutionContext<'a>,
    path: LinkedPath<'_>,
    mode: ExecutionMode,
    object_type: &ObjectType,
    object_value: &JsonValue,
    selections: impl IntoIterator<Item = &'a Selection>,
) -> Result<JsonMap, PropagateNull> {
    let mut grouped_field_set = IndexMap::new();
    collect_fields(
        ctx,
        object_type,
        selections,
        &mut HashSet::new(),
        &mut grouped_field_set,
    );

    let mut response_map = JsonMap::with_capacity(grouped_field_set.len());
    match mode {
        ExecutionMode::Normal => {
            // Resolve concurrently, reassemble in selection-set order
            let futures: Vec<_> = grouped_field_set
                .iter()
                .map(|(&response_key, fields)| {
                    execute_grouped_field(ctx, path, mode, object_type, object_value, response_key, fields)
                })
                .collect();
            let results = join_all(futures).await;
            for ((response_key, _), result) in grouped_field_set.iter().zip(results) {
                if let Some(value) = result? {
                    response_map.insert(response_key.as_str(), value);
                }
            }
        }
        ExecutionMode::Sequential => {
            for (response_key, fields) in &grouped_field_set {
                let result = execute_grouped_field(
                    ctx,
                    path,
                    mode,
                    object_type,
                    object_value,
                    response_key,
                    fields,
                )
                .await;
                if let Some(value) = result? {
                    response_map.insert(response_key.as_str(), value);
                }
            }
        }
    }
    Ok(response_map)
}

async fn execute_grouped_field<'a>(
    ctx: &ExecutionContext<'a>,
    path: LinkedPath<'_>,
    mode: ExecutionMode,
    object_type: &ObjectType,
    object_value: &JsonValue,
    response_key: &Name,
    fields: &[&'a ast::Field],
) -> Result<Option<JsonValue>, PropagateNull> {
    let field_name = &fields[0].name;
    let field_def = if *field_name == "__typename" {
        typename_field_definition()
    } else {
        match object_type.fields.get(field_name.as_str()) {
            Some(field_def) => field_def.as_ref(),
            // An undefined field should have been caught by document
            // validation; skip it silently.
            None => return Ok(None),
        }
    };
    let field_path = LinkedPathElement {
        element: PathElement::Field(response_key.clone()),
        next: path,
    };
    execute_field(
        ctx,
        Some(&field_path),
        mode,
        object_type,
        object_value,
        field_def,
        fields,
    )
    .await
}

/// <https://spec.graphql.org/October2021/#ExecuteField()>
///
/// Returns `Ok(None)` for silently skipping a field.
async fn execute_field<'a>(
    ctx: &ExecutionContext<'a>,
    path: LinkedPath<'_>,
    mode: ExecutionMode,
    object_type: &ObjectType,
    object_value: &JsonValue,
    field_def: &FieldDefinition,
    fields: &[&'a ast::Field],
) -> Result<Option<JsonValue>, PropagateNull> {
    let field = fields[0];
    let argument_values = match coerce_argument_values(ctx, path, field_def, field) {
        Ok(argument_values) => argument_values,
        Err(PropagateNull) if field_def.ty.is_non_null() => return Err(PropagateNull),
        Err(PropagateNull) => return Ok(Some(JsonValue::Null)),
    };
    let resolved = if field.name == "__typename" {
        Ok(Resolved::Value(object_type.name.as_str().into()))
    } else if let Some(resolver) = &field_def.resolver {
        resolver
            .resolve(ResolverContext {
                schema: ctx.schema,
                parent: object_value,
                arguments: &argument_values,
                field_name: &field.name,
                context: ctx.context,
            })
            .await
    } else {
        Ok(default_resolve(object_value, &field.name))
    };
    let completed = match resolved {
        Ok(Resolved::Value(value)) => {
            complete_value(ctx, path, mode, &field_def.ty, value, fields).await
        }
        Ok(Resolved::Stream(_)) => {
            ctx.push_error(GraphQLError::field_error(
                format!(
                    "field `{}` resolved to an event stream outside subscription setup",
                    field.name
                ),
                path,
                field.name.location(),
            ));
            Err(PropagateNull)
        }
        Err(error) => {
            ctx.push_error(GraphQLError::field_error(
                format!("resolver error: {}", error.message),
                path,
                field.name.location(),
            ));
            Err(PropagateNull)
        }
    };
    try_nullify(&field_def.ty, completed).map(Some)
}

/// <https://spec.graphql.org/October2021/#CollectFields()>
pub(crate) fn collect_fields<'a>(
    ctx: &ExecutionContext<'a>,
    object_type: &ObjectType,
    selections: impl IntoIterator<Item = &'a Selection>,
    visited_fragments: &mut HashSet<&'a Name>,
    grouped_fields: &mut IndexMap<&'a Name, Vec<&'a ast::Field>>,
) {
    for selection in selections {
        if eval_if_arg(ctx, selection, "skip").unwrap_or(false)
            || !eval_if_arg(ctx, selection, "include").unwrap_or(true)
        {
            continue;
        }
        match selection {
            Selection::Field(field) => grouped_fields
                .entry(field.response_key())
                .or_default()
                .push(field.as_ref()),
            Selection::FragmentSpread(spread) => {
                let new = visited_fragments.insert(&spread.fragment_name);
                if !new {
                    continue;
                }
                let Some(fragment) = ctx.fragments.get(spread.fragment_name.as_str()) else {
                    continue;
                };
                if !does_fragment_type_apply(ctx.schema, object_type, &fragment.type_condition) {
                    continue;
                }
                collect_fields(
                    ctx,
                    object_type,
                    &fragment.selection_set,
                    visited_fragments,
                    grouped_fields,
                )
            }
            Selection::InlineFragment(inline) => {
                if let Some(condition) = &inline.type_condition {
                    if !does_fragment_type_apply(ctx.schema, object_type, condition) {
                        continue;
                    }
                }
                collect_fields(
                    ctx,
                    object_type,
                    &inline.selection_set,
                    visited_fragments,
                    grouped_fields,
                )
            }
        }
    }
}

/// <https://spec.graphql.org/October2021/#DoesFragmentTypeApply()>
fn does_fragment_type_apply(
    schema: &Schema,
    object_type: &ObjectType,
    fragment_type: &Name,
) -> bool {
    match schema.types.get(fragment_type.as_str()) {
        Some(ExtendedType::Object(_)) => *fragment_type == object_type.name,
        Some(ExtendedType::Interface(_)) => object_type
            .implements_interfaces
            .contains(fragment_type.as_str()),
        Some(ExtendedType::Union(def)) => def.members.contains(object_type.name.as_str()),
        // Undefined or not an output type: validation should have caught this
        _ => false,
    }
}

fn eval_if_arg(
    ctx: &ExecutionContext<'_>,
    selection: &Selection,
    directive_name: &str,
) -> Option<bool> {
    let directive = selection
        .directives()
        .iter()
        .find(|directive| directive.name == *directive_name)?;
    match directive.argument_by_name("if")?.as_ref() {
        ast::Value::Boolean(value) => Some(*value),
        ast::Value::Variable(var) => ctx.variable_values.get(var.as_str())?.as_bool(),
        _ => None,
    }
}

/// Try to insert a propagated null if possible, or keep propagating it.
///
/// <https://spec.graphql.org/October2021/#sec-Handling-Field-Errors>
pub(crate) fn try_nullify(
    ty: &ast::Type,
    result: Result<JsonValue, PropagateNull>,
) -> Result<JsonValue, PropagateNull> {
    match result {
        Ok(json) => Ok(json),
        Err(PropagateNull) => {
            if ty.is_non_null() {
                Err(PropagateNull)
            } else {
                Ok(JsonValue::Null)
            }
        }
    }
}

/// The `__typename` meta-field, available on every object type
fn typename_field_definition() -> &'static FieldDefinition {
    static TYPENAME: OnceLock<FieldDefinition> = OnceLock::new();
    TYPENAME.get_or_init(|| FieldDefinition {
        description: None,
        name: name!(__typename),
        arguments: Vec::new(),
        ty: ast::Type::NonNullNamed(name!(String)),
        directives: Vec::new(),
        resolver: None,
        subscriber: None,
    })
}

pub(crate) fn path_to_vec(mut link: LinkedPath<'_>) -> Vec<PathElement> {
    let mut path = Vec::new();
    while let Some(node) = link {
        path.push(node.element.clone());
        link = node.next;
    }
    path.reverse();
    path
}

impl GraphQLError {
    pub(crate) fn field_error(
        message: impl Into<String>,
        path: LinkedPath<'_>,
        location: Option<&NodeLocation>,
    ) -> Self {
        let mut error = Self::new(message, location);
        error.path = path_to_vec(path);
        error
    }
}
