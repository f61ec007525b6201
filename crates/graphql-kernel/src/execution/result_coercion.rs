//! Value completion: coercing a resolved value to the shape its field's type
//! declares, recursing through lists and selection sets.
//!
//! <https://spec.graphql.org/October2021/#CompleteValue()>

use crate::ast;
use crate::ast::Type;
use crate::execution::engine::execute_selection_set;
use crate::execution::engine::try_nullify;
use crate::execution::engine::ExecutionMode;
use crate::execution::engine::LinkedPath;
use crate::execution::engine::LinkedPathElement;
use crate::execution::engine::PropagateNull;
use crate::execution::response::GraphQLError;
use crate::execution::response::PathElement;
use crate::execution::ExecutionContext;
use crate::execution::JsonValue;
use crate::schema::ExtendedType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::Name;
use crate::Node;
use async_recursion::async_recursion;

/// Returns `Err` for a field error being propagated upwards
/// to find a nullable place
#[async_recursion]
pub(crate) async fn complete_value<'a, 'b, 'c: 'async_recursion>(
    ctx: &'b ExecutionContext<'a>,
    path: LinkedPath<'c>,
    mode: ExecutionMode,
    ty: &'b Type,
    value: JsonValue,
    fields: &'b [&'a ast::Field],
) -> Result<JsonValue, PropagateNull> {
    let location = fields[0].name.location();
    macro_rules! field_error {
        ($($arg: tt)+) => {{
            ctx.push_error(GraphQLError::field_error(format!($($arg)+), path, location));
            return Err(PropagateNull);
        }};
    }
    if value.is_null() {
        if ty.is_non_null() {
            field_error!("non-null type `{ty}` resolved to null")
        } else {
            return Ok(JsonValue::Null);
        }
    }
    let ty_name = match ty {
        Type::List(inner) | Type::NonNullList(inner) => {
            // https://spec.graphql.org/October2021/#sec-List.Result-Coercion
            let JsonValue::Array(items) = value else {
                field_error!("list type `{ty}` resolved to a non-list value")
            };
            let mut completed_list = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let item_path = LinkedPathElement {
                    element: PathElement::ListIndex(index),
                    next: path,
                };
                let item_result =
                    complete_value(ctx, Some(&item_path), mode, inner, item, fields).await;
                // On field error, try to nullify that item
                match try_nullify(inner, item_result) {
                    Ok(value) => completed_list.push(value),
                    // If the item is non-null, try to nullify the list
                    Err(PropagateNull) => return try_nullify(ty, Err(PropagateNull)),
                }
            }
            return Ok(completed_list.into());
        }
        Type::Named(name) | Type::NonNullNamed(name) => name,
    };
    let Some(ty_def) = ctx.schema.types.get(ty_name.as_str()) else {
        field_error!("undefined type `{ty_name}`")
    };
    let object_type = match ty_def {
        ExtendedType::InputObject(_) => {
            field_error!("field with input object type `{ty_name}`")
        }
        ExtendedType::Scalar(def) => {
            return match serialize_scalar(def, value) {
                Ok(value) => Ok(value),
                Err(message) => field_error!("{message}"),
            }
        }
        ExtendedType::Enum(def) => {
            // https://spec.graphql.org/October2021/#sec-Enums.Result-Coercion
            if value
                .as_str()
                .is_some_and(|str| def.values.contains_key(str))
            {
                return Ok(value);
            }
            field_error!("resolver returned {value}, expected a value of enum `{ty_name}`")
        }
        ExtendedType::Object(def) => def,
        ExtendedType::Interface(_) | ExtendedType::Union(_) => {
            let resolve_type = match ty_def {
                ExtendedType::Interface(def) => def.resolve_type.as_deref(),
                ExtendedType::Union(def) => def.resolve_type.as_deref(),
                _ => None,
            };
            let runtime_name = resolve_type
                .and_then(|resolver| resolver.resolve_type(&value, ctx.context))
                .or_else(|| typename_of(&value))
                .or_else(|| {
                    // Last resort: ask each possible type whether the value
                    // belongs to it
                    ctx.schema
                        .get_possible_types(ty_name.as_str())
                        .into_iter()
                        .find(|object| {
                            object
                                .is_type_of
                                .as_ref()
                                .is_some_and(|predicate| predicate.is_type_of(&value, ctx.context))
                        })
                        .map(|object| object.name.clone())
                });
            let Some(runtime_name) = runtime_name else {
                field_error!(
                    "abstract type `{ty_name}` must resolve to an object type at runtime"
                )
            };
            let Some(def) = ctx.schema.get_object(runtime_name.as_str()) else {
                field_error!(
                    "abstract type `{ty_name}` resolved to `{runtime_name}` \
                     which is not an object type of this schema"
                )
            };
            if !ctx.schema.is_subtype(ty_name.as_str(), runtime_name.as_str()) {
                field_error!("type `{runtime_name}` is not a possible type of `{ty_name}`")
            }
            def
        }
    };
    complete_object_value(ctx, path, mode, object_type, value, fields).await
}

async fn complete_object_value<'a>(
    ctx: &ExecutionContext<'a>,
    path: LinkedPath<'_>,
    mode: ExecutionMode,
    object_type: &ObjectType,
    value: JsonValue,
    fields: &[&'a ast::Field],
) -> Result<JsonValue, PropagateNull> {
    execute_selection_set(
        ctx,
        path,
        mode,
        object_type,
        &value,
        fields
            .iter()
            .flat_map(|field| &field.selection_set),
    )
    .await
    .map(JsonValue::Object)
}

/// The concrete type name a resolved abstract value carries, if any
fn typename_of(value: &JsonValue) -> Option<Name> {
    let name = value.as_object()?.get("__typename")?.as_str()?;
    Name::new(name).ok()
}

/// Scalar *result* coercion.
///
/// Built-in scalars coerce leniently, like the reference implementations:
/// e.g. `String` serializes the number `123` to `"123"`. Custom scalars
/// consult the attached coercer and otherwise pass through unchanged,
/// including list or object values.
fn serialize_scalar(def: &Node<ScalarType>, value: JsonValue) -> Result<JsonValue, String> {
    match def.name.as_str() {
        // https://spec.graphql.org/October2021/#sec-Int.Result-Coercion
        "Int" => {
            let int = match &value {
                JsonValue::Number(number) => {
                    if let Some(int) = number.as_i64() {
                        Some(int)
                    } else {
                        // Accept a float with no fractional part
                        number
                            .as_f64()
                            .filter(|float| float.fract() == 0.0)
                            .map(|float| float as i64)
                    }
                }
                JsonValue::Bool(boolean) => Some(i64::from(*boolean)),
                JsonValue::String(string) => string.as_str().parse().ok(),
                _ => None,
            };
            match int.map(i32::try_from) {
                Some(Ok(int)) => Ok(int.into()),
                Some(Err(_)) => Err(format!("Int cannot represent {value}: out of range")),
                None => Err(format!("Int cannot represent {value}")),
            }
        }
        // https://spec.graphql.org/October2021/#sec-Float.Result-Coercion
        "Float" => {
            let float = match &value {
                JsonValue::Number(number) => number.as_f64(),
                JsonValue::Bool(boolean) => Some(f64::from(u8::from(*boolean))),
                JsonValue::String(string) => string.as_str().parse().ok(),
                _ => None,
            };
            match float {
                Some(float) => Ok(float.into()),
                None => Err(format!("Float cannot represent {value}")),
            }
        }
        // https://spec.graphql.org/October2021/#sec-String.Result-Coercion
        "String" => match &value {
            JsonValue::String(_) => Ok(value),
            JsonValue::Number(number) => Ok(number.to_string().into()),
            JsonValue::Bool(boolean) => Ok(boolean.to_string().into()),
            _ => Err(format!("String cannot represent {value}")),
        },
        // https://spec.graphql.org/October2021/#sec-Boolean.Result-Coercion
        "Boolean" => match &value {
            JsonValue::Bool(_) => Ok(value),
            JsonValue::Number(number) => Ok(number.as_f64().is_some_and(|n| n != 0.0).into()),
            _ => Err(format!("Boolean cannot represent {value}")),
        },
        // https://spec.graphql.org/October2021/#sec-ID.Result-Coercion
        "ID" => match &value {
            JsonValue::String(_) => Ok(value),
            JsonValue::Number(number) if number.as_i64().is_some() => {
                Ok(number.to_string().into())
            }
            _ => Err(format!("ID cannot represent {value}")),
        },
        // Custom scalar
        _ => match &def.coercer {
            Some(coercer) => coercer.serialize(&value).map_err(|err| err.message),
            None => Ok(value),
        },
    }
}
