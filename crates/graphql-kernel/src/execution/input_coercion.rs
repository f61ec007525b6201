//! Input coercion: variable values from the request
//! ([CoerceVariableValues]) and argument values from the document
//! ([CoerceArgumentValues]).
//!
//! Variable coercion failures are request errors: the request is not
//! executed. Argument coercion failures are field errors that propagate
//! null per the usual rules.
//!
//! [CoerceVariableValues]: https://spec.graphql.org/October2021/#CoerceVariableValues()
//! [CoerceArgumentValues]: https://spec.graphql.org/October2021/#CoerceArgumentValues()

use crate::ast;
use crate::ast::Type;
use crate::execution::context::RequestError;
use crate::execution::context::RequestErrorKind;
use crate::execution::engine::LinkedPath;
use crate::execution::engine::PropagateNull;
use crate::execution::response::GraphQLError;
use crate::execution::ExecutionContext;
use crate::execution::JsonMap;
use crate::execution::JsonValue;
use crate::schema::ExtendedType;
use crate::schema::FieldDefinition;
use crate::schema::InputObjectType;
use crate::schema::ScalarType;
use crate::Node;
use crate::Schema;

/// Coerce the values of variables from a GraphQL request to the types
/// declared by the operation, applying declared defaults.
///
/// If coercion fails, a request error is returned
/// and the request must not be executed.
pub(crate) fn coerce_variable_values(
    schema: &Schema,
    operation: &ast::OperationDefinition,
    values: &JsonMap,
) -> Result<JsonMap, RequestError> {
    let mut coerced_values = JsonMap::new();
    for variable_def in &operation.variables {
        let name = &variable_def.name;
        let fail = |reason: String| {
            RequestError::at(
                RequestErrorKind::VariableCoercionFailed {
                    name: name.clone(),
                    reason,
                },
                variable_def.location(),
            )
        };
        if !schema.is_input_type(&variable_def.ty) {
            return Err(fail(format!(
                "type `{}` is not an input type",
                variable_def.ty
            )));
        }
        if let Some((key, value)) = values.get_key_value(name.as_str()) {
            let value =
                coerce_variable_value(schema, "variable", "", "", name.as_str(), &variable_def.ty, value)
                    .map_err(fail)?;
            coerced_values.insert(key.clone(), value);
        } else if let Some(default) = &variable_def.default_value {
            let value =
                const_value_to_json("variable", "", "", name.as_str(), default).map_err(fail)?;
            coerced_values.insert(name.as_str(), value);
        } else if variable_def.ty.is_non_null() {
            return Err(fail("missing value for non-null variable".to_owned()));
        } else {
            // Nullable variable with no provided value and no default:
            // there is a semantic difference between an explicitly provided
            // null and not providing a value, so nothing is recorded.
        }
    }
    Ok(coerced_values)
}

#[allow(clippy::too_many_arguments)] // not a nice signature but it is internal
fn coerce_variable_value(
    schema: &Schema,
    kind: &str,
    parent: &str,
    sep: &str,
    name: &str,
    ty: &Type,
    value: &JsonValue,
) -> Result<JsonValue, String> {
    if value.is_null() {
        return if ty.is_non_null() {
            Err(format!("null value for non-null {kind} {parent}{sep}{name}"))
        } else {
            Ok(JsonValue::Null)
        };
    }
    let ty_name = match ty {
        Type::List(inner) | Type::NonNullList(inner) => {
            // https://spec.graphql.org/October2021/#sec-List.Input-Coercion
            return value
                .as_array()
                .map(Vec::as_slice)
                // If not an array, treat the value as an array of size one:
                .unwrap_or(std::slice::from_ref(value))
                .iter()
                .map(|item| coerce_variable_value(schema, kind, parent, sep, name, inner, item))
                .collect();
        }
        Type::Named(ty_name) | Type::NonNullNamed(ty_name) => ty_name,
    };
    let Some(ty_def) = schema.types.get(ty_name.as_str()) else {
        return Err(format!("undefined type `{ty_name}`"));
    };
    match ty_def {
        ExtendedType::Object(_) | ExtendedType::Interface(_) | ExtendedType::Union(_) => Err(
            format!("non-input type `{ty_name}` for {kind} {parent}{sep}{name}"),
        ),
        ExtendedType::Scalar(def) => parse_scalar_value(def, value),
        ExtendedType::Enum(def) => {
            // https://spec.graphql.org/October2021/#sec-Enums.Input-Coercion
            if value
                .as_str()
                .is_some_and(|str| def.values.contains_key(str))
            {
                Ok(value.clone())
            } else {
                Err(format!("{value} does not name a value of enum `{ty_name}`"))
            }
        }
        ExtendedType::InputObject(def) => {
            // https://spec.graphql.org/October2021/#sec-Input-Objects.Input-Coercion
            let Some(object) = value.as_object() else {
                return Err(format!(
                    "expected an object value for input object type `{ty_name}`"
                ));
            };
            if let Some(key) = object
                .keys()
                .find(|key| !def.fields.contains_key(key.as_str()))
            {
                return Err(format!(
                    "input object has key `{}` not in type `{ty_name}`",
                    key.as_str()
                ));
            }
            let mut coerced = JsonMap::with_capacity(object.len());
            for (field_name, field_def) in &def.fields {
                if let Some(field_value) = object.get(field_name.as_str()) {
                    let field_value = coerce_variable_value(
                        schema,
                        "input field",
                        ty_name.as_str(),
                        ".",
                        field_name.as_str(),
                        &field_def.ty,
                        field_value,
                    )?;
                    coerced.insert(field_name.as_str(), field_value);
                } else if let Some(default) = &field_def.default_value {
                    let default = const_value_to_json(
                        "input field",
                        ty_name.as_str(),
                        ".",
                        field_name.as_str(),
                        default,
                    )?;
                    coerced.insert(field_name.as_str(), default);
                } else if field_def.ty.is_non_null() {
                    return Err(format!(
                        "missing value for non-null input object field `{ty_name}.{field_name}`"
                    ));
                } else {
                    // Field not required
                }
            }
            check_one_of(def, &coerced)?;
            Ok(coerced.into())
        }
    }
}

/// Scalar *input* coercion for a value provided through variables
fn parse_scalar_value(def: &Node<ScalarType>, value: &JsonValue) -> Result<JsonValue, String> {
    match def.name.as_str() {
        // https://spec.graphql.org/October2021/#sec-Int.Input-Coercion
        "Int" => {
            if value
                .as_i64()
                .is_some_and(|value| i32::try_from(value).is_ok())
            {
                Ok(value.clone())
            } else {
                Err(format!("Int cannot represent {value}"))
            }
        }
        // https://spec.graphql.org/October2021/#sec-Float.Input-Coercion
        "Float" => {
            if value.as_f64().is_some() {
                Ok(value.clone())
            } else {
                Err(format!("Float cannot represent {value}"))
            }
        }
        // https://spec.graphql.org/October2021/#sec-String.Input-Coercion
        "String" => {
            if value.is_string() {
                Ok(value.clone())
            } else {
                Err(format!("String cannot represent {value}"))
            }
        }
        // https://spec.graphql.org/October2021/#sec-Boolean.Input-Coercion
        "Boolean" => {
            if value.is_boolean() {
                Ok(value.clone())
            } else {
                Err(format!("Boolean cannot represent {value}"))
            }
        }
        // https://spec.graphql.org/October2021/#sec-ID.Input-Coercion
        "ID" => {
            if value.is_string() || value.as_i64().is_some() {
                Ok(value.clone())
            } else {
                Err(format!("ID cannot represent {value}"))
            }
        }
        // Custom scalar: consult the attached coercer, pass through otherwise
        _ => match &def.coercer {
            Some(coercer) => coercer.parse_value(value).map_err(|err| err.message),
            None => Ok(value.clone()),
        },
    }
}

/// A oneOf input object requires exactly one field, and it must not be null
fn check_one_of(def: &Node<InputObjectType>, coerced: &JsonMap) -> Result<(), String> {
    if !def.is_one_of {
        return Ok(());
    }
    if coerced.len() != 1 {
        return Err(format!(
            "oneOf input object `{}` must specify exactly one field",
            def.name
        ));
    }
    if coerced.values().next().is_some_and(JsonValue::is_null) {
        return Err(format!(
            "the field specified for oneOf input object `{}` must be non-null",
            def.name
        ));
    }
    Ok(())
}

/// Convert a constant document value (a default value, or a literal with no
/// variables in scope) to JSON
fn const_value_to_json(
    kind: &str,
    parent: &str,
    sep: &str,
    name: &str,
    value: &Node<ast::Value>,
) -> Result<JsonValue, String> {
    match value.as_ref() {
        ast::Value::Null => Ok(JsonValue::Null),
        ast::Value::Variable(_) => Err(format!(
            "variable in constant position for {kind} {parent}{sep}{name}"
        )),
        ast::Value::Enum(value) => Ok(value.as_str().into()),
        ast::Value::String { value, .. } => Ok(value.as_str().into()),
        ast::Value::Boolean(value) => Ok((*value).into()),
        ast::Value::Int(value) => Ok((*value).into()),
        ast::Value::Float(value) => Ok(value.into_inner().into()),
        ast::Value::List(items) => items
            .iter()
            .map(|item| const_value_to_json(kind, parent, sep, name, item))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::from),
        ast::Value::Object(fields) => {
            let mut map = JsonMap::with_capacity(fields.len());
            for (key, field_value) in fields {
                map.insert(
                    key.as_str(),
                    const_value_to_json(kind, parent, sep, name, field_value)?,
                );
            }
            Ok(map.into())
        }
    }
}

/// <https://spec.graphql.org/October2021/#sec-Coercing-Field-Arguments>
pub(crate) fn coerce_argument_values(
    ctx: &ExecutionContext<'_>,
    path: LinkedPath<'_>,
    field_def: &FieldDefinition,
    field: &ast::Field,
) -> Result<JsonMap, PropagateNull> {
    let mut coerced_values = JsonMap::new();
    for arg_def in &field_def.arguments {
        let arg_name = &arg_def.name;
        if let Some((_, value)) = field.arguments.iter().find(|(name, _)| name == arg_name) {
            if let Some(var_name) = value.as_variable() {
                if let Some(var_value) = ctx.variable_values.get(var_name.as_str()) {
                    if var_value.is_null() && arg_def.ty.is_non_null() {
                        ctx.push_error(GraphQLError::field_error(
                            format!("null value for non-nullable argument `{arg_name}`"),
                            path,
                            value.location(),
                        ));
                        return Err(PropagateNull);
                    } else {
                        coerced_values.insert(arg_name.as_str(), var_value.clone());
                        continue;
                    }
                }
                // An absent variable falls back to the argument default
            } else if value.is_null() && arg_def.ty.is_non_null() {
                ctx.push_error(GraphQLError::field_error(
                    format!("null value for non-nullable argument `{arg_name}`"),
                    path,
                    value.location(),
                ));
                return Err(PropagateNull);
            } else {
                let coerced =
                    coerce_argument_value(ctx, path, "argument", "", "", arg_name.as_str(), &arg_def.ty, value)?;
                coerced_values.insert(arg_name.as_str(), coerced);
                continue;
            }
        }
        if let Some(default) = &arg_def.default_value {
            match const_value_to_json("argument", "", "", arg_name.as_str(), default) {
                Ok(value) => {
                    coerced_values.insert(arg_name.as_str(), value);
                    continue;
                }
                Err(reason) => {
                    ctx.push_error(GraphQLError::field_error(reason, path, default.location()));
                    return Err(PropagateNull);
                }
            }
        }
        if arg_def.ty.is_non_null() {
            ctx.push_error(GraphQLError::field_error(
                format!("missing value for required argument `{arg_name}`"),
                path,
                field.name.location(),
            ));
            return Err(PropagateNull);
        }
    }
    Ok(coerced_values)
}

#[allow(clippy::too_many_arguments)] // not a nice signature but it is internal
fn coerce_argument_value(
    ctx: &ExecutionContext<'_>,
    path: LinkedPath<'_>,
    kind: &str,
    parent: &str,
    sep: &str,
    name: &str,
    ty: &Type,
    value: &Node<ast::Value>,
) -> Result<JsonValue, PropagateNull> {
    let error = |message: String| {
        ctx.push_error(GraphQLError::field_error(message, path, value.location()));
        PropagateNull
    };
    if value.is_null() {
        return if ty.is_non_null() {
            Err(error(format!(
                "null value for non-null {kind} {parent}{sep}{name}"
            )))
        } else {
            Ok(JsonValue::Null)
        };
    }
    if let Some(var_name) = value.as_variable() {
        return if let Some(var_value) = ctx.variable_values.get(var_name.as_str()) {
            if var_value.is_null() && ty.is_non_null() {
                Err(error(format!(
                    "null variable value for non-null {kind} {parent}{sep}{name}"
                )))
            } else {
                Ok(var_value.clone())
            }
        } else if ty.is_non_null() {
            Err(error(format!(
                "missing variable for non-null {kind} {parent}{sep}{name}"
            )))
        } else {
            Ok(JsonValue::Null)
        };
    }
    let ty_name = match ty {
        Type::List(inner) | Type::NonNullList(inner) => {
            // https://spec.graphql.org/October2021/#sec-List.Input-Coercion
            return value
                .as_list()
                // If not a list, treat the value as a list of size one:
                .unwrap_or(std::slice::from_ref(value))
                .iter()
                .map(|item| coerce_argument_value(ctx, path, kind, parent, sep, name, inner, item))
                .collect();
        }
        Type::Named(ty_name) | Type::NonNullNamed(ty_name) => ty_name,
    };
    let Some(ty_def) = ctx.schema.types.get(ty_name.as_str()) else {
        return Err(error(format!(
            "undefined type `{ty_name}` for {kind} {parent}{sep}{name}"
        )));
    };
    match ty_def {
        ExtendedType::InputObject(def) => {
            // https://spec.graphql.org/October2021/#sec-Input-Objects.Input-Coercion
            let Some(object) = value.as_object() else {
                return Err(error(format!(
                    "expected an object value for input object type `{ty_name}`"
                )));
            };
            if let Some((key, _)) = object
                .iter()
                .find(|(key, _)| !def.fields.contains_key(key.as_str()))
            {
                return Err(error(format!(
                    "input object has key `{key}` not in type `{ty_name}`"
                )));
            }
            let mut coerced = JsonMap::with_capacity(object.len());
            for (field_name, field_def) in &def.fields {
                let provided = object
                    .iter()
                    .find(|(key, _)| key == field_name)
                    .map(|(_, field_value)| field_value);
                if let Some(field_value) = provided {
                    let field_value = coerce_argument_value(
                        ctx,
                        path,
                        "input field",
                        ty_name.as_str(),
                        ".",
                        field_name.as_str(),
                        &field_def.ty,
                        field_value,
                    )?;
                    coerced.insert(field_name.as_str(), field_value);
                } else if let Some(default) = &field_def.default_value {
                    let default = const_value_to_json(
                        "input field",
                        ty_name.as_str(),
                        ".",
                        field_name.as_str(),
                        default,
                    )
                    .map_err(&error)?;
                    coerced.insert(field_name.as_str(), default);
                } else if field_def.ty.is_non_null() {
                    return Err(error(format!(
                        "missing value for non-null input object field `{ty_name}.{field_name}`"
                    )));
                } else {
                    // Field not required
                }
            }
            check_one_of(def, &coerced).map_err(&error)?;
            Ok(coerced.into())
        }
        ExtendedType::Scalar(def) => {
            // Custom scalars may parse literals themselves;
            // everything else converts between representations,
            // relying on document validation for type checks
            if let (false, Some(coercer)) = (is_built_in_scalar(&def.name), &def.coercer) {
                coercer
                    .parse_literal(value)
                    .map_err(|err| error(err.message))
            } else {
                const_value_to_json(kind, parent, sep, name, value).map_err(&error)
            }
        }
        _ => const_value_to_json(kind, parent, sep, name, value).map_err(&error),
    }
}

fn is_built_in_scalar(name: &crate::Name) -> bool {
    matches!(name.as_str(), "Int" | "Float" | "String" | "Boolean" | "ID")
}
