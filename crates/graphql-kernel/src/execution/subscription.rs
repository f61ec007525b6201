//! Subscription setup: resolving the single root subscription field into a
//! source event stream and wiring it through the executor.
//!
//! <https://spec.graphql.org/October2021/#sec-Subscription>

use crate::ast;
use crate::execution::context::ExecutionContext;
use crate::execution::context::RequestError;
use crate::execution::context::RequestErrorKind;
use crate::execution::engine::collect_fields;
use crate::execution::input_coercion::coerce_argument_values;
use crate::execution::resolver::default_resolve;
use crate::execution::resolver::Resolved;
use crate::execution::resolver::ResolverContext;
use crate::execution::resolver::SourceEventStream;
use crate::execution::stream::EventExecution;
use crate::execution::stream::SubscriptionStream;
use crate::execution::JsonMap;
use crate::execution::JsonValue;
use crate::schema::FieldDefinition;
use crate::Schema;
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashSet;

/// Resolve a subscription operation into a lazy stream of responses.
///
/// Setup can fail with a [`RequestError`], which converts into the single
/// `data: null` response the caller should deliver instead of a stream.
/// Once setup succeeds, the returned stream yields one response per source
/// event, in source order; a failed event yields a response carrying the
/// error and the stream continues.
///
/// Dropping the stream cancels the subscription.
pub async fn subscribe<'a>(
    schema: &'a Schema,
    document: &'a ast::Document,
    operation_name: Option<&str>,
    variable_values: &JsonMap,
    root_value: &'a JsonValue,
    context: &'a (dyn Any + Send + Sync),
) -> Result<SubscriptionStream<'a>, RequestError> {
    let ctx = ExecutionContext::new(
        schema,
        document,
        operation_name,
        variable_values,
        root_value,
        context,
    )?;
    if ctx.operation.operation_type != ast::OperationType::Subscription {
        return Err(RequestError::at(
            RequestErrorKind::NotASubscription,
            ctx.operation.location(),
        ));
    }
    let source = create_source_event_stream(&ctx).await?;
    let operation = ctx.operation;
    let variable_values = ctx.into_variable_values();
    Ok(SubscriptionStream::new(
        source,
        EventExecution {
            schema,
            document,
            operation,
            variable_values,
            context,
        },
    ))
}

/// <https://spec.graphql.org/October2021/#CreateSourceEventStream()>
async fn create_source_event_stream(
    ctx: &ExecutionContext<'_>,
) -> Result<SourceEventStream, RequestError> {
    let root_type = ctx
        .schema
        .subscription_type
        .as_ref()
        .and_then(|root| ctx.schema.get_object(root.as_str()))
        .ok_or_else(|| RequestError::new(RequestErrorKind::NoSubscriptionRoot))?;

    // A subscription selects exactly one response key
    let mut grouped_fields = IndexMap::new();
    collect_fields(
        ctx,
        root_type,
        &ctx.operation.selection_set,
        &mut HashSet::new(),
        &mut grouped_fields,
    );
    if grouped_fields.len() != 1 {
        let location = grouped_fields
            .values()
            .nth(1)
            .and_then(|fields| fields[0].name.location())
            .or_else(|| ctx.operation.location());
        return Err(RequestError::at(
            RequestErrorKind::MultiRootSubscription,
            location,
        ));
    }
    // Indexing cannot panic: the map has exactly one entry
    let fields = &grouped_fields[0];
    let field = fields[0];

    let Some(field_def) = root_type.fields.get(field.name.as_str()) else {
        return Err(RequestError::at(
            RequestErrorKind::UnknownSubscriptionField(field.name.clone()),
            field.name.location(),
        ));
    };
    let field_failed = |message: String| {
        RequestError::at(
            RequestErrorKind::SubscriptionFieldError {
                name: field.name.clone(),
                message,
            },
            field.name.location(),
        )
    };

    let argument_values = match coerce_argument_values(ctx, None, field_def, field) {
        Ok(argument_values) => argument_values,
        Err(_propagate) => {
            // During setup there is nowhere to propagate a null to:
            // the field error becomes the single-response request error
            let message = ctx
                .take_errors()
                .into_iter()
                .next()
                .map(|error| error.message)
                .unwrap_or_else(|| "invalid arguments".to_owned());
            return Err(field_failed(message));
        }
    };

    resolve_field_event_stream(ctx, field_def, field, &argument_values).await
}

/// Invoke the field's subscribe callback, falling back to its resolver and
/// then to the default resolver; the result must be a source event stream
async fn resolve_field_event_stream(
    ctx: &ExecutionContext<'_>,
    field_def: &FieldDefinition,
    field: &ast::Field,
    argument_values: &JsonMap,
) -> Result<SourceEventStream, RequestError> {
    let resolver_ctx = || ResolverContext {
        schema: ctx.schema,
        parent: ctx.root_value,
        arguments: argument_values,
        field_name: &field.name,
        context: ctx.context,
    };
    let field_failed = |message: String| {
        RequestError::at(
            RequestErrorKind::SubscriptionFieldError {
                name: field.name.clone(),
                message,
            },
            field.name.location(),
        )
    };
    if let Some(subscriber) = &field_def.subscriber {
        return subscriber
            .subscribe(resolver_ctx())
            .await
            .map_err(|error| field_failed(error.message));
    }
    let resolved = match &field_def.resolver {
        Some(resolver) => resolver
            .resolve(resolver_ctx())
            .await
            .map_err(|error| field_failed(error.message))?,
        None => default_resolve(ctx.root_value, &field.name),
    };
    match resolved {
        Resolved::Stream(source) => Ok(source),
        Resolved::Value(_) => Err(RequestError::at(
            RequestErrorKind::SubscriptionNotIterable(field.name.clone()),
            field.name.location(),
        )),
    }
}
