//! Per-request execution state: the selected operation, coerced variables,
//! fragment definitions, and the error sink.
//!
//! An execution context is built once per request and never shared between
//! requests. The schema it borrows is immutable and freely shareable.

use crate::ast;
use crate::execution::engine::ExecutionMode;
use crate::execution::input_coercion::coerce_variable_values;
use crate::execution::response::GraphQLError;
use crate::execution::JsonMap;
use crate::execution::JsonValue;
use crate::execution::Response;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use crate::Schema;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Mutex;
use std::sync::PoisonError;

/// A [request error] that prevented execution from starting,
/// or subscription setup from producing a stream.
///
/// Converts into a single `data: null` [`Response`]
/// carrying one [`GraphQLError`].
///
/// [request error]: https://spec.graphql.org/October2021/#sec-Errors.Request-errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    kind: RequestErrorKind,
    location: Option<NodeLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestErrorKind {
    #[error("document does not contain any operations")]
    NoOperation,

    #[error("multiple operations in the document require an operation name")]
    AmbiguousOperation,

    #[error("no operation named `{0}`")]
    UnknownOperation(String),

    #[error("invalid value for variable `${name}`: {reason}")]
    VariableCoercionFailed { name: Name, reason: String },

    #[error("schema does not support {0} operations")]
    UnsupportedOperation(ast::OperationType),

    #[error("subscribe requires a subscription operation")]
    NotASubscription,

    #[error("schema does not define a subscription root type")]
    NoSubscriptionRoot,

    #[error("a subscription must select exactly one top-level field")]
    MultiRootSubscription,

    #[error("the subscription root type does not define a field named `{0}`")]
    UnknownSubscriptionField(Name),

    #[error("subscription field `{0}` did not resolve to an event stream")]
    SubscriptionNotIterable(Name),

    #[error("subscription field `{name}` failed: {message}")]
    SubscriptionFieldError { name: Name, message: String },
}

impl RequestError {
    pub(crate) fn new(kind: RequestErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    pub(crate) fn at(kind: RequestErrorKind, location: Option<&NodeLocation>) -> Self {
        Self {
            kind,
            location: location.cloned(),
        }
    }

    pub fn kind(&self) -> &RequestErrorKind {
        &self.kind
    }

    pub fn location(&self) -> Option<&NodeLocation> {
        self.location.as_ref()
    }

    /// The single `data: null` response this error amounts to
    pub fn into_response(self) -> Response {
        Response::from_error(GraphQLError::new(
            self.kind.to_string(),
            self.location.as_ref(),
        ))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for RequestError {}

impl From<RequestError> for Response {
    fn from(error: RequestError) -> Self {
        error.into_response()
    }
}

/// Immutable per-request state resolved from a schema, a document,
/// and raw request inputs
pub struct ExecutionContext<'a> {
    pub schema: &'a Schema,
    pub document: &'a ast::Document,

    /// The operation selected by the request's operation name
    pub operation: &'a Node<ast::OperationDefinition>,

    /// Fragment definitions of the document, keyed by name
    pub fragments: IndexMap<Name, &'a Node<ast::FragmentDefinition>>,

    /// Variable values coerced against the operation's declared types,
    /// with defaults applied
    pub variable_values: JsonMap,

    pub root_value: &'a JsonValue,

    /// Opaque user context, passed unchanged into every resolver
    pub context: &'a (dyn Any + Send + Sync),

    /// Field errors collected during execution
    errors: Mutex<Vec<GraphQLError>>,
}

impl<'a> ExecutionContext<'a> {
    /// Select the operation, coerce the request's variables, and index
    /// fragment definitions, producing the context the executor runs on.
    pub fn new(
        schema: &'a Schema,
        document: &'a ast::Document,
        operation_name: Option<&str>,
        variable_values: &JsonMap,
        root_value: &'a JsonValue,
        context: &'a (dyn Any + Send + Sync),
    ) -> Result<Self, RequestError> {
        let mut operations = Vec::new();
        let mut fragments = IndexMap::new();
        for definition in &document.definitions {
            match definition {
                ast::Definition::OperationDefinition(operation) => operations.push(operation),
                ast::Definition::FragmentDefinition(fragment) => {
                    fragments.entry(fragment.name.clone()).or_insert(fragment);
                }
                _ => {}
            }
        }
        let operation = match operation_name {
            None => match operations.as_slice() {
                [] => return Err(RequestError::new(RequestErrorKind::NoOperation)),
                [operation] => *operation,
                [_, second, ..] => {
                    return Err(RequestError::at(
                        RequestErrorKind::AmbiguousOperation,
                        second.location(),
                    ))
                }
            },
            Some(name) => operations
                .iter()
                .copied()
                .find(|operation| {
                    operation
                        .name
                        .as_ref()
                        .is_some_and(|operation_name| *operation_name == *name)
                })
                .ok_or_else(|| {
                    RequestError::new(RequestErrorKind::UnknownOperation(name.to_owned()))
                })?,
        };
        let variable_values = coerce_variable_values(schema, operation, variable_values)?;
        Ok(Self {
            schema,
            document,
            operation,
            fragments,
            variable_values,
            root_value,
            context,
            errors: Mutex::new(Vec::new()),
        })
    }

    /// Context for executing one subscription event: the operation and
    /// variables were already resolved at subscription setup,
    /// and the event payload becomes the root value.
    pub(crate) fn for_event(
        schema: &'a Schema,
        document: &'a ast::Document,
        operation: &'a Node<ast::OperationDefinition>,
        variable_values: JsonMap,
        root_value: &'a JsonValue,
        context: &'a (dyn Any + Send + Sync),
    ) -> Self {
        let mut fragments = IndexMap::new();
        for definition in &document.definitions {
            if let ast::Definition::FragmentDefinition(fragment) = definition {
                fragments.entry(fragment.name.clone()).or_insert(fragment);
            }
        }
        Self {
            schema,
            document,
            operation,
            fragments,
            variable_values,
            root_value,
            context,
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Field execution strategy for the selected operation:
    /// query fields may resolve concurrently, mutation fields and
    /// subscription event fields resolve serially
    pub(crate) fn mode(&self) -> ExecutionMode {
        match self.operation.operation_type {
            ast::OperationType::Query => ExecutionMode::Normal,
            ast::OperationType::Mutation | ast::OperationType::Subscription => {
                ExecutionMode::Sequential
            }
        }
    }

    pub(crate) fn push_error(&self, error: GraphQLError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error)
    }

    pub(crate) fn take_errors(&self) -> Vec<GraphQLError> {
        std::mem::take(&mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Move the coerced variables out; used when handing them
    /// to a subscription stream
    pub(crate) fn into_variable_values(self) -> JsonMap {
        self.variable_values
    }
}

impl fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("operation", &self.operation.name)
            .field("variable_values", &self.variable_values)
            .finish_non_exhaustive()
    }
}
