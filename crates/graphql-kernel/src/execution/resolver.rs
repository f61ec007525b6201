//! Capability interfaces for user-supplied callbacks:
//! field resolvers, subscription resolvers, scalar coercion,
//! and abstract-type resolution.
//!
//! A schema holds these behind shared ownership ([`std::sync::Arc`])
//! since one schema may serve many concurrent requests.

use crate::ast;
use crate::execution::JsonMap;
use crate::execution::JsonValue;
use crate::Name;
use crate::Schema;
use async_trait::async_trait;
use futures::stream::Stream;
use std::any::Any;
use std::fmt;
use std::pin::Pin;

/// The source event stream of a subscription: a pull-based async iterator of
/// raw event payloads, each of which is executed as a query.
///
/// The end of the stream is the end of the subscription. An `Err` item is
/// delivered as a response carrying the error; it does not terminate the
/// stream. Dropping the stream cancels the subscription and must release
/// the resources backing it.
pub type SourceEventStream = Pin<Box<dyn Stream<Item = Result<JsonValue, ResolverError>> + Send>>;

/// Everything a resolver callback gets to see for one field resolution.
///
/// The user-supplied `context` is opaque to this crate:
/// it is passed through unchanged and never inspected.
pub struct ResolverContext<'a> {
    pub schema: &'a Schema,
    /// The parent object value; for root fields this is the root value,
    /// and for subscription event execution it is the event payload.
    pub parent: &'a JsonValue,
    /// Coerced argument values for this field
    pub arguments: &'a JsonMap,
    pub field_name: &'a Name,
    pub context: &'a (dyn Any + Send + Sync),
}

/// The value produced by a field resolver
pub enum Resolved {
    /// A concrete value: a leaf, or an object/list that value completion
    /// descends into
    Value(JsonValue),

    /// A source event stream; only meaningful for a field of the subscription
    /// root type during subscription setup
    Stream(SourceEventStream),
}

impl Resolved {
    /// Construct a null value
    pub fn null() -> Self {
        Self::Value(JsonValue::Null)
    }

    /// Construct a value from something convertible to JSON
    pub fn value(value: impl Into<JsonValue>) -> Self {
        Self::Value(value.into())
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// An error returned by a resolver callback.
///
/// Resolver failures are values, never panics or failed futures,
/// so that cancellation is not confused with failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ResolverError {
    pub message: String,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ResolverError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ResolverError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Resolves one field of an object to a value.
///
/// Attached to a [`FieldDefinition`][crate::schema::FieldDefinition];
/// fields without one use [the default resolver][default_resolve].
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Result<Resolved, ResolverError>;
}

/// Resolves the root field of a subscription operation into the source event
/// stream that backs the subscription.
#[async_trait]
pub trait SubscriptionResolver: Send + Sync {
    async fn subscribe(&self, ctx: ResolverContext<'_>) -> Result<SourceEventStream, ResolverError>;
}

/// Custom coercion for a scalar type.
///
/// Built-in scalars coerce according to the GraphQL specification without
/// consulting this trait; custom scalars without a coercer pass values
/// through unchanged.
pub trait ScalarCoercer: Send + Sync {
    /// *Result coercion*: turn a resolved value into the response value
    fn serialize(&self, value: &JsonValue) -> Result<JsonValue, ResolverError>;

    /// *Input coercion* for a value provided through variables
    fn parse_value(&self, value: &JsonValue) -> Result<JsonValue, ResolverError>;

    /// *Input coercion* for a literal value in the document
    fn parse_literal(&self, value: &ast::Value) -> Result<JsonValue, ResolverError>;
}

/// Determines the concrete object type of a value
/// resolved for an interface or union field
pub trait ResolveType: Send + Sync {
    fn resolve_type(
        &self,
        value: &JsonValue,
        context: &(dyn Any + Send + Sync),
    ) -> Option<Name>;
}

/// Predicate deciding whether a value belongs to a particular object type;
/// the fallback for abstract-type resolution when no [`ResolveType`]
/// callback is attached and the value carries no `__typename` entry
pub trait IsTypeOf: Send + Sync {
    fn is_type_of(&self, value: &JsonValue, context: &(dyn Any + Send + Sync)) -> bool;
}

/// Wraps a plain function as a [`FieldResolver`]
pub struct ResolveFn<F>(pub F);

#[async_trait]
impl<F> FieldResolver for ResolveFn<F>
where
    F: for<'a> Fn(ResolverContext<'a>) -> Result<Resolved, ResolverError> + Send + Sync,
{
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Result<Resolved, ResolverError> {
        (self.0)(ctx)
    }
}

/// Wraps a plain function as a [`SubscriptionResolver`]
pub struct SubscribeFn<F>(pub F);

#[async_trait]
impl<F> SubscriptionResolver for SubscribeFn<F>
where
    F: for<'a> Fn(ResolverContext<'a>) -> Result<SourceEventStream, ResolverError> + Send + Sync,
{
    async fn subscribe(&self, ctx: ResolverContext<'_>) -> Result<SourceEventStream, ResolverError> {
        (self.0)(ctx)
    }
}

/// The default resolver used for fields with no attached [`FieldResolver`]:
/// reads the entry named after the field from the parent object value,
/// or resolves to null when the parent is not an object or has no such entry.
pub(crate) fn default_resolve(parent: &JsonValue, field_name: &str) -> Resolved {
    let value = parent
        .as_object()
        .and_then(|object| object.get(field_name))
        .cloned()
        .unwrap_or(JsonValue::Null);
    Resolved::Value(value)
}
