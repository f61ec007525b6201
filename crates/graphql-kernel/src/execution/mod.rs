//! Executing a GraphQL request against a [`Schema`][crate::Schema]
//! and returning a [response][Response].
//!
//! [`execute`] runs a query or mutation to completion and returns a single
//! [`Response`]. [`subscribe`] resolves a subscription operation into a
//! [`SubscriptionStream`]: a lazy, cancellable stream that executes the
//! operation once per source event.
//!
//! Everything potentially blocking is a future; the executor works on any
//! futures runtime and resolves query fields concurrently, mutation fields
//! and subscription events sequentially.

mod context;
mod engine;
mod input_coercion;
pub(crate) mod resolver;
mod response;
mod result_coercion;
mod stream;
mod subscription;

pub use self::context::ExecutionContext;
pub use self::context::RequestError;
pub use self::context::RequestErrorKind;
pub use self::engine::execute;
pub use self::resolver::FieldResolver;
pub use self::resolver::IsTypeOf;
pub use self::resolver::Resolved;
pub use self::resolver::ResolveFn;
pub use self::resolver::ResolverContext;
pub use self::resolver::ResolverError;
pub use self::resolver::ResolveType;
pub use self::resolver::ScalarCoercer;
pub use self::resolver::SourceEventStream;
pub use self::resolver::SubscribeFn;
pub use self::resolver::SubscriptionResolver;
pub use self::response::GraphQLError;
pub use self::response::GraphQLLocation;
pub use self::response::PathElement;
pub use self::response::Response;
pub use self::stream::SubscriptionStream;
pub use self::subscription::subscribe;

/// Re-export of the version of the `serde_json_bytes` crate
/// used for [`JsonValue`] and [`JsonMap`]
pub use serde_json_bytes;

/// A JSON-compatible dynamically-typed value.
///
/// Note: [`serde_json_bytes::Value`] is similar
/// to [`serde_json::Value`][serde_json_bytes::serde_json::Value]
/// but uses its reference-counted [`ByteString`][serde_json_bytes::ByteString]
/// for string values and map keys.
pub type JsonValue = serde_json_bytes::Value;

/// A JSON-compatible object/map with string keys and dynamically-typed values.
pub type JsonMap = serde_json_bytes::Map<serde_json_bytes::ByteString, JsonValue>;
