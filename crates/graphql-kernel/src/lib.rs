//! A GraphQL type system and subscription execution kernel.
//!
//! This crate turns a parsed GraphQL document (the [`ast`] module defines the
//! shape; producing it is the job of an external parser) into a linked,
//! validated [`Schema`], and executes operations against it, including
//! subscriptions, which resolve into a lazy, cancellable stream of responses.
//!
//! ## Building a schema
//!
//! [`Schema::from_document`] lowers a document of type definitions,
//! extensions, and directive definitions into a schema and validates the
//! type-system invariants. [`Schema::extend`] produces a new schema from an
//! existing one plus further definitions, without modifying the input:
//!
//! ```
//! use graphql_kernel::ast;
//! use graphql_kernel::name;
//! use graphql_kernel::Schema;
//!
//! let document = ast::Document {
//!     definitions: vec![ast::ObjectTypeDefinition {
//!         description: None,
//!         name: name!(Query),
//!         implements_interfaces: vec![],
//!         directives: vec![],
//!         fields: vec![ast::FieldDefinition {
//!             description: None,
//!             name: name!(hello),
//!             arguments: vec![],
//!             ty: ast::Type::Named(name!(String)),
//!             directives: vec![],
//!         }
//!         .into()],
//!     }
//!     .into()],
//! };
//! let schema = Schema::from_document(&document).unwrap();
//! assert_eq!(schema.query_type.as_ref().unwrap().as_str(), "Query");
//! ```
//!
//! ## Executing
//!
//! [`execution::execute`] runs a query or mutation. [`execution::subscribe`]
//! sets up a subscription: it resolves the single root subscription field to
//! a source event stream and returns a stream that executes the operation
//! once per event, in source order. Resolvers are attached to a built schema
//! with [`Schema::attach_resolver`] and friends; fields without a resolver
//! read the entry named after the field from the parent object value.

pub mod ast;
pub mod diagnostics;
pub mod execution;
mod name;
mod node;
pub mod schema;

pub use crate::diagnostics::Diagnostic;
pub use crate::diagnostics::DiagnosticList;
pub use crate::diagnostics::TypeSystemError;
pub use crate::execution::execute;
pub use crate::execution::subscribe;
pub use crate::execution::GraphQLError;
pub use crate::execution::JsonMap;
pub use crate::execution::JsonValue;
pub use crate::execution::RequestError;
pub use crate::execution::Response;
pub use crate::name::InvalidNameError;
pub use crate::name::Name;
pub use crate::node::Node;
pub use crate::node::NodeLocation;
pub use crate::schema::BuildError;
pub use crate::schema::Schema;
pub use crate::schema::SchemaBuilder;
pub use crate::schema::SchemaError;
