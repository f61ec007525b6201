//! High-level representation of a GraphQL type system
//!
//! A [`Schema`] is built from an AST [`Document`][crate::ast::Document]
//! (see [`Schema::from_document`]), extended with further documents
//! (see [`Schema::extend`]), and validated (see [`Schema::validate`]).
//!
//! The type graph is cyclic: an object field may reference a type whose fields
//! reference the first type. References are therefore held *by name* and
//! resolved through [`Schema::types`], which keeps the schema a pure value.

use crate::ast;
use crate::ast::impls::deprecation_reason;
use crate::ast::impls::directives_by_name;
use crate::diagnostics::DiagnosticList;
use crate::execution::resolver::FieldResolver;
use crate::execution::resolver::IsTypeOf;
use crate::execution::resolver::ResolveType;
use crate::execution::resolver::ScalarCoercer;
use crate::execution::resolver::SubscriptionResolver;
use crate::Node;
use crate::NodeLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

mod builder;
mod built_in;
mod component;
mod validation;

pub use self::builder::{BuildError, SchemaBuilder, SchemaError};
pub use self::component::{Component, ComponentName, ComponentOrigin, ExtensionId};
pub use crate::ast::{
    Directive, DirectiveDefinition, DirectiveLocation, EnumValueDefinition, InputValueDefinition,
    Name, NamedType, Type, Value,
};

/// High-level representation of a GraphQL schema
#[derive(Debug, Clone)]
pub struct Schema {
    /// The description of the `schema` definition
    pub description: Option<String>,

    /// Directives applied to the `schema` definition or a `schema` extension
    pub directives: DirectiveList,

    /// Built-in and explicit directive definitions
    pub directive_definitions: IndexMap<Name, Node<DirectiveDefinition>>,

    /// Definitions of built-in scalars, introspection types, and explicit
    /// types, with all information from type extensions folded in
    pub types: IndexMap<NamedType, ExtendedType>,

    /// Name of the object type for the `query` root operation
    pub query_type: Option<ComponentName>,

    /// Name of the object type for the `mutation` root operation
    pub mutation_type: Option<ComponentName>,

    /// Name of the object type for the `subscription` root operation
    pub subscription_type: Option<ComponentName>,

    /// The `schema` definition AST node this schema originates from, if any
    pub schema_definition: Option<Node<ast::SchemaDefinition>>,

    /// The `schema` extension AST nodes applied to this schema, in order
    pub extension_ast_nodes: Vec<Node<ast::SchemaExtension>>,

    /// When set, [`validate`][Self::validate] short-circuits and reports
    /// no diagnostics
    pub assume_valid: bool,
}

/// An ordered list of directives applied to some element,
/// each with the definition or extension it came from
#[derive(Clone, Eq, PartialEq, Default)]
pub struct DirectiveList(pub Vec<Component<ast::Directive>>);

/// The definition of a named type, with all information from type extensions
/// folded in.
///
/// The source location is that of the "main" definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedType {
    Scalar(Node<ScalarType>),
    Object(Node<ObjectType>),
    Interface(Node<InterfaceType>),
    Union(Node<UnionType>),
    Enum(Node<EnumType>),
    InputObject(Node<InputObjectType>),
}

#[derive(Clone)]
pub struct ScalarType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,

    /// URL pointing to the specification of a custom scalar,
    /// from the `@specifiedBy` directive.
    /// An extension that supplies one overwrites the definition's.
    pub specified_by_url: Option<String>,

    /// Custom serialize / parse-value / parse-literal coercion.
    /// Not compared by `PartialEq`.
    pub coercer: Option<Arc<dyn ScalarCoercer>>,

    pub ast_node: Option<Node<ast::ScalarTypeDefinition>>,
    pub extension_ast_nodes: Vec<Node<ast::ScalarTypeExtension>>,
}

#[derive(Clone)]
pub struct ObjectType {
    pub name: Name,
    pub description: Option<String>,

    /// Names of the interfaces this object implements:
    /// definition order first, extensions appended, duplicates keep the first
    pub implements_interfaces: IndexSet<ComponentName>,

    pub directives: DirectiveList,

    /// Explicit field definitions.
    ///
    /// The `__typename` meta-field is not included here;
    /// the executor resolves it for every object type.
    pub fields: IndexMap<Name, Component<FieldDefinition>>,

    /// Predicate used as a fallback for abstract-type resolution.
    /// Not compared by `PartialEq`.
    pub is_type_of: Option<Arc<dyn IsTypeOf>>,

    pub ast_node: Option<Node<ast::ObjectTypeDefinition>>,
    pub extension_ast_nodes: Vec<Node<ast::ObjectTypeExtension>>,
}

#[derive(Clone)]
pub struct InterfaceType {
    pub name: Name,
    pub description: Option<String>,

    /// Names of the interfaces this interface itself implements
    pub implements_interfaces: IndexSet<ComponentName>,

    pub directives: DirectiveList,

    /// Explicit field definitions
    pub fields: IndexMap<Name, Component<FieldDefinition>>,

    /// Determines the concrete object type of values resolved for a field of
    /// this interface type. Not compared by `PartialEq`.
    pub resolve_type: Option<Arc<dyn ResolveType>>,

    pub ast_node: Option<Node<ast::InterfaceTypeDefinition>>,
    pub extension_ast_nodes: Vec<Node<ast::InterfaceTypeExtension>>,
}

#[derive(Clone)]
pub struct UnionType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,

    /// Names of the member object types:
    /// definition order first, extensions appended, duplicates keep the first
    pub members: IndexSet<ComponentName>,

    /// Determines the concrete object type of values resolved for a field of
    /// this union type. Not compared by `PartialEq`.
    pub resolve_type: Option<Arc<dyn ResolveType>>,

    pub ast_node: Option<Node<ast::UnionTypeDefinition>>,
    pub extension_ast_nodes: Vec<Node<ast::UnionTypeExtension>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub values: IndexMap<Name, Component<ast::EnumValueDefinition>>,

    pub ast_node: Option<Node<ast::EnumTypeDefinition>>,
    pub extension_ast_nodes: Vec<Node<ast::EnumTypeExtension>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    pub name: Name,
    pub description: Option<String>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, Component<ast::InputValueDefinition>>,

    /// From the `@oneOf` directive: exactly one field must be provided,
    /// all fields must be nullable and default-free
    pub is_one_of: bool,

    pub ast_node: Option<Node<ast::InputObjectTypeDefinition>>,
    pub extension_ast_nodes: Vec<Node<ast::InputObjectTypeExtension>>,
}

/// The definition of an output field of an object or interface type
#[derive(Clone)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<Node<ast::InputValueDefinition>>,
    pub ty: Type,
    pub directives: Vec<Node<ast::Directive>>,

    /// Resolves this field during execution.
    /// Fields without one use the default resolver, which reads the entry
    /// named after the field from the parent object value.
    /// Not compared by `PartialEq`.
    pub resolver: Option<Arc<dyn FieldResolver>>,

    /// Resolves this field into a source event stream during subscription
    /// setup; only meaningful on the subscription root type.
    /// Not compared by `PartialEq`.
    pub subscriber: Option<Arc<dyn SubscriptionResolver>>,
}

/// Could not find the requested field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLookupError {
    NoSuchType,
    NoSuchField,
}

impl Schema {
    /// Returns an (almost) empty schema.
    ///
    /// It starts with built-in directives, built-in scalars, and introspection
    /// types. It can then be extended with documents or filled programmatically.
    #[allow(clippy::new_without_default)] // not a great implicit default in generic contexts
    pub fn new() -> Self {
        Schema {
            description: None,
            directives: DirectiveList::new(),
            directive_definitions: built_in::directives().clone(),
            types: built_in::types().clone(),
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            schema_definition: None,
            extension_ast_nodes: Vec::new(),
            assume_valid: false,
        }
    }

    /// Build a schema from an AST document and validate it.
    ///
    /// Executable definitions in the document, if any, are ignored.
    /// Use [`builder()`][Self::builder] to skip validation.
    pub fn from_document(document: &ast::Document) -> Result<Self, SchemaError> {
        SchemaBuilder::new().build(document)
    }

    /// Produce a new schema from this schema plus the definitions and
    /// extensions of the given document, and validate it.
    ///
    /// `self` is not modified: nodes are shared between the two schemas
    /// and copied on write.
    pub fn extend(&self, document: &ast::Document) -> Result<Self, SchemaError> {
        SchemaBuilder::extending(self).build(document)
    }

    /// Returns a new builder for creating a schema from AST documents,
    /// initialized with built-in directives, built-in scalars,
    /// and introspection types
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Walk the linked graph and check every type-system invariant,
    /// collecting all violations rather than stopping at the first.
    ///
    /// Short-circuits when [`assume_valid`][Self::assume_valid] is set.
    pub fn validate(&self) -> Result<(), DiagnosticList> {
        if self.assume_valid {
            return Ok(());
        }
        let mut errors = DiagnosticList::new();
        validation::validate_schema(&mut errors, self);
        errors.into_result()
    }

    /// Returns the type with the given name, if it is a scalar type
    pub fn get_scalar(&self, name: &str) -> Option<&Node<ScalarType>> {
        if let Some(ExtendedType::Scalar(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an object type
    pub fn get_object(&self, name: &str) -> Option<&Node<ObjectType>> {
        if let Some(ExtendedType::Object(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an interface type
    pub fn get_interface(&self, name: &str) -> Option<&Node<InterfaceType>> {
        if let Some(ExtendedType::Interface(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a union type
    pub fn get_union(&self, name: &str) -> Option<&Node<UnionType>> {
        if let Some(ExtendedType::Union(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an enum type
    pub fn get_enum(&self, name: &str) -> Option<&Node<EnumType>> {
        if let Some(ExtendedType::Enum(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is an input object type
    pub fn get_input_object(&self, name: &str) -> Option<&Node<InputObjectType>> {
        if let Some(ExtendedType::InputObject(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the name of the object type for the root operation
    /// with the given operation kind
    pub fn root_operation(&self, operation_type: ast::OperationType) -> Option<&ComponentName> {
        match operation_type {
            ast::OperationType::Query => &self.query_type,
            ast::OperationType::Mutation => &self.mutation_type,
            ast::OperationType::Subscription => &self.subscription_type,
        }
        .as_ref()
    }

    /// Returns the definition of a type's explicit field
    pub fn type_field(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&Component<FieldDefinition>, FieldLookupError> {
        let ty_def = self
            .types
            .get(type_name)
            .ok_or(FieldLookupError::NoSuchType)?;
        match ty_def {
            ExtendedType::Object(ty) => ty.fields.get(field_name),
            ExtendedType::Interface(ty) => ty.fields.get(field_name),
            ExtendedType::Scalar(_)
            | ExtendedType::Union(_)
            | ExtendedType::Enum(_)
            | ExtendedType::InputObject(_) => None,
        }
        .ok_or(FieldLookupError::NoSuchField)
    }

    /// Returns a map of interface names to names of types that implement
    /// that interface
    ///
    /// `Schema` only stores the inverse relationship
    /// (in [`ObjectType::implements_interfaces`] and
    /// [`InterfaceType::implements_interfaces`]), so iterating the
    /// implementers of an interface requires a linear scan of all types.
    /// If that is repeated for multiple interfaces,
    /// gathering them all at once amortizes that cost.
    pub fn implementers_map(&self) -> HashMap<Name, HashSet<Name>> {
        let mut map = HashMap::<Name, HashSet<Name>>::new();
        for (ty_name, ty) in &self.types {
            let interfaces = match ty {
                ExtendedType::Object(def) => &def.implements_interfaces,
                ExtendedType::Interface(def) => &def.implements_interfaces,
                ExtendedType::Scalar(_)
                | ExtendedType::Union(_)
                | ExtendedType::Enum(_)
                | ExtendedType::InputObject(_) => continue,
            };
            for interface in interfaces {
                map.entry(interface.name.clone())
                    .or_default()
                    .insert(ty_name.clone());
            }
        }
        map
    }

    /// Returns whether `maybe_subtype` is a subtype of `abstract_type`,
    /// which means either:
    ///
    /// * `maybe_subtype` implements the interface `abstract_type`
    /// * `maybe_subtype` is a member of the union type `abstract_type`
    pub fn is_subtype(&self, abstract_type: &str, maybe_subtype: &str) -> bool {
        self.types.get(abstract_type).is_some_and(|ty| match ty {
            ExtendedType::Interface(_) => self.types.get(maybe_subtype).is_some_and(|ty2| {
                match ty2 {
                    ExtendedType::Object(def) => &def.implements_interfaces,
                    ExtendedType::Interface(def) => &def.implements_interfaces,
                    ExtendedType::Scalar(_)
                    | ExtendedType::Union(_)
                    | ExtendedType::Enum(_)
                    | ExtendedType::InputObject(_) => return false,
                }
                .contains(abstract_type)
            }),
            ExtendedType::Union(def) => def.members.contains(maybe_subtype),
            ExtendedType::Scalar(_)
            | ExtendedType::Object(_)
            | ExtendedType::Enum(_)
            | ExtendedType::InputObject(_) => false,
        })
    }

    /// Returns the object types a value of the given abstract (interface or
    /// union) type can be at runtime.
    ///
    /// Union members are returned in declaration order; interface implementers
    /// in type-map order.
    pub fn get_possible_types(&self, abstract_type: &str) -> Vec<&Node<ObjectType>> {
        match self.types.get(abstract_type) {
            Some(ExtendedType::Union(def)) => def
                .members
                .iter()
                .filter_map(|member| self.get_object(member))
                .collect(),
            Some(ExtendedType::Interface(_)) => self
                .types
                .values()
                .filter_map(|ty| {
                    if let ExtendedType::Object(def) = ty {
                        def.implements_interfaces
                            .contains(abstract_type)
                            .then_some(def)
                    } else {
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the object and interface types that declare they implement
    /// the given interface, in type-map order
    pub fn get_implementations(&self, interface: &str) -> Vec<&ExtendedType> {
        if self.get_interface(interface).is_none() {
            return Vec::new();
        }
        self.types
            .values()
            .filter(|ty| {
                let interfaces = match ty {
                    ExtendedType::Object(def) => &def.implements_interfaces,
                    ExtendedType::Interface(def) => &def.implements_interfaces,
                    _ => return false,
                };
                interfaces.contains(interface)
            })
            .collect()
    }

    /// Returns whether the type `ty` is defined as an input type
    ///
    /// <https://spec.graphql.org/October2021/#sec-Input-and-Output-Types>
    pub fn is_input_type(&self, ty: &Type) -> bool {
        self.types
            .get(ty.inner_named_type().as_str())
            .is_some_and(ExtendedType::is_input_type)
    }

    /// Returns whether the type `ty` is defined as an output type
    ///
    /// <https://spec.graphql.org/October2021/#sec-Input-and-Output-Types>
    pub fn is_output_type(&self, ty: &Type) -> bool {
        self.types
            .get(ty.inner_named_type().as_str())
            .is_some_and(ExtendedType::is_output_type)
    }

    /// Attach a resolver to the named object or interface field.
    ///
    /// Returns false (and changes nothing) if no such field exists.
    pub fn attach_resolver(
        &mut self,
        type_name: &str,
        field_name: &str,
        resolver: Arc<dyn FieldResolver>,
    ) -> bool {
        self.with_field_mut(type_name, field_name, |field| {
            field.resolver = Some(resolver);
        })
    }

    /// Attach a subscription resolver to the named field;
    /// only meaningful on the subscription root type.
    ///
    /// Returns false (and changes nothing) if no such field exists.
    pub fn attach_subscriber(
        &mut self,
        type_name: &str,
        field_name: &str,
        subscriber: Arc<dyn SubscriptionResolver>,
    ) -> bool {
        self.with_field_mut(type_name, field_name, |field| {
            field.subscriber = Some(subscriber);
        })
    }

    /// Attach custom coercion callbacks to the named scalar type.
    ///
    /// Returns false (and changes nothing) if no such scalar exists.
    pub fn attach_coercer(&mut self, type_name: &str, coercer: Arc<dyn ScalarCoercer>) -> bool {
        match self.types.get_mut(type_name) {
            Some(ExtendedType::Scalar(ty)) => {
                ty.make_mut().coercer = Some(coercer);
                true
            }
            _ => false,
        }
    }

    /// Attach an abstract-type resolution callback to the named interface
    /// or union type.
    ///
    /// Returns false (and changes nothing) if no such type exists.
    pub fn attach_type_resolver(
        &mut self,
        type_name: &str,
        resolve_type: Arc<dyn ResolveType>,
    ) -> bool {
        match self.types.get_mut(type_name) {
            Some(ExtendedType::Interface(ty)) => {
                ty.make_mut().resolve_type = Some(resolve_type);
                true
            }
            Some(ExtendedType::Union(ty)) => {
                ty.make_mut().resolve_type = Some(resolve_type);
                true
            }
            _ => false,
        }
    }

    /// Attach an `is_type_of` predicate to the named object type.
    ///
    /// Returns false (and changes nothing) if no such type exists.
    pub fn attach_is_type_of(&mut self, type_name: &str, is_type_of: Arc<dyn IsTypeOf>) -> bool {
        match self.types.get_mut(type_name) {
            Some(ExtendedType::Object(ty)) => {
                ty.make_mut().is_type_of = Some(is_type_of);
                true
            }
            _ => false,
        }
    }

    fn with_field_mut(
        &mut self,
        type_name: &str,
        field_name: &str,
        f: impl FnOnce(&mut FieldDefinition),
    ) -> bool {
        let fields = match self.types.get_mut(type_name) {
            Some(ExtendedType::Object(ty)) => &mut ty.make_mut().fields,
            Some(ExtendedType::Interface(ty)) => &mut ty.make_mut().fields,
            _ => return false,
        };
        match fields.get_mut(field_name) {
            Some(field) => {
                f(field.make_mut());
                true
            }
            None => false,
        }
    }
}

impl ExtendedType {
    /// Return the name of the type.
    pub fn name(&self) -> &Name {
        match self {
            Self::Scalar(ty) => &ty.name,
            Self::Object(ty) => &ty.name,
            Self::Interface(ty) => &ty.name,
            Self::Union(ty) => &ty.name,
            Self::Enum(ty) => &ty.name,
            Self::InputObject(ty) => &ty.name,
        }
    }

    /// Return the source location of the type's base definition.
    ///
    /// If the type has extensions, those are not covered by this location.
    pub fn location(&self) -> Option<&NodeLocation> {
        match self {
            Self::Scalar(ty) => ty.location(),
            Self::Object(ty) => ty.location(),
            Self::Interface(ty) => ty.location(),
            Self::Union(ty) => ty.location(),
            Self::Enum(ty) => ty.location(),
            Self::InputObject(ty) => ty.location(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    pub fn is_input_object(&self) -> bool {
        matches!(self, Self::InputObject(_))
    }

    /// Returns true if a value of this type can be used as an input value.
    ///
    /// This implements spec function
    /// [`IsInputType(type)`](https://spec.graphql.org/October2021/#IsInputType())
    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    /// Returns true if a value of this type can be used as an output value.
    ///
    /// This implements spec function
    /// [`IsOutputType(type)`](https://spec.graphql.org/October2021/#IsOutputType())
    pub fn is_output_type(&self) -> bool {
        matches!(
            self,
            Self::Scalar(_) | Self::Enum(_) | Self::Object(_) | Self::Interface(_) | Self::Union(_)
        )
    }

    /// Returns whether this is a built-in scalar or introspection type
    pub fn is_built_in(&self) -> bool {
        built_in::is_built_in_type(self.name())
    }

    pub fn directives(&self) -> &DirectiveList {
        match self {
            Self::Scalar(ty) => &ty.directives,
            Self::Object(ty) => &ty.directives,
            Self::Interface(ty) => &ty.directives,
            Self::Union(ty) => &ty.directives,
            Self::Enum(ty) => &ty.directives,
            Self::InputObject(ty) => &ty.directives,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(ty) => ty.description.as_deref(),
            Self::Object(ty) => ty.description.as_deref(),
            Self::Interface(ty) => ty.description.as_deref(),
            Self::Union(ty) => ty.description.as_deref(),
            Self::Enum(ty) => ty.description.as_deref(),
            Self::InputObject(ty) => ty.description.as_deref(),
        }
    }
}

impl FieldDefinition {
    /// Returns the definition of the argument with the given name, if any
    pub fn argument_by_name(&self, name: &str) -> Option<&Node<ast::InputValueDefinition>> {
        self.arguments.iter().find(|arg| arg.name == *name)
    }

    /// Returns an iterator of applied directives with the given name
    pub fn directives_by_name<'def: 'name, 'name>(
        &'def self,
        name: &'name str,
    ) -> impl Iterator<Item = &'def Node<ast::Directive>> + 'name {
        directives_by_name(&self.directives, name)
    }

    /// If this field is marked `@deprecated`, returns the reason
    pub fn deprecation_reason(&self) -> Option<&str> {
        deprecation_reason(&self.directives)
    }
}

impl DirectiveList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns an iterator of directives with the given name.
    ///
    /// This method is best for repeatable directives. For non-repeatable
    /// directives, see [`get`][Self::get] (singular)
    pub fn get_all<'def: 'name, 'name>(
        &'def self,
        name: &'name str,
    ) -> impl Iterator<Item = &'def Component<ast::Directive>> + 'name {
        self.0.iter().filter(move |dir| dir.name == *name)
    }

    /// Returns the first directive with the given name, if any.
    ///
    /// This method is best for non-repeatable directives. For repeatable
    /// directives, see [`get_all`][Self::get_all] (plural)
    pub fn get(&self, name: &str) -> Option<&Component<ast::Directive>> {
        self.get_all(name).next()
    }

    /// Returns whether there is a directive with the given name
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl fmt::Debug for DirectiveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::ops::Deref for DirectiveList {
    type Target = Vec<Component<ast::Directive>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for DirectiveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a DirectiveList {
    type Item = &'a Component<ast::Directive>;
    type IntoIter = std::slice::Iter<'a, Component<ast::Directive>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<D> FromIterator<D> for DirectiveList
where
    D: Into<Component<ast::Directive>>,
{
    fn from_iter<T: IntoIterator<Item = D>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Eq for Schema {}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            description,
            directives,
            directive_definitions,
            types,
            query_type,
            mutation_type,
            subscription_type,
            schema_definition: _,
            extension_ast_nodes: _,
            assume_valid: _,
        } = self;
        *description == other.description
            && *directives == other.directives
            && *directive_definitions == other.directive_definitions
            && *types == other.types
            && *query_type == other.query_type
            && *mutation_type == other.mutation_type
            && *subscription_type == other.subscription_type
    }
}

impl Eq for ScalarType {}

impl PartialEq for ScalarType {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            name,
            description,
            directives,
            specified_by_url,
            coercer: _, // callbacks are not comparable
            ast_node,
            extension_ast_nodes,
        } = self;
        *name == other.name
            && *description == other.description
            && *directives == other.directives
            && *specified_by_url == other.specified_by_url
            && *ast_node == other.ast_node
            && *extension_ast_nodes == other.extension_ast_nodes
    }
}

impl Eq for ObjectType {}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            name,
            description,
            implements_interfaces,
            directives,
            fields,
            is_type_of: _, // callbacks are not comparable
            ast_node,
            extension_ast_nodes,
        } = self;
        *name == other.name
            && *description == other.description
            && *implements_interfaces == other.implements_interfaces
            && *directives == other.directives
            && *fields == other.fields
            && *ast_node == other.ast_node
            && *extension_ast_nodes == other.extension_ast_nodes
    }
}

impl Eq for InterfaceType {}

impl PartialEq for InterfaceType {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            name,
            description,
            implements_interfaces,
            directives,
            fields,
            resolve_type: _, // callbacks are not comparable
            ast_node,
            extension_ast_nodes,
        } = self;
        *name == other.name
            && *description == other.description
            && *implements_interfaces == other.implements_interfaces
            && *directives == other.directives
            && *fields == other.fields
            && *ast_node == other.ast_node
            && *extension_ast_nodes == other.extension_ast_nodes
    }
}

impl Eq for UnionType {}

impl PartialEq for UnionType {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            name,
            description,
            directives,
            members,
            resolve_type: _, // callbacks are not comparable
            ast_node,
            extension_ast_nodes,
        } = self;
        *name == other.name
            && *description == other.description
            && *directives == other.directives
            && *members == other.members
            && *ast_node == other.ast_node
            && *extension_ast_nodes == other.extension_ast_nodes
    }
}

impl Eq for FieldDefinition {}

impl PartialEq for FieldDefinition {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            description,
            name,
            arguments,
            ty,
            directives,
            resolver: _,   // callbacks are not comparable
            subscriber: _, // callbacks are not comparable
        } = self;
        *description == other.description
            && *name == other.name
            && *arguments == other.arguments
            && *ty == other.ty
            && *directives == other.directives
    }
}

impl fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("directives", &self.directives)
            .field("specified_by_url", &self.specified_by_url)
            .field("has_coercer", &self.coercer.is_some())
            .finish()
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("implements_interfaces", &self.implements_interfaces)
            .field("directives", &self.directives)
            .field("fields", &self.fields)
            .field("has_is_type_of", &self.is_type_of.is_some())
            .finish()
    }
}

impl fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceType")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("implements_interfaces", &self.implements_interfaces)
            .field("directives", &self.directives)
            .field("fields", &self.fields)
            .field("has_resolve_type", &self.resolve_type.is_some())
            .finish()
    }
}

impl fmt::Debug for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionType")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("directives", &self.directives)
            .field("members", &self.members)
            .field("has_resolve_type", &self.resolve_type.is_some())
            .finish()
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("description", &self.description)
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .field("ty", &self.ty)
            .field("directives", &self.directives)
            .field("has_resolver", &self.resolver.is_some())
            .field("has_subscriber", &self.subscriber.is_some())
            .finish()
    }
}

impl From<Node<ScalarType>> for ExtendedType {
    fn from(ty: Node<ScalarType>) -> Self {
        Self::Scalar(ty)
    }
}

impl From<Node<ObjectType>> for ExtendedType {
    fn from(ty: Node<ObjectType>) -> Self {
        Self::Object(ty)
    }
}

impl From<Node<InterfaceType>> for ExtendedType {
    fn from(ty: Node<InterfaceType>) -> Self {
        Self::Interface(ty)
    }
}

impl From<Node<UnionType>> for ExtendedType {
    fn from(ty: Node<UnionType>) -> Self {
        Self::Union(ty)
    }
}

impl From<Node<EnumType>> for ExtendedType {
    fn from(ty: Node<EnumType>) -> Self {
        Self::Enum(ty)
    }
}

impl From<Node<InputObjectType>> for ExtendedType {
    fn from(ty: Node<InputObjectType>) -> Self {
        Self::InputObject(ty)
    }
}
