use super::*;
use crate::NodeLocation;
use std::fmt;

macro_rules! directive_by_name_method {
    () => {
        /// Returns the first directive with the given name, if any.
        ///
        /// This method is best for non-repeatable directives. For repeatable directives,
        /// see [`directives_by_name`][Self::directives_by_name] (plural)
        pub fn directive_by_name(&self, name: &str) -> Option<&Node<Directive>> {
            self.directives_by_name(name).next()
        }
    };
}

macro_rules! directive_methods {
    () => {
        /// Returns an iterator of directives with the given name.
        ///
        /// This method is best for repeatable directives. For non-repeatable directives,
        /// see [`directive_by_name`][Self::directive_by_name] (singular)
        pub fn directives_by_name<'def: 'name, 'name>(
            &'def self,
            name: &'name str,
        ) -> impl Iterator<Item = &'def Node<Directive>> + 'name {
            directives_by_name(&self.directives, name)
        }

        directive_by_name_method!();
    };
}

pub(crate) fn directives_by_name<'def: 'name, 'name>(
    directives: &'def [Node<Directive>],
    name: &'name str,
) -> impl Iterator<Item = &'def Node<Directive>> + 'name {
    directives.iter().filter(move |dir| dir.name == *name)
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Skip two not-useful indentation levels
        for def in &self.definitions {
            def.fmt(f)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl Definition {
    /// Returns true if this is an executable definition (operation or fragment),
    /// which the type system ignores.
    pub fn is_executable_definition(&self) -> bool {
        matches!(
            self,
            Self::OperationDefinition(_) | Self::FragmentDefinition(_)
        )
    }

    /// Returns true if this is an extension of another definition.
    pub fn is_extension_definition(&self) -> bool {
        matches!(
            self,
            Self::SchemaExtension(_)
                | Self::ScalarTypeExtension(_)
                | Self::ObjectTypeExtension(_)
                | Self::InterfaceTypeExtension(_)
                | Self::UnionTypeExtension(_)
                | Self::EnumTypeExtension(_)
                | Self::InputObjectTypeExtension(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::OperationDefinition(_) => "OperationDefinition",
            Self::FragmentDefinition(_) => "FragmentDefinition",
            Self::DirectiveDefinition(_) => "DirectiveDefinition",
            Self::SchemaDefinition(_) => "SchemaDefinition",
            Self::ScalarTypeDefinition(_) => "ScalarTypeDefinition",
            Self::ObjectTypeDefinition(_) => "ObjectTypeDefinition",
            Self::InterfaceTypeDefinition(_) => "InterfaceTypeDefinition",
            Self::UnionTypeDefinition(_) => "UnionTypeDefinition",
            Self::EnumTypeDefinition(_) => "EnumTypeDefinition",
            Self::InputObjectTypeDefinition(_) => "InputObjectTypeDefinition",
            Self::SchemaExtension(_) => "SchemaExtension",
            Self::ScalarTypeExtension(_) => "ScalarTypeExtension",
            Self::ObjectTypeExtension(_) => "ObjectTypeExtension",
            Self::InterfaceTypeExtension(_) => "InterfaceTypeExtension",
            Self::UnionTypeExtension(_) => "UnionTypeExtension",
            Self::EnumTypeExtension(_) => "EnumTypeExtension",
            Self::InputObjectTypeExtension(_) => "InputObjectTypeExtension",
        }
    }

    /// Returns the name of the definition or extension target, if any.
    /// Operations may be anonymous; `schema` definitions and extensions are nameless.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::OperationDefinition(def) => def.name.as_ref(),
            Self::FragmentDefinition(def) => Some(&def.name),
            Self::DirectiveDefinition(def) => Some(&def.name),
            Self::SchemaDefinition(_) | Self::SchemaExtension(_) => None,
            Self::ScalarTypeDefinition(def) => Some(&def.name),
            Self::ObjectTypeDefinition(def) => Some(&def.name),
            Self::InterfaceTypeDefinition(def) => Some(&def.name),
            Self::UnionTypeDefinition(def) => Some(&def.name),
            Self::EnumTypeDefinition(def) => Some(&def.name),
            Self::InputObjectTypeDefinition(def) => Some(&def.name),
            Self::ScalarTypeExtension(def) => Some(&def.name),
            Self::ObjectTypeExtension(def) => Some(&def.name),
            Self::InterfaceTypeExtension(def) => Some(&def.name),
            Self::UnionTypeExtension(def) => Some(&def.name),
            Self::EnumTypeExtension(def) => Some(&def.name),
            Self::InputObjectTypeExtension(def) => Some(&def.name),
        }
    }

    pub fn location(&self) -> Option<&NodeLocation> {
        match self {
            Self::OperationDefinition(def) => def.location(),
            Self::FragmentDefinition(def) => def.location(),
            Self::DirectiveDefinition(def) => def.location(),
            Self::SchemaDefinition(def) => def.location(),
            Self::ScalarTypeDefinition(def) => def.location(),
            Self::ObjectTypeDefinition(def) => def.location(),
            Self::InterfaceTypeDefinition(def) => def.location(),
            Self::UnionTypeDefinition(def) => def.location(),
            Self::EnumTypeDefinition(def) => def.location(),
            Self::InputObjectTypeDefinition(def) => def.location(),
            Self::SchemaExtension(def) => def.location(),
            Self::ScalarTypeExtension(def) => def.location(),
            Self::ObjectTypeExtension(def) => def.location(),
            Self::InterfaceTypeExtension(def) => def.location(),
            Self::UnionTypeExtension(def) => def.location(),
            Self::EnumTypeExtension(def) => def.location(),
            Self::InputObjectTypeExtension(def) => def.location(),
        }
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperationDefinition(def) => def.fmt(f),
            Self::FragmentDefinition(def) => def.fmt(f),
            Self::DirectiveDefinition(def) => def.fmt(f),
            Self::SchemaDefinition(def) => def.fmt(f),
            Self::ScalarTypeDefinition(def) => def.fmt(f),
            Self::ObjectTypeDefinition(def) => def.fmt(f),
            Self::InterfaceTypeDefinition(def) => def.fmt(f),
            Self::UnionTypeDefinition(def) => def.fmt(f),
            Self::EnumTypeDefinition(def) => def.fmt(f),
            Self::InputObjectTypeDefinition(def) => def.fmt(f),
            Self::SchemaExtension(def) => def.fmt(f),
            Self::ScalarTypeExtension(def) => def.fmt(f),
            Self::ObjectTypeExtension(def) => def.fmt(f),
            Self::InterfaceTypeExtension(def) => def.fmt(f),
            Self::UnionTypeExtension(def) => def.fmt(f),
            Self::EnumTypeExtension(def) => def.fmt(f),
            Self::InputObjectTypeExtension(def) => def.fmt(f),
        }
    }
}

macro_rules! definition_from {
    ($($variant: ident($ty: ty),)+) => {
        $(
            impl From<Node<$ty>> for Definition {
                fn from(node: Node<$ty>) -> Self {
                    Self::$variant(node)
                }
            }

            impl From<$ty> for Definition {
                fn from(node: $ty) -> Self {
                    Self::$variant(Node::new(node))
                }
            }
        )+
    };
}

definition_from! {
    OperationDefinition(OperationDefinition),
    FragmentDefinition(FragmentDefinition),
    DirectiveDefinition(DirectiveDefinition),
    SchemaDefinition(SchemaDefinition),
    ScalarTypeDefinition(ScalarTypeDefinition),
    ObjectTypeDefinition(ObjectTypeDefinition),
    InterfaceTypeDefinition(InterfaceTypeDefinition),
    UnionTypeDefinition(UnionTypeDefinition),
    EnumTypeDefinition(EnumTypeDefinition),
    InputObjectTypeDefinition(InputObjectTypeDefinition),
    SchemaExtension(SchemaExtension),
    ScalarTypeExtension(ScalarTypeExtension),
    ObjectTypeExtension(ObjectTypeExtension),
    InterfaceTypeExtension(InterfaceTypeExtension),
    UnionTypeExtension(UnionTypeExtension),
    EnumTypeExtension(EnumTypeExtension),
    InputObjectTypeExtension(InputObjectTypeExtension),
}

impl OperationType {
    /// Get the name of this operation type as it would appear in a document:
    /// `query`, `mutation`, or `subscription`
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// The name of the object type used for this root operation
    /// when no `schema` definition names one
    pub const fn default_type_name(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }

    /// The directive location that applies to an operation of this type
    pub const fn directive_location(self) -> DirectiveLocation {
        match self {
            Self::Query => DirectiveLocation::Query,
            Self::Mutation => DirectiveLocation::Mutation,
            Self::Subscription => DirectiveLocation::Subscription,
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl DirectiveLocation {
    /// Get the name of this directive location as it would appear
    /// in a directive definition: `QUERY`, `FIELD_DEFINITION`, etc.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Mutation => "MUTATION",
            Self::Subscription => "SUBSCRIPTION",
            Self::Field => "FIELD",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
            Self::Schema => "SCHEMA",
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::InputObject => "INPUT_OBJECT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Type {
    /// Returns this type made non-null, if it isn't already
    pub fn non_null(self) -> Self {
        match self {
            Self::Named(name) => Self::NonNullNamed(name),
            Self::List(inner) => Self::NonNullList(inner),
            Self::NonNullNamed(_) | Self::NonNullList(_) => self,
        }
    }

    /// Returns this type made nullable, if it isn't already
    pub fn nullable(self) -> Self {
        match self {
            Self::NonNullNamed(name) => Self::Named(name),
            Self::NonNullList(inner) => Self::List(inner),
            Self::Named(_) | Self::List(_) => self,
        }
    }

    /// Returns a (nullable) list type whose items are this type
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNullNamed(_) | Self::NonNullList(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_) | Self::NonNullList(_))
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_) | Self::NonNullNamed(_))
    }

    /// Returns the name of the type this type expression refers to,
    /// with any list and non-null wrapping removed
    pub fn inner_named_type(&self) -> &NamedType {
        match self {
            Self::Named(name) | Self::NonNullNamed(name) => name,
            Self::List(inner) | Self::NonNullList(inner) => inner.inner_named_type(),
        }
    }
}

impl fmt::Display for Type {
    /// Serialize to GraphQL syntax, e.g. `[Int!]!`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::NonNullNamed(name) => write!(f, "{name}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNullList(inner) => write!(f, "[{inner}]!"),
        }
    }
}

impl Value {
    /// Convenience constructor for a non-block string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
            block: false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String { value, .. } = self {
            Some(value.as_str())
        } else {
            None
        }
    }

    pub fn as_enum(&self) -> Option<&Name> {
        if let Self::Enum(name) = self {
            Some(name)
        } else {
            None
        }
    }

    pub fn as_variable(&self) -> Option<&Name> {
        if let Self::Variable(name) = self {
            Some(name)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        if let Self::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(value.into_inner()),
            Self::Int(value) => Some(f64::from(*value)),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node<Value>]> {
        if let Self::List(items) = self {
            Some(items.as_slice())
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&[(Name, Node<Value>)]> {
        if let Self::Object(fields) = self {
            Some(fields.as_slice())
        } else {
            None
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Enum(_) => "Enum",
            Self::Variable(_) => "Variable",
            Self::String { .. } => "String",
            Self::Float(_) => "Float",
            Self::Int(_) => "Int",
            Self::Boolean(_) => "Boolean",
            Self::List(_) => "List",
            Self::Object(_) => "Object",
        }
    }
}

impl fmt::Display for Value {
    /// Serialize to GraphQL syntax
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Enum(name) => write!(f, "{name}"),
            Self::Variable(name) => write!(f, "${name}"),
            Self::String { value, .. } => write!(f, "{value:?}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", **item)?;
                }
                f.write_str("]")
            }
            Self::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {}", **value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl Directive {
    /// Returns the value of the argument with the given name, if any
    pub fn argument_by_name(&self, name: &str) -> Option<&Node<Value>> {
        self.arguments
            .iter()
            .find(|(arg_name, _)| *arg_name == *name)
            .map(|(_, value)| value)
    }
}

impl Selection {
    pub fn directives(&self) -> &[Node<Directive>] {
        match self {
            Self::Field(field) => &field.directives,
            Self::FragmentSpread(spread) => &spread.directives,
            Self::InlineFragment(inline) => &inline.directives,
        }
    }
}

impl Field {
    /// Returns the response key for this field:
    /// the alias if there is one, the field name otherwise
    pub fn response_key(&self) -> &Name {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

impl FieldDefinition {
    directive_methods!();

    /// Returns the definition of the argument with the given name, if any
    pub fn argument_by_name(&self, name: &str) -> Option<&Node<InputValueDefinition>> {
        self.arguments.iter().find(|arg| arg.name == *name)
    }
}

impl InputValueDefinition {
    directive_methods!();

    /// If this input value is marked `@deprecated`, returns the reason
    pub fn deprecation_reason(&self) -> Option<&str> {
        deprecation_reason(&self.directives)
    }

    /// Returns whether a value is required for this argument or input field:
    /// its type is non-null and it has no default value
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}

impl EnumValueDefinition {
    directive_methods!();

    /// If this enum value is marked `@deprecated`, returns the reason
    pub fn deprecation_reason(&self) -> Option<&str> {
        deprecation_reason(&self.directives)
    }
}

impl OperationDefinition {
    directive_methods!();
}

impl FragmentDefinition {
    directive_methods!();
}

impl ScalarTypeDefinition {
    directive_methods!();
}

impl ScalarTypeExtension {
    directive_methods!();
}

impl InputObjectTypeDefinition {
    directive_methods!();
}

impl InputObjectTypeExtension {
    directive_methods!();
}

pub(crate) fn deprecation_reason(directives: &[Node<Directive>]) -> Option<&str> {
    let directive = directives_by_name(directives, "deprecated").next()?;
    match directive.argument_by_name("reason") {
        Some(value) => value.as_str(),
        None => Some("No longer supported"),
    }
}
