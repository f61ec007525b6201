//! Lowering an AST document into a linked [`Schema`],
//! either from scratch or by extending an existing schema.
//!
//! Building proceeds in phases: partition the document by definition kind,
//! seed the type map (built-ins, then existing types, then new definitions),
//! fold extensions into their targets, resolve the root operation types, add
//! directive definitions, then link-check every name reference. Errors halt
//! the build at the first failure; the later phases dereference what earlier
//! phases resolved.

use super::Component;
use super::ComponentName;
use super::ComponentOrigin;
use super::DirectiveList;
use super::EnumType;
use super::ExtendedType;
use super::ExtensionId;
use super::FieldDefinition;
use super::InputObjectType;
use super::InterfaceType;
use super::ObjectType;
use super::ScalarType;
use super::Schema;
use super::UnionType;
use crate::ast;
use crate::ast::impls::directives_by_name;
use crate::ast::OperationType;
use crate::ast::Type;
use crate::diagnostics::DiagnosticList;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// Turns AST documents into a [`Schema`].
///
/// [`Schema::from_document`] and [`Schema::extend`] cover the common cases;
/// use the builder directly to skip validation with
/// [`assume_valid`][Self::assume_valid].
pub struct SchemaBuilder {
    schema: Schema,
    extending: bool,
    assume_valid: bool,
}

/// An error that halted schema construction.
///
/// Unlike validation [diagnostics][crate::diagnostics::DiagnosticList],
/// which are collected exhaustively, the first build error terminates the
/// build: the phases that follow would dereference the missing piece.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("must provide only one schema definition")]
    SchemaDefinitionConflict { location: Option<NodeLocation> },

    #[error("cannot extend unknown {kind} type `{name}`")]
    ExtendingUnknownType { kind: &'static str, name: Name },

    #[error("unknown type `{name}` referenced at `{coordinate}`")]
    UnknownType { name: Name, coordinate: String },

    #[error("expected an {expected} type at `{coordinate}`, found `{ty}`")]
    InvalidTypeExpression {
        expected: &'static str,
        coordinate: String,
        ty: Type,
    },

    #[error("`{coordinate}` has a default value but its type `{ty}` is not an input type")]
    NonInputDefault { coordinate: String, ty: Type },
}

/// Either kind of failure [`Schema::from_document`] and [`Schema::extend`]
/// can report: a build error that halted construction, or the collected
/// validation diagnostics of the built schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("schema validation failed:\n{0}")]
    Validation(#[from] DiagnosticList),
}

impl BuildError {
    /// The source location this error points at, when one is known
    pub fn location(&self) -> Option<&NodeLocation> {
        match self {
            Self::SchemaDefinitionConflict { location } => location.as_ref(),
            Self::ExtendingUnknownType { name, .. } | Self::UnknownType { name, .. } => {
                name.location()
            }
            Self::InvalidTypeExpression { ty, .. } | Self::NonInputDefault { ty, .. } => {
                ty.inner_named_type().location()
            }
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// Returns a new schema builder initialized with built-in directives,
    /// built-in scalars, and introspection types
    pub fn new() -> Self {
        SchemaBuilder {
            schema: Schema::new(),
            extending: false,
            assume_valid: false,
        }
    }

    /// Returns a builder that starts from an existing schema.
    ///
    /// The resulting build never modifies `schema`: unchanged definitions are
    /// shared between the two schemas, and extended ones are copied on write.
    pub fn extending(schema: &Schema) -> Self {
        SchemaBuilder {
            schema: schema.clone(),
            extending: true,
            assume_valid: false,
        }
    }

    /// Skip validation of the built schema and mark it so that
    /// [`Schema::validate`] short-circuits
    pub fn assume_valid(mut self) -> Self {
        self.assume_valid = true;
        self
    }

    /// Build the schema from the added document.
    ///
    /// Executable definitions in the document, if any, are ignored.
    pub fn build(self, document: &ast::Document) -> Result<Schema, SchemaError> {
        let assume_valid = self.assume_valid;
        let mut schema = self.lower(document)?;
        schema.assume_valid = assume_valid;
        schema.validate()?;
        Ok(schema)
    }

    fn lower(self, document: &ast::Document) -> Result<Schema, BuildError> {
        // Partition the document by definition kind, in document order
        let mut schema_definition = None;
        let mut schema_extensions = Vec::new();
        let mut directive_definitions = Vec::new();
        let mut type_definitions = Vec::new();
        let mut type_extensions = Vec::new();
        for definition in &document.definitions {
            match definition {
                ast::Definition::SchemaDefinition(def) => {
                    if schema_definition.is_some() {
                        return Err(BuildError::SchemaDefinitionConflict {
                            location: def.location().cloned(),
                        });
                    }
                    schema_definition = Some(def);
                }
                ast::Definition::SchemaExtension(ext) => schema_extensions.push(ext),
                ast::Definition::DirectiveDefinition(def) => directive_definitions.push(def),
                ast::Definition::ScalarTypeDefinition(_)
                | ast::Definition::ObjectTypeDefinition(_)
                | ast::Definition::InterfaceTypeDefinition(_)
                | ast::Definition::UnionTypeDefinition(_)
                | ast::Definition::EnumTypeDefinition(_)
                | ast::Definition::InputObjectTypeDefinition(_) => {
                    type_definitions.push(definition)
                }
                ast::Definition::ScalarTypeExtension(_)
                | ast::Definition::ObjectTypeExtension(_)
                | ast::Definition::InterfaceTypeExtension(_)
                | ast::Definition::UnionTypeExtension(_)
                | ast::Definition::EnumTypeExtension(_)
                | ast::Definition::InputObjectTypeExtension(_) => type_extensions.push(definition),
                ast::Definition::OperationDefinition(_) | ast::Definition::FragmentDefinition(_) => {
                    // Executable definitions are not relevant to the type system.
                }
            }
        }

        // Extending with a document that contributes nothing
        // returns the input schema unchanged.
        if self.extending
            && schema_definition.is_none()
            && schema_extensions.is_empty()
            && directive_definitions.is_empty()
            && type_definitions.is_empty()
            && type_extensions.is_empty()
        {
            return Ok(self.schema);
        }

        let mut schema = self.schema;

        // New type definitions, in document order. Built-ins and existing
        // types keep their entry; so does the first of duplicate definitions.
        for definition in &type_definitions {
            match definition {
                ast::Definition::ScalarTypeDefinition(def) => {
                    insert_sticky(&mut schema.types, &def.name, || {
                        ExtendedType::Scalar(ScalarType::from_ast(def))
                    });
                }
                ast::Definition::ObjectTypeDefinition(def) => {
                    insert_sticky(&mut schema.types, &def.name, || {
                        ExtendedType::Object(ObjectType::from_ast(def))
                    });
                }
                ast::Definition::InterfaceTypeDefinition(def) => {
                    insert_sticky(&mut schema.types, &def.name, || {
                        ExtendedType::Interface(InterfaceType::from_ast(def))
                    });
                }
                ast::Definition::UnionTypeDefinition(def) => {
                    insert_sticky(&mut schema.types, &def.name, || {
                        ExtendedType::Union(UnionType::from_ast(def))
                    });
                }
                ast::Definition::EnumTypeDefinition(def) => {
                    insert_sticky(&mut schema.types, &def.name, || {
                        ExtendedType::Enum(EnumType::from_ast(def))
                    });
                }
                ast::Definition::InputObjectTypeDefinition(def) => {
                    insert_sticky(&mut schema.types, &def.name, || {
                        ExtendedType::InputObject(InputObjectType::from_ast(def))
                    });
                }
                _ => unreachable!("partitioned above"),
            }
        }

        // Fold type extensions into their targets, in document order.
        // A target that does not exist, or exists as another kind,
        // fails the build.
        for definition in &type_extensions {
            match definition {
                ast::Definition::ScalarTypeExtension(ext) => {
                    match schema.types.get_mut(ext.name.as_str()) {
                        Some(ExtendedType::Scalar(ty)) => ty.make_mut().extend_ast(ext),
                        _ => return Err(unknown_extension_target("scalar", &ext.name)),
                    }
                }
                ast::Definition::ObjectTypeExtension(ext) => {
                    match schema.types.get_mut(ext.name.as_str()) {
                        Some(ExtendedType::Object(ty)) => ty.make_mut().extend_ast(ext),
                        _ => return Err(unknown_extension_target("object", &ext.name)),
                    }
                }
                ast::Definition::InterfaceTypeExtension(ext) => {
                    match schema.types.get_mut(ext.name.as_str()) {
                        Some(ExtendedType::Interface(ty)) => ty.make_mut().extend_ast(ext),
                        _ => return Err(unknown_extension_target("interface", &ext.name)),
                    }
                }
                ast::Definition::UnionTypeExtension(ext) => {
                    match schema.types.get_mut(ext.name.as_str()) {
                        Some(ExtendedType::Union(ty)) => ty.make_mut().extend_ast(ext),
                        _ => return Err(unknown_extension_target("union", &ext.name)),
                    }
                }
                ast::Definition::EnumTypeExtension(ext) => {
                    match schema.types.get_mut(ext.name.as_str()) {
                        Some(ExtendedType::Enum(ty)) => ty.make_mut().extend_ast(ext),
                        _ => return Err(unknown_extension_target("enum", &ext.name)),
                    }
                }
                ast::Definition::InputObjectTypeExtension(ext) => {
                    match schema.types.get_mut(ext.name.as_str()) {
                        Some(ExtendedType::InputObject(ty)) => ty.make_mut().extend_ast(ext),
                        _ => return Err(unknown_extension_target("input object", &ext.name)),
                    }
                }
                _ => unreachable!("partitioned above"),
            }
        }

        // Root operation types: the document's schema definition overrides
        // the existing roots, then schema extensions override in order.
        if let Some(def) = schema_definition {
            schema.set_ast(def);
        }
        for ext in &schema_extensions {
            schema.extend_ast(ext);
        }
        // Any root still unset falls back to the conventionally-named object
        // type, regardless of whether a schema definition was present.
        for operation_type in [
            OperationType::Query,
            OperationType::Mutation,
            OperationType::Subscription,
        ] {
            if schema.root_operation(operation_type).is_none() {
                let name = operation_type.default_type_name();
                if let Some(ExtendedType::Object(def)) = schema.types.get(name) {
                    let root = def.name.to_component(ComponentOrigin::Definition);
                    match operation_type {
                        OperationType::Query => schema.query_type = Some(root),
                        OperationType::Mutation => schema.mutation_type = Some(root),
                        OperationType::Subscription => schema.subscription_type = Some(root),
                    }
                }
            }
        }

        // New directive definitions. Built-ins and the first of duplicate
        // definitions keep their entry.
        for def in &directive_definitions {
            insert_sticky(&mut schema.directive_definitions, &def.name, || {
                (*def).clone()
            });
        }

        link_check(&schema)?;
        Ok(schema)
    }
}

fn unknown_extension_target(kind: &'static str, name: &Name) -> BuildError {
    BuildError::ExtendingUnknownType {
        kind,
        name: name.clone(),
    }
}

impl Schema {
    fn set_ast(&mut self, definition: &Node<ast::SchemaDefinition>) {
        self.description = definition.description.clone();
        self.directives.extend(
            definition
                .directives
                .iter()
                .map(|d| d.to_component(ComponentOrigin::Definition)),
        );
        self.add_root_operations(ComponentOrigin::Definition, &definition.root_operations);
        self.schema_definition = Some(definition.clone());
    }

    fn extend_ast(&mut self, extension: &Node<ast::SchemaExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.directives.extend(
            extension
                .directives
                .iter()
                .map(|d| d.to_component(origin.clone())),
        );
        self.add_root_operations(origin, &extension.root_operations);
        self.extension_ast_nodes.push(extension.clone());
    }

    fn add_root_operations(
        &mut self,
        origin: ComponentOrigin,
        root_operations: &[(OperationType, Name)],
    ) {
        for (operation_type, object_type_name) in root_operations {
            let root = Some(object_type_name.to_component(origin.clone()));
            match operation_type {
                OperationType::Query => self.query_type = root,
                OperationType::Mutation => self.mutation_type = root,
                OperationType::Subscription => self.subscription_type = root,
            }
        }
    }
}

impl FieldDefinition {
    fn from_ast(definition: &Node<ast::FieldDefinition>) -> Node<Self> {
        definition.same_location(Self {
            description: definition.description.clone(),
            name: definition.name.clone(),
            arguments: definition.arguments.clone(),
            ty: definition.ty.clone(),
            directives: definition.directives.clone(),
            resolver: None,
            subscriber: None,
        })
    }
}

impl ScalarType {
    fn from_ast(definition: &Node<ast::ScalarTypeDefinition>) -> Node<Self> {
        definition.same_location(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            directives: component_directives(&definition.directives, ComponentOrigin::Definition),
            specified_by_url: specified_by_url(&definition.directives),
            coercer: None,
            ast_node: Some(definition.clone()),
            extension_ast_nodes: Vec::new(),
        })
    }

    fn extend_ast(&mut self, extension: &Node<ast::ScalarTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.directives
            .extend(extension.directives.iter().map(|d| d.to_component(origin.clone())));
        if let Some(url) = specified_by_url(&extension.directives) {
            self.specified_by_url = Some(url);
        }
        self.extension_ast_nodes.push(extension.clone());
    }
}

impl ObjectType {
    fn from_ast(definition: &Node<ast::ObjectTypeDefinition>) -> Node<Self> {
        definition.same_location(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            implements_interfaces: collect_component_names(
                &definition.implements_interfaces,
                ComponentOrigin::Definition,
            ),
            directives: component_directives(&definition.directives, ComponentOrigin::Definition),
            fields: collect_fields(&definition.fields, ComponentOrigin::Definition),
            is_type_of: None,
            ast_node: Some(definition.clone()),
            extension_ast_nodes: Vec::new(),
        })
    }

    fn extend_ast(&mut self, extension: &Node<ast::ObjectTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.directives
            .extend(extension.directives.iter().map(|d| d.to_component(origin.clone())));
        extend_component_names(
            &mut self.implements_interfaces,
            &extension.implements_interfaces,
            &origin,
        );
        extend_fields(&mut self.fields, &extension.fields, &origin);
        self.extension_ast_nodes.push(extension.clone());
    }
}

impl InterfaceType {
    fn from_ast(definition: &Node<ast::InterfaceTypeDefinition>) -> Node<Self> {
        definition.same_location(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            implements_interfaces: collect_component_names(
                &definition.implements_interfaces,
                ComponentOrigin::Definition,
            ),
            directives: component_directives(&definition.directives, ComponentOrigin::Definition),
            fields: collect_fields(&definition.fields, ComponentOrigin::Definition),
            resolve_type: None,
            ast_node: Some(definition.clone()),
            extension_ast_nodes: Vec::new(),
        })
    }

    fn extend_ast(&mut self, extension: &Node<ast::InterfaceTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.directives
            .extend(extension.directives.iter().map(|d| d.to_component(origin.clone())));
        extend_component_names(
            &mut self.implements_interfaces,
            &extension.implements_interfaces,
            &origin,
        );
        extend_fields(&mut self.fields, &extension.fields, &origin);
        self.extension_ast_nodes.push(extension.clone());
    }
}

impl UnionType {
    fn from_ast(definition: &Node<ast::UnionTypeDefinition>) -> Node<Self> {
        definition.same_location(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            directives: component_directives(&definition.directives, ComponentOrigin::Definition),
            members: collect_component_names(&definition.members, ComponentOrigin::Definition),
            resolve_type: None,
            ast_node: Some(definition.clone()),
            extension_ast_nodes: Vec::new(),
        })
    }

    fn extend_ast(&mut self, extension: &Node<ast::UnionTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.directives
            .extend(extension.directives.iter().map(|d| d.to_component(origin.clone())));
        extend_component_names(&mut self.members, &extension.members, &origin);
        self.extension_ast_nodes.push(extension.clone());
    }
}

impl EnumType {
    fn from_ast(definition: &Node<ast::EnumTypeDefinition>) -> Node<Self> {
        definition.same_location(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            directives: component_directives(&definition.directives, ComponentOrigin::Definition),
            values: definition
                .values
                .iter()
                .map(|value_def| {
                    (
                        value_def.value.clone(),
                        value_def.to_component(ComponentOrigin::Definition),
                    )
                })
                .collect(),
            ast_node: Some(definition.clone()),
            extension_ast_nodes: Vec::new(),
        })
    }

    fn extend_ast(&mut self, extension: &Node<ast::EnumTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.directives
            .extend(extension.directives.iter().map(|d| d.to_component(origin.clone())));
        for value_def in &extension.values {
            // A duplicate value name keeps its position but the later
            // definition wins; the validator reports the duplicate.
            self.values
                .insert(value_def.value.clone(), value_def.to_component(origin.clone()));
        }
        self.extension_ast_nodes.push(extension.clone());
    }
}

impl InputObjectType {
    fn from_ast(definition: &Node<ast::InputObjectTypeDefinition>) -> Node<Self> {
        definition.same_location(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            directives: component_directives(&definition.directives, ComponentOrigin::Definition),
            fields: definition
                .fields
                .iter()
                .map(|field| {
                    (
                        field.name.clone(),
                        field.to_component(ComponentOrigin::Definition),
                    )
                })
                .collect(),
            is_one_of: has_one_of(&definition.directives),
            ast_node: Some(definition.clone()),
            extension_ast_nodes: Vec::new(),
        })
    }

    fn extend_ast(&mut self, extension: &Node<ast::InputObjectTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.directives
            .extend(extension.directives.iter().map(|d| d.to_component(origin.clone())));
        for field in &extension.fields {
            self.fields
                .insert(field.name.clone(), field.to_component(origin.clone()));
        }
        self.is_one_of = self.is_one_of || has_one_of(&extension.directives);
        self.extension_ast_nodes.push(extension.clone());
    }
}

fn component_directives(
    directives: &[Node<ast::Directive>],
    origin: ComponentOrigin,
) -> DirectiveList {
    directives
        .iter()
        .map(|d| d.to_component(origin.clone()))
        .collect()
}

fn specified_by_url(directives: &[Node<ast::Directive>]) -> Option<String> {
    directives_by_name(directives, "specifiedBy")
        .next()?
        .argument_by_name("url")?
        .as_str()
        .map(str::to_owned)
}

fn has_one_of(directives: &[Node<ast::Directive>]) -> bool {
    directives_by_name(directives, "oneOf").next().is_some()
}

/// Definition order first; a duplicate name keeps its position
/// but the later definition wins (the validator reports the duplicate)
fn collect_fields(
    fields: &[Node<ast::FieldDefinition>],
    origin: ComponentOrigin,
) -> IndexMap<Name, Component<FieldDefinition>> {
    fields
        .iter()
        .map(|field| {
            (
                field.name.clone(),
                FieldDefinition::from_ast(field).to_component(origin.clone()),
            )
        })
        .collect()
}

fn extend_fields(
    fields: &mut IndexMap<Name, Component<FieldDefinition>>,
    extension_fields: &[Node<ast::FieldDefinition>],
    origin: &ComponentOrigin,
) {
    for field in extension_fields {
        fields.insert(
            field.name.clone(),
            FieldDefinition::from_ast(field).to_component(origin.clone()),
        );
    }
}

/// Definition order preserved, duplicates keep the first occurrence
fn collect_component_names(names: &[Name], origin: ComponentOrigin) -> IndexSet<ComponentName> {
    names
        .iter()
        .map(|name| name.to_component(origin.clone()))
        .collect()
}

fn extend_component_names(
    interfaces: &mut IndexSet<ComponentName>,
    names: &[Name],
    origin: &ComponentOrigin,
) {
    for name in names {
        interfaces.insert(name.to_component(origin.clone()));
    }
}

/// Like `IndexMap::insert`, but does not replace the value
/// if an equivalent key is already in the map.
fn insert_sticky<V>(map: &mut IndexMap<Name, V>, key: &Name, make_value: impl FnOnce() -> V) {
    map.entry(key.clone()).or_insert_with(make_value);
}

/// Check that every `Named` reference in the linked graph resolves,
/// and that argument and field positions hold the right kind of type.
fn link_check(schema: &Schema) -> Result<(), BuildError> {
    for ty in schema.types.values() {
        match ty {
            ExtendedType::Object(def) => {
                check_interfaces(schema, &def.name, &def.implements_interfaces)?;
                check_fields(schema, &def.name, &def.fields)?;
            }
            ExtendedType::Interface(def) => {
                check_interfaces(schema, &def.name, &def.implements_interfaces)?;
                check_fields(schema, &def.name, &def.fields)?;
            }
            ExtendedType::Union(def) => {
                for member in &def.members {
                    if !schema.types.contains_key(member.as_str()) {
                        return Err(BuildError::UnknownType {
                            name: member.name.clone(),
                            coordinate: def.name.to_string(),
                        });
                    }
                }
            }
            ExtendedType::InputObject(def) => {
                for (field_name, field) in &def.fields {
                    check_input_value(schema, field, || format!("{}.{}", def.name, field_name))?;
                }
            }
            ExtendedType::Scalar(_) | ExtendedType::Enum(_) => {}
        }
    }
    for directive in schema.directive_definitions.values() {
        for arg in &directive.arguments {
            check_input_value(schema, arg, || format!("@{}({}:)", directive.name, arg.name))?;
        }
    }
    for operation_type in [
        OperationType::Query,
        OperationType::Mutation,
        OperationType::Subscription,
    ] {
        if let Some(root) = schema.root_operation(operation_type) {
            if !schema.types.contains_key(root.as_str()) {
                return Err(BuildError::UnknownType {
                    name: root.name.clone(),
                    coordinate: format!("schema {{ {operation_type}: }}"),
                });
            }
        }
    }
    Ok(())
}

fn check_interfaces(
    schema: &Schema,
    type_name: &Name,
    interfaces: &IndexSet<ComponentName>,
) -> Result<(), BuildError> {
    for interface in interfaces {
        if !schema.types.contains_key(interface.as_str()) {
            return Err(BuildError::UnknownType {
                name: interface.name.clone(),
                coordinate: type_name.to_string(),
            });
        }
    }
    Ok(())
}

fn check_fields(
    schema: &Schema,
    type_name: &Name,
    fields: &IndexMap<Name, Component<FieldDefinition>>,
) -> Result<(), BuildError> {
    for (field_name, field) in fields {
        let inner = field.ty.inner_named_type();
        match schema.types.get(inner.as_str()) {
            None => {
                return Err(BuildError::UnknownType {
                    name: inner.clone(),
                    coordinate: format!("{type_name}.{field_name}"),
                })
            }
            Some(ty) if !ty.is_output_type() => {
                return Err(BuildError::InvalidTypeExpression {
                    expected: "output",
                    coordinate: format!("{type_name}.{field_name}"),
                    ty: field.ty.clone(),
                })
            }
            Some(_) => {}
        }
        for arg in &field.arguments {
            check_input_value(schema, arg, || {
                format!("{type_name}.{field_name}({}:)", arg.name)
            })?;
        }
    }
    Ok(())
}

fn check_input_value(
    schema: &Schema,
    value: &Node<ast::InputValueDefinition>,
    coordinate: impl Fn() -> String,
) -> Result<(), BuildError> {
    let inner = value.ty.inner_named_type();
    match schema.types.get(inner.as_str()) {
        None => Err(BuildError::UnknownType {
            name: inner.clone(),
            coordinate: coordinate(),
        }),
        Some(ty) if !ty.is_input_type() => {
            if value.default_value.is_some() {
                Err(BuildError::NonInputDefault {
                    coordinate: coordinate(),
                    ty: value.ty.clone(),
                })
            } else {
                Err(BuildError::InvalidTypeExpression {
                    expected: "input",
                    coordinate: coordinate(),
                    ty: value.ty.clone(),
                })
            }
        }
        Some(_) => Ok(()),
    }
}
