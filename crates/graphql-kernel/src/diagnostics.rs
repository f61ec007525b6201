//! Collected type-system diagnostics produced by schema validation
//!
//! Unlike [`BuildError`][crate::schema::BuildError], which halts schema
//! construction at the first failure, validation walks the whole linked graph
//! and reports everything it finds.

use crate::ast::DirectiveLocation;
use crate::ast::OperationType;
use crate::ast::Type;
use crate::Name;
use crate::NodeLocation;
use std::fmt;

/// A type-system rule violation found by schema validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeSystemError {
    #[error("duplicate definitions for field `{type_name}.{field}`")]
    DuplicateField { type_name: Name, field: Name },

    #[error("duplicate definitions for enum value `{enum_name}.{value}`")]
    DuplicateEnumValue { enum_name: Name, value: Name },

    #[error("duplicate definitions for input field `{type_name}.{field}`")]
    DuplicateInputField { type_name: Name, field: Name },

    #[error("enum `{enum_name}` cannot define the reserved value name `{value}`")]
    ReservedEnumValue { enum_name: Name, value: Name },

    #[error("the `{operation}` root operation type `{name}` must be an object type")]
    RootOperationNotObject { operation: OperationType, name: Name },

    #[error("type `{implementer}` cannot implement `{name}` which is not an interface type")]
    ImplementsNonInterface { implementer: Name, name: Name },

    #[error("interface `{name}` cannot implement itself")]
    SelfImplementedInterface { name: Name },

    #[error(
        "type `{implementer}` must also implement `{interface}`, \
         required by implementing `{through}`"
    )]
    MissingTransitiveInterface {
        implementer: Name,
        through: Name,
        interface: Name,
    },

    #[error("interface field `{interface}.{field}` is not implemented by `{implementer}`")]
    MissingInterfaceField {
        implementer: Name,
        interface: Name,
        field: Name,
    },

    #[error(
        "`{implementer}.{field}` has type `{found}` \
         which is not a subtype of `{expected}`, the type of `{interface}.{field}`"
    )]
    InterfaceFieldTypeMismatch {
        implementer: Name,
        interface: Name,
        field: Name,
        found: Type,
        expected: Type,
    },

    #[error(
        "argument `{argument}` of `{implementer}.{field}` has type `{found}` \
         but `{interface}.{field}` declares it with exactly type `{expected}`"
    )]
    InterfaceArgMismatch {
        implementer: Name,
        interface: Name,
        field: Name,
        argument: Name,
        found: Type,
        expected: Type,
    },

    #[error(
        "argument `{argument}` of `{interface}.{field}` \
         is not provided by `{implementer}.{field}`"
    )]
    MissingInterfaceFieldArgument {
        implementer: Name,
        interface: Name,
        field: Name,
        argument: Name,
    },

    #[error(
        "argument `{argument}` of `{implementer}.{field}` is not declared by \
         interface `{interface}` and must be nullable or have a default value"
    )]
    ExtraRequiredArgument {
        implementer: Name,
        interface: Name,
        field: Name,
        argument: Name,
    },

    #[error("union `{union_name}` member `{member}` must be an object type")]
    UnionMemberNotObject { union_name: Name, member: Name },

    #[error(
        "input object `{type_name}` references itself \
         through the non-null field chain {path}"
    )]
    InputObjectCycle { type_name: Name, path: String },

    #[error("field `{type_name}.{field}` of a oneOf input object must have a nullable type")]
    OneOfNonNullableField { type_name: Name, field: Name },

    #[error("field `{type_name}.{field}` of a oneOf input object cannot have a default value")]
    OneOfFieldWithDefault { type_name: Name, field: Name },

    #[error("directive `@{name}` is not defined")]
    UndefinedDirective { name: Name },

    #[error("directive `@{name}` cannot be applied at {location} locations")]
    MisplacedDirective {
        name: Name,
        location: DirectiveLocation,
    },

    #[error("non-repeatable directive `@{name}` applied more than once")]
    RepeatedDirective { name: Name },
}

/// A [`TypeSystemError`] together with the source location it originates from,
/// when one is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Option<NodeLocation>,
    pub error: TypeSystemError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}", self.error)
    }
}

/// The collected result of walking the whole schema:
/// every diagnostic is reported, not only the first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, location: Option<NodeLocation>, error: TypeSystemError) {
        self.diagnostics.push(Diagnostic { location, error })
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Returns `Err(self)` if any diagnostic was collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for DiagnosticList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticList {}

impl IntoIterator for DiagnosticList {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
