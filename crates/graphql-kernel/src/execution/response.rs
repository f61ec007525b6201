use crate::execution::JsonMap;
use crate::Name;
use crate::NodeLocation;
use serde::Deserialize;
use serde::Serialize;

/// A [GraphQL response](https://spec.graphql.org/October2021/#sec-Response-Format):
/// one query or mutation result, or one event of a subscription stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Response {
    // <https://spec.graphql.org/October2021/#note-6f005> suggests serializing this first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub errors: Vec<GraphQLError>,

    /// `None` (serialized as JSON null) when a request error prevented
    /// execution or a field error propagated to the response root
    pub data: Option<JsonMap>,

    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    #[serde(default)]
    pub extensions: JsonMap,
}

/// A serializable
/// [error](https://spec.graphql.org/October2021/#sec-Errors.Error-result-format),
/// as found in a GraphQL [response][Response]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,

    /// Locations relevant to the error, if any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub locations: Vec<GraphQLLocation>,

    /// If non-empty, the error is a [field error]
    /// for the particular field found at this path in [`Response::data`].
    ///
    /// [field error]: https://spec.graphql.org/October2021/#sec-Errors.Field-errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub path: Vec<PathElement>,

    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    #[serde(default)]
    pub extensions: JsonMap,
}

/// A source location (line and column numbers) for a [`GraphQLError`]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLLocation {
    /// The line number for this location, starting at 1 for the first line.
    pub line: usize,
    /// The column number for this location, starting at 1 and counting
    /// characters (Unicode scalar values) like [`str::chars`].
    pub column: usize,
}

/// An element of [`GraphQLError::path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// The relevant key in an object value
    Field(Name),

    /// The index of the relevant item in a list value
    ListIndex(usize),
}

impl Response {
    /// A response with the given data and no errors
    pub fn from_data(data: Option<JsonMap>) -> Self {
        Self {
            errors: Vec::new(),
            data,
            extensions: JsonMap::new(),
        }
    }

    /// A `data: null` response carrying a single error
    pub fn from_error(error: GraphQLError) -> Self {
        Self {
            errors: vec![error],
            data: None,
            extensions: JsonMap::new(),
        }
    }
}

impl GraphQLError {
    pub fn new(message: impl Into<String>, location: Option<&NodeLocation>) -> Self {
        Self {
            message: message.into(),
            locations: location.map(GraphQLLocation::from).into_iter().collect(),
            path: Vec::new(),
            extensions: JsonMap::new(),
        }
    }
}

impl From<&NodeLocation> for GraphQLLocation {
    fn from(location: &NodeLocation) -> Self {
        Self {
            line: location.line(),
            column: location.column(),
        }
    }
}
