use crate::NodeLocation;
use std::borrow::Borrow;
use std::fmt;
use std::hash;
use std::sync::Arc;

/// Create a [`Name`] from a string literal or identifier,
/// checked for valid syntax at compile time.
///
/// # Examples
///
/// ```
/// use graphql_kernel::name;
///
/// assert_eq!(name!("Query").as_str(), "Query");
/// assert_eq!(name!(Query).as_str(), "Query");
/// ```
#[macro_export]
macro_rules! name {
    ($value: ident) => {
        $crate::name!(stringify!($value))
    };
    ($value: expr) => {{
        const _: () = { assert!($crate::Name::valid_syntax($value)) };
        $crate::Name::new_unchecked($value)
    }};
}

/// A GraphQL identifier: <https://spec.graphql.org/October2021/#Name>
///
/// Reference-counted (cloning is cheap and shares the allocation)
/// and carries an optional [`NodeLocation`].
/// Equality, ordering, and hashing are based on the string content only.
#[derive(Clone)]
pub struct Name {
    value: Arc<str>,
    location: Option<NodeLocation>,
}

/// Refers by name to a type defined elsewhere
pub type NamedType = Name;

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("`{name}` is not a valid GraphQL name")]
pub struct InvalidNameError {
    pub name: String,
}

impl Name {
    /// Create a new `Name`, returning an error if the syntax is invalid
    pub fn new(value: &str) -> Result<Self, InvalidNameError> {
        if Self::valid_syntax(value) {
            Ok(Self::new_unchecked(value))
        } else {
            Err(InvalidNameError {
                name: value.to_owned(),
            })
        }
    }

    /// Create a new `Name` parsed from the given source location
    pub fn new_parsed(value: &str, location: NodeLocation) -> Result<Self, InvalidNameError> {
        Ok(Self::new(value)?.with_location(location))
    }

    /// Create a new `Name` without validity checking
    ///
    /// Use the [`name!`][crate::name!] macro for names checked at compile time.
    pub fn new_unchecked(value: &str) -> Self {
        debug_assert!(Self::valid_syntax(value), "invalid GraphQL name {value:?}");
        Self {
            value: value.into(),
            location: None,
        }
    }

    /// Returns this name with the given source location attached
    pub fn with_location(mut self, location: NodeLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn location(&self) -> Option<&NodeLocation> {
        self.location.as_ref()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns whether the given string is a valid GraphQL name,
    /// matching `/[_A-Za-z][_0-9A-Za-z]*/` exactly
    pub const fn valid_syntax(value: &str) -> bool {
        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return false;
        }
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];
            let valid = match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'_' => true,
                b'0'..=b'9' => i > 0,
                _ => false,
            };
            if !valid {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl std::ops::Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Eq for Name {}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() // location not included
    }
}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state) // location not included, matches `str` hashing
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl TryFrom<&str> for Name {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl serde::Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(&value).map_err(serde::de::Error::custom)
    }
}
