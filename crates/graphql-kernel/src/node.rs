use std::fmt;
use std::hash;
use std::sync::Arc as StdArc;
use triomphe::Arc;

/// The place in a source file that a definition or value was parsed from:
/// the name of the source and a 1-based line and column number.
///
/// Locations are attached by the (external) parser.
/// Nodes created programmatically have no location.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct NodeLocation {
    source: StdArc<str>,
    line: usize,
    column: usize,
}

impl NodeLocation {
    pub fn new(source: impl AsRef<str>, line: usize, column: usize) -> Self {
        Self {
            source: source.as_ref().into(),
            line,
            column,
        }
    }

    /// The name of the source file this location points into
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 1-based line number
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column number, counting Unicode scalar values like [`str::chars`]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Debug for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// Smart pointer to some GraphQL node.
///
/// Thread-safe, reference-counted, and carries an optional [`NodeLocation`]
/// so that errors can point to the relevant part of a parsed input file.
///
/// Cloning a `Node` is cheap and shares the underlying allocation;
/// [`make_mut`][Self::make_mut] provides copy-on-write semantics.
#[derive(Hash, Eq, PartialEq)]
pub struct Node<T>(Arc<NodeInner<T>>);

#[derive(Clone)]
struct NodeInner<T> {
    location: Option<NodeLocation>,
    node: T,
}

impl<T> Node<T> {
    /// Create a new `Node` for something created programmatically,
    /// not parsed from a source file
    pub fn new(node: T) -> Self {
        Self(Arc::new(NodeInner {
            location: None,
            node,
        }))
    }

    /// Create a new `Node` for something parsed from the given source location
    pub fn new_parsed(node: T, location: NodeLocation) -> Self {
        Self::new_opt_location(node, Some(location))
    }

    pub fn new_opt_location(node: T, location: Option<NodeLocation>) -> Self {
        Self(Arc::new(NodeInner { location, node }))
    }

    pub fn location(&self) -> Option<&NodeLocation> {
        self.0.location.as_ref()
    }

    /// Returns the given `node` at the same location as `self`
    /// (e.g. for a type conversion)
    pub fn same_location<U>(&self, node: U) -> Node<U> {
        Node(Arc::new(NodeInner {
            location: self.0.location.clone(),
            node,
        }))
    }

    /// Returns whether two `Node`s point to the same memory allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns a mutable reference to `T`, cloning it if necessary
    ///
    /// This is functionally equivalent to [`Arc::make_mut`][std::sync::Arc::make_mut]
    /// from the standard library, enabling copy-on-write schemes
    /// where the underlying allocation is only copied if it is shared.
    pub fn make_mut(&mut self) -> &mut T
    where
        T: Clone,
    {
        &mut Arc::make_mut(&mut self.0).node
    }

    /// Returns a mutable reference to `T` if this `Node` is uniquely owned
    pub fn get_mut(&mut self) -> Option<&mut T> {
        Arc::get_mut(&mut self.0).map(|inner| &mut inner.node)
    }
}

impl<T> std::ops::Deref for Node<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0.node
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location() {
            write!(f, "@{location:?} ")?
        }
        self.0.node.fmt(f)
    }
}

impl<T: Eq> Eq for NodeInner<T> {}

impl<T: PartialEq> PartialEq for NodeInner<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node // location not included
    }
}

impl<T: hash::Hash> hash::Hash for NodeInner<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.node.hash(state) // location not included
    }
}

impl<T> AsRef<T> for Node<T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> From<T> for Node<T> {
    fn from(node: T) -> Self {
        Self::new(node)
    }
}
