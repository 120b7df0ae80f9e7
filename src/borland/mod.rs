//! Syntax tree for demangled Borland C++ symbols.
//!
//! The tree is produced by an external mangled-name parser and consumed by a
//! driver that prints it. Nodes are immutable once built and shared through
//! [`Rc`]: plain and nested names are canonicalized by a per-session
//! [`Context`], so multiple parents may hold the same child. Sharing only
//! ever points at already-built nodes, which keeps the tree a DAG.

use self::display::Printer;
use std::fmt::{self, Display, Formatter, Write};
use std::rc::Rc;
use std::slice;
use thiserror::Error;

mod context;
pub mod display;

pub use self::context::Context;

/// Tag identifying the concrete variant of a [`Node`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Name,
    NestedName,
    NodeArray,
    Function,
    FunctionType,
    Template,
    ConversionOperator,
    Pointer,
    Reference,
    Array,
    Qualified,
}

/// Printing gave up because the tree nests deeper than
/// [`display::MAX_DEPTH`]. Only that one symbol is lost; the session and
/// its [`Context`] stay usable.
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("symbol tree nests deeper than the supported printing depth")]
pub struct DepthLimitExceeded;

/// A node of a demangled symbol tree.
///
/// Children are held as shared references; a node's lifetime is the
/// longest-lived of its owners, which may include the canonicalization
/// cache as well as the tree root.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Node {
    /// Plain identifier. Canonical within one [`Context`]: at most one
    /// instance per distinct string value.
    Name(String),
    /// `scope::name`. Canonical within one [`Context`] per identity pair of
    /// its two children.
    NestedName { scope: Rc<Node>, name: Rc<Node> },
    /// Ordered sequence of nodes, such as a parameter or template argument
    /// list. Never canonicalized.
    NodeArray(NodeArray),
    /// Named function. The name is printed between the left and right
    /// fragments of `func_type`, which is expected to be a
    /// [`Node::FunctionType`].
    Function { name: Rc<Node>, func_type: Rc<Node> },
    /// Function type. Constructors and destructors have no return type.
    FunctionType {
        return_type: Option<Rc<Node>>,
        params: Rc<Node>,
        qualifiers: Qualifiers,
    },
    /// `name<params>`. An absent parameter list and an empty one both print
    /// as `name<>`.
    Template {
        name: Rc<Node>,
        params: Option<Rc<Node>>,
    },
    /// Conversion operator, printed as `operator type`.
    ConversionOperator { type_: Rc<Node> },
    /// `T*`.
    Pointer { pointee: Rc<Node> },
    /// `T&`.
    Reference { referee: Rc<Node> },
    /// `T[n]`, or `T[]` when the dimension is unknown.
    Array { base: Rc<Node>, size: Option<u64> },
    /// Type with prefix-position qualifiers, such as `const char`.
    Qualified {
        qualifiers: Qualifiers,
        type_: Rc<Node>,
    },
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Name(_) => Kind::Name,
            Self::NestedName { .. } => Kind::NestedName,
            Self::NodeArray(_) => Kind::NodeArray,
            Self::Function { .. } => Kind::Function,
            Self::FunctionType { .. } => Kind::FunctionType,
            Self::Template { .. } => Kind::Template,
            Self::ConversionOperator { .. } => Kind::ConversionOperator,
            Self::Pointer { .. } => Kind::Pointer,
            Self::Reference { .. } => Kind::Reference,
            Self::Array { .. } => Kind::Array,
            Self::Qualified { .. } => Kind::Qualified,
        }
    }

    /// Whether this node's textual form continues after its primary
    /// content, i.e. whether printing it involves a right fragment.
    ///
    /// Pointers, references and qualified types are transparent wrappers:
    /// they carry trailing syntax exactly when the wrapped type does.
    pub fn has_trailing_syntax(&self) -> bool {
        match self {
            Self::FunctionType { .. } | Self::Array { .. } => true,
            Self::Pointer { pointee: inner }
            | Self::Reference { referee: inner }
            | Self::Qualified { type_: inner, .. } => inner.has_trailing_syntax(),
            Self::Name(_)
            | Self::NestedName { .. }
            | Self::NodeArray(_)
            | Self::Function { .. }
            | Self::Template { .. }
            | Self::ConversionOperator { .. } => false,
        }
    }

    /// The ordered children of this node, if it is a [`Node::NodeArray`].
    pub fn as_array(&self) -> Option<&NodeArray> {
        if let Self::NodeArray(array) = self {
            Some(array)
        } else {
            None
        }
    }

    /// Renders the demangled form of the tree rooted at this node.
    ///
    /// # Errors
    ///
    /// Fails with [`DepthLimitExceeded`] if the tree nests deeper than
    /// [`display::MAX_DEPTH`].
    pub fn demangled(&self) -> Result<String, DepthLimitExceeded> {
        display::print_to_string(self)
    }
}

impl Display for Node {
    /// Formats through the same two-fragment protocol as
    /// [`Node::demangled`]. Trees deeper than [`display::MAX_DEPTH`] yield
    /// a [`fmt::Error`].
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Printer::new(f).print(self)
    }
}

/// Ordered, append-only sequence of shared nodes.
///
/// Order is semantically significant: it is the positional order of an
/// argument or parameter list. Arrays are built by the parser, then frozen
/// into a [`Node::NodeArray`].
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NodeArray {
    nodes: Vec<Rc<Node>>,
}

impl NodeArray {
    /// Appends `node`, preserving insertion order.
    pub fn add_node(&mut self, node: Rc<Node>) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The node at `index`, or `None` when `index` is out of bounds.
    /// Callers routinely probe positions that may not exist, so this never
    /// faults.
    pub fn get(&self, index: usize) -> Option<&Rc<Node>> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Rc<Node>> {
        self.nodes.iter()
    }
}

impl FromIterator<Rc<Node>> for NodeArray {
    fn from_iter<I: IntoIterator<Item = Rc<Node>>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NodeArray {
    type Item = &'a Rc<Node>;
    type IntoIter = slice::Iter<'a, Rc<Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// `const`/`volatile` qualifier flags.
///
/// The flags are independent, but the printed order is fixed: volatile
/// before const, in both placements. Qualifier placement relative to a type
/// differs between declarator contexts, so both a prefix and a suffix
/// rendering are provided.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Qualifiers {
    pub is_volatile: bool,
    pub is_const: bool,
}

impl Qualifiers {
    pub fn new(is_volatile: bool, is_const: bool) -> Self {
        Self {
            is_volatile,
            is_const,
        }
    }

    /// Suffix placement, a space before each token: `) volatile const`.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_suffix(self, out: &mut impl Write) -> fmt::Result {
        if self.is_volatile {
            out.write_str(" volatile")?;
        }

        if self.is_const {
            out.write_str(" const")?;
        }

        Ok(())
    }

    /// Prefix placement, a space after each token: `volatile const int`.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn write_prefix(self, out: &mut impl Write) -> fmt::Result {
        if self.is_volatile {
            out.write_str("volatile ")?;
        }

        if self.is_const {
            out.write_str("const ")?;
        }

        Ok(())
    }
}
