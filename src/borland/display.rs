//! Rendering demangled symbol trees.
//!
//! Symbol syntax is not linearly composable: a function's return type
//! surrounds its name and parameter list, and the same wrap-around applies
//! to pointers to functions and to arrays. Every variant therefore renders
//! in two fragments. The left fragment carries everything up to and
//! including the node's primary content; the right fragment, present only
//! for variants with trailing syntax, is emitted after all nested content.
//! A parent interleaves its own fragments around a child's without the
//! child knowing its syntactic context, which is how
//! `Function { "foo", int(int) }` comes out as `int foo(int)` instead of a
//! naive concatenation.

use super::{DepthLimitExceeded, Node, NodeArray};
use std::fmt::{self, Write};
use tracing::trace;

/// Printing recursion budget. Nesting depth is bounded by the mangled
/// input's length, so any tree deeper than this is pathological; printing
/// fails for that one symbol long before the stack is at risk, and the
/// session survives.
pub const MAX_DEPTH: usize = 96;

pub(crate) fn print_to_string(node: &Node) -> Result<String, DepthLimitExceeded> {
    trace!(kind = ?node.kind(), "printing symbol tree");

    let mut output = String::new();

    match Printer::new(&mut output).print(node) {
        Ok(()) => Ok(output),
        // A `String` sink accepts anything written to it, so the only
        // possible failure is an exhausted depth budget.
        Err(fmt::Error) => Err(DepthLimitExceeded),
    }
}

/// Walks a tree and writes its rendering into a sink, tracking recursion
/// depth. Printing is a read-only traversal; a node can be printed any
/// number of times with identical output.
pub(crate) struct Printer<'a, W> {
    out: &'a mut W,
    remaining_depth: usize,
}

impl<'a, W: Write> Printer<'a, W> {
    pub(crate) fn new(out: &'a mut W) -> Self {
        Self {
            out,
            remaining_depth: MAX_DEPTH,
        }
    }

    /// Renders `node` in full: its left fragment, then its right fragment
    /// if the variant has one.
    pub(crate) fn print(&mut self, node: &Node) -> fmt::Result {
        self.print_left(node)?;

        if node.has_trailing_syntax() {
            self.print_right(node)?;
        }

        Ok(())
    }

    fn print_left(&mut self, node: &Node) -> fmt::Result {
        self.enter_recursion()?;
        let result = self.left_fragment(node);
        self.exit_recursion();
        result
    }

    fn print_right(&mut self, node: &Node) -> fmt::Result {
        self.enter_recursion()?;
        let result = self.right_fragment(node);
        self.exit_recursion();
        result
    }

    fn left_fragment(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Name(name) => self.out.write_str(name),
            Node::NestedName { scope, name } => {
                self.print(scope)?;
                self.out.write_str("::")?;
                self.print(name)
            }
            Node::NodeArray(array) => self.print_separated(array),
            Node::Function { name, func_type } => {
                self.print_left(func_type)?;
                self.print(name)?;
                self.print_right(func_type)
            }
            Node::FunctionType { return_type, .. } => {
                if let Some(return_type) = return_type {
                    self.print_left(return_type)?;

                    // A return type with trailing syntax wraps around the
                    // rest of the declarator, as in `int (*f(char))(short)`;
                    // its left fragment must join the name directly.
                    if !return_type.has_trailing_syntax() {
                        self.out.write_char(' ')?;
                    }
                }

                Ok(())
            }
            Node::Template { name, params } => {
                self.print(name)?;
                self.out.write_char('<')?;

                if let Some(params) = params {
                    self.print(params)?;
                }

                self.out.write_char('>')
            }
            Node::ConversionOperator { type_ } => {
                self.out.write_str("operator ")?;
                self.print(type_)
            }
            Node::Pointer { pointee } => {
                self.print_indirection(pointee, '*')
            }
            Node::Reference { referee } => {
                self.print_indirection(referee, '&')
            }
            Node::Array { base, .. } => self.print_left(base),
            Node::Qualified { qualifiers, type_ } => {
                qualifiers.write_prefix(self.out)?;
                self.print_left(type_)
            }
        }
    }

    fn right_fragment(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::FunctionType {
                return_type,
                params,
                qualifiers,
            } => {
                self.out.write_char('(')?;
                self.print(params)?;
                self.out.write_char(')')?;

                if let Some(return_type) = return_type {
                    self.print_right(return_type)?;
                }

                qualifiers.write_suffix(self.out)
            }
            Node::Array { base, size } => {
                self.out.write_char('[')?;

                if let Some(size) = size {
                    write!(self.out, "{size}")?;
                }

                self.out.write_char(']')?;
                self.print_right(base)
            }
            Node::Pointer { pointee: inner } | Node::Reference { referee: inner } => {
                if wraps_declarator(inner) {
                    self.out.write_char(')')?;
                }

                self.print_right(inner)
            }
            Node::Qualified { type_, .. } => self.print_right(type_),
            // Fully rendered by the left fragment.
            Node::Name(_)
            | Node::NestedName { .. }
            | Node::NodeArray(_)
            | Node::Function { .. }
            | Node::Template { .. }
            | Node::ConversionOperator { .. } => Ok(()),
        }
    }

    /// Left fragment shared by pointers and references: the inner type's
    /// left fragment, then the declarator parenthesis when the inner type
    /// wraps around, then the indirection token itself.
    fn print_indirection(&mut self, inner: &Node, token: char) -> fmt::Result {
        self.print_left(inner)?;

        if wraps_declarator(inner) {
            // A function type's left fragment already ends with a space; an
            // array's does not.
            if matches!(inner, Node::Array { .. }) {
                self.out.write_char(' ')?;
            }

            self.out.write_char('(')?;
        }

        self.out.write_char(token)
    }

    fn print_separated(&mut self, array: &NodeArray) -> fmt::Result {
        let mut iter = array.iter();

        if let Some(first) = iter.next() {
            self.print(first)?;

            for node in iter {
                self.out.write_str(", ")?;
                self.print(node)?;
            }
        }

        Ok(())
    }

    fn enter_recursion(&mut self) -> fmt::Result {
        match self.remaining_depth.checked_sub(1) {
            Some(depth) => {
                self.remaining_depth = depth;
                Ok(())
            }
            None => Err(fmt::Error),
        }
    }

    fn exit_recursion(&mut self) {
        debug_assert!(self.remaining_depth < MAX_DEPTH);
        self.remaining_depth += 1;
    }
}

/// Whether printing an indirection over `inner` needs the declarator
/// parentheses of `int (*)(char)` or `int (*)[8]`. Only a directly wrapped
/// function type or array does; a further level of indirection, as in
/// `int (**)(char)`, reuses the parentheses the inner level opened.
fn wraps_declarator(inner: &Node) -> bool {
    matches!(inner, Node::FunctionType { .. } | Node::Array { .. })
}
