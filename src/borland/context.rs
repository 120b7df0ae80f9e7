//! Per-session canonicalization of name nodes.

use super::Node;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Canonicalization cache for one demangling session.
///
/// Plain names and nested names are interned here so that every occurrence
/// of the same identifier, or of the same `scope::name` pair, is one shared
/// instance. That makes identity comparison on canonical nodes a sound
/// substitute for structural comparison, and bounds memory when the same
/// qualified name appears across many symbols of a batch.
///
/// A context is not thread-safe; concurrent demangling needs one context
/// per worker. Dropping the context at the end of a batch releases every
/// cache-resident node that no tree still references.
#[derive(Default)]
pub struct Context {
    names: HashMap<String, Rc<Node>>,
    // Keyed by the addresses of the two canonical children. Each cached
    // node keeps its children alive, so a key cannot be reused while its
    // entry exists.
    nested_names: HashMap<(usize, usize), Rc<Node>>,
}

impl Context {
    /// Looks up the canonical node for `name` without creating one.
    pub fn get_name(&self, name: &str) -> Option<Rc<Node>> {
        self.names.get(name).map(Rc::clone)
    }

    /// Returns the canonical [`Node::Name`] for `name`, creating and
    /// registering it on first use. `name` must be non-empty.
    pub fn make_name(&mut self, name: &str) -> Rc<Node> {
        debug_assert!(!name.is_empty());

        if let Some(node) = self.names.get(name) {
            trace!(name, "name cache hit");
            return Rc::clone(node);
        }

        trace!(name, "name cache miss");

        let node = Rc::new(Node::Name(name.to_owned()));
        self.names.insert(name.to_owned(), Rc::clone(&node));
        node
    }

    /// Looks up the canonical nested name for the identity pair
    /// `(scope, name)` without creating one.
    pub fn get_nested_name(&self, scope: &Rc<Node>, name: &Rc<Node>) -> Option<Rc<Node>> {
        self.nested_names.get(&identity_key(scope, name)).map(Rc::clone)
    }

    /// Returns the canonical [`Node::NestedName`] for the pair
    /// `(scope, name)`, creating and registering it on first use.
    ///
    /// The cache key is the identity of the children, not their content.
    /// Both children are expected to be canonical themselves, which is what
    /// makes the cheap pointer comparison sound: structurally equal
    /// canonical children are the same instance.
    pub fn make_nested_name(&mut self, scope: Rc<Node>, name: Rc<Node>) -> Rc<Node> {
        let key = identity_key(&scope, &name);

        match self.nested_names.entry(key) {
            Entry::Occupied(entry) => {
                trace!(?key, "nested name cache hit");
                Rc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                trace!(?key, "nested name cache miss");
                Rc::clone(entry.insert(Rc::new(Node::NestedName { scope, name })))
            }
        }
    }
}

fn identity_key(scope: &Rc<Node>, name: &Rc<Node>) -> (usize, usize) {
    (Rc::as_ptr(scope) as usize, Rc::as_ptr(name) as usize)
}
