//! # borland-demangle
//!
//! Syntax tree and name canonicalization core for demangling Borland C++
//! symbols.
//!
//! A mangled-name parser drives this crate: it asks a [`borland::Context`]
//! for canonical name nodes, composes the remaining nodes directly, and
//! hands the finished tree to a driver, which prints it with
//! [`borland::Node::demangled`].
//!
//! Example:
//!
//! ```rust
//! use borland_demangle::borland::{Context, Node, NodeArray, Qualifiers};
//! use std::rc::Rc;
//!
//! let mut context = Context::default();
//!
//! // Build the tree for `void Bar::fun(int, char)`.
//! let scope = context.make_name("Bar");
//! let name = context.make_name("fun");
//! let qualified_name = context.make_nested_name(scope, name);
//!
//! let return_type = context.make_name("void");
//! let mut params = NodeArray::default();
//! params.add_node(context.make_name("int"));
//! params.add_node(context.make_name("char"));
//!
//! let function = Node::Function {
//!     name: qualified_name,
//!     func_type: Rc::new(Node::FunctionType {
//!         return_type: Some(return_type),
//!         params: Rc::new(Node::NodeArray(params)),
//!         qualifiers: Qualifiers::default(),
//!     }),
//! };
//!
//! assert_eq!(function.demangled().unwrap(), "void Bar::fun(int, char)");
//!
//! // Canonicalization: every occurrence of the same identifier within one
//! // context is the same shared instance.
//! let first = context.make_name("Bar");
//! let second = context.make_name("Bar");
//! assert!(Rc::ptr_eq(&first, &second));
//! ```

#![warn(
    explicit_outlives_requirements,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_abi,
    noop_method_call,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    clippy::clone_on_ref_ptr,
    clippy::cognitive_complexity,
    clippy::dbg_macro,
    clippy::empty_line_after_outer_attr,
    clippy::get_unwrap,
    clippy::let_underscore_must_use,
    clippy::multiple_inherent_impl,
    clippy::panic_in_result_fn,
    clippy::pedantic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::string_lit_as_bytes,
    clippy::string_to_string,
    clippy::todo,
    clippy::unimplemented,
    clippy::unnecessary_self_imports,
    clippy::unneeded_field_pattern,
    clippy::use_debug,
    clippy::use_self
)]
#![allow(clippy::module_name_repetitions)]

pub mod borland;
