//! Structural pattern matching and rewriting for expression trees.
//!
//! This crate provides the template matcher and tree walker for `templar`
//! expression trees, plus the definition-splitting helpers built on them.
//!
//! # Architecture
//!
//! ```text
//! template Expr → compile → Pattern → capture(subject) → Bindings
//! subject Expr → prewalk/postwalk(visit) → rewritten Expr
//! ```
//!
//! Templates are ordinary [`Expr`] trees whose marker symbols declare
//! captures: `x_` binds one node, `xs__` binds a run of siblings, `s_String`
//! adds a shape constraint, and `|` joins alternatives. The matcher and the
//! walker are independent; the usual rewriting idiom runs a capture inside
//! a walk visitor.
//!
//! # Key Types
//!
//! - [`Expr`] - Immutable expression tree of literals, symbols, and
//!   compound nodes
//! - [`Pattern`] - Compiled template with capture, slurp, and alternation
//!   sites
//! - [`Bindings`] - Environment produced by a successful capture
//! - [`Traversal`] - Pre-order or post-order rewriting mode
//!
//! # Example
//!
//! ```
//! use templar::{compile, Expr};
//!
//! let template = Expr::tuple([
//!     Expr::sym("first_"),
//!     Expr::sym("mid__"),
//!     Expr::sym("last_"),
//! ]);
//! let pattern = compile(&template).unwrap();
//!
//! let subject = Expr::tuple((1..=5).map(Expr::int));
//! let env = pattern.capture(&subject).unwrap();
//!
//! assert_eq!(env.expr("first"), Some(&Expr::int(1)));
//! assert_eq!(env.seq("mid").map(<[Expr]>::len), Some(3));
//! assert_eq!(env.expr("last"), Some(&Expr::int(5)));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod bindings;
pub mod define;
pub mod matcher;
pub mod normalize;
pub mod pattern;
pub mod rename;
pub mod util;
pub mod walk;

pub use templar_core::{tree, tree_args, Expr, Head, Lit, Sym, TemplarError, TemplarResult};

// Re-export main types
pub use bindings::{Binding, Bindings};
pub use define::{
    combine_arg, combine_def, is_def, is_short_def, long_def, short_def, split_arg, split_def,
    ArgSpec, FnParts,
};
pub use matcher::{capture, find_all};
pub use normalize::{flatten_blocks, rm_lines, unblock};
pub use pattern::{compile, instantiate, Constraint, Pattern};
pub use rename::{alias_gensyms, gensym_ids};
pub use util::{in_tree, name_of, prettify, strip_lines};
pub use walk::{
    postwalk, prewalk, try_postwalk, try_prewalk, try_walk, walk, walk_bounded, Traversal,
};
