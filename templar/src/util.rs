//! Small tree inspection and cleanup helpers.

use templar_core::{Expr, Head, Sym};

use crate::normalize::{flatten_blocks, rm_lines, unblock};
use crate::rename::alias_gensyms;
use crate::walk::prewalk;

/// Remove line markers at every depth.
///
/// [`rm_lines`] strips one level; this pushes it through the whole tree.
#[must_use]
pub fn strip_lines(ex: &Expr) -> Expr {
    prewalk(ex, |ex| rm_lines(&ex))
}

/// Clean a tree up for printing.
///
/// Strips line markers, flattens nested blocks, drops a redundant
/// outermost block, and gives generated symbols readable aliases. Meant
/// for humans reading rewritten output; the result is generally not
/// equal to the input.
#[must_use]
pub fn prettify(ex: &Expr) -> Expr {
    alias_gensyms(&unblock(&flatten_blocks(&strip_lines(ex))))
}

/// Whether `needle` occurs anywhere in `haystack`, including as the
/// whole tree.
#[must_use]
pub fn in_tree(haystack: &Expr, needle: &Expr) -> bool {
    haystack == needle || haystack.args().iter().any(|child| in_tree(child, needle))
}

/// The defined name under signature decorations.
///
/// Peels calls, type annotations, `where` clauses, and curly parameter
/// lists down to the symbol being defined, so `(f(x)::T) where {T}`
/// yields `f`. Returns `None` when no symbol sits at the core.
#[must_use]
pub fn name_of(ex: &Expr) -> Option<&Sym> {
    match ex {
        Expr::Sym(s) => Some(s),
        Expr::Node {
            head: Head::Call | Head::Where | Head::TypeAnnot | Head::Curly,
            args,
        } => args.first().and_then(name_of),
        _ => None,
    }
}
