//! Block and line-marker canonicalization.
//!
//! Source-faithful trees carry two kinds of noise that structural tools
//! must see through: line markers inside blocks, and single-statement
//! blocks wrapping what is semantically one expression. The matcher
//! canonicalizes both sides with [`canon`] so `begin f(1) end` and `f(1)`
//! are indistinguishable to patterns. The public helpers here expose the
//! same cleanup for direct use.

use templar_core::{Expr, Head};

/// Drop line markers from a compound node's children, one level deep.
///
/// Leaves and marker-free nodes come back unchanged (shared, not copied).
#[must_use]
pub fn rm_lines(ex: &Expr) -> Expr {
    match ex {
        Expr::Node { head, args } if args.iter().any(|a| a.is_node(Head::Line)) => Expr::node(
            *head,
            args.iter()
                .filter(|a| !a.is_node(Head::Line))
                .cloned()
                .collect::<Vec<_>>(),
        ),
        _ => ex.clone(),
    }
}

/// Unwrap a block holding exactly one significant statement.
///
/// Line markers do not count as statements. Blocks with zero or several
/// significant statements come back unchanged, markers and all.
#[must_use]
pub fn unblock(ex: &Expr) -> Expr {
    if !ex.is_node(Head::Block) {
        return ex.clone();
    }
    let significant: Vec<&Expr> = ex
        .args()
        .iter()
        .filter(|a| !a.is_node(Head::Line))
        .collect();
    match significant.as_slice() {
        [single] => unblock(single),
        _ => ex.clone(),
    }
}

/// Splice nested blocks into their parent blocks, recursively.
///
/// `begin a; begin b; c end end` becomes `begin a; b; c end`. Blocks in
/// non-block positions stay where they are.
#[must_use]
pub fn flatten_blocks(ex: &Expr) -> Expr {
    match ex {
        Expr::Node { head, args } => {
            let flat: Vec<Expr> = args.iter().map(flatten_blocks).collect();
            if *head == Head::Block && flat.iter().any(|a| a.is_node(Head::Block)) {
                let mut spliced = Vec::with_capacity(flat.len());
                for child in flat {
                    if child.is_node(Head::Block) {
                        spliced.extend(child.args().iter().cloned());
                    } else {
                        spliced.push(child);
                    }
                }
                Expr::node(Head::Block, spliced)
            } else if flat.iter().zip(args.iter()).all(|(n, o)| n.ptr_eq(o)) {
                ex.clone()
            } else {
                Expr::node(*head, flat)
            }
        }
        leaf => leaf.clone(),
    }
}

/// Canonical form used on both sides of a match, one level deep.
///
/// A block drops its line markers; a block left with exactly one child
/// dissolves into that child (recursively, so stacked wrappers collapse).
/// Everything else is untouched.
#[must_use]
pub(crate) fn canon(ex: &Expr) -> Expr {
    if !ex.is_node(Head::Block) {
        return ex.clone();
    }
    let significant: Vec<Expr> = ex
        .args()
        .iter()
        .filter(|a| !a.is_node(Head::Line))
        .cloned()
        .collect();
    if significant.len() == 1 {
        return canon(&significant[0]);
    }
    if significant.len() == ex.args().len() {
        return ex.clone();
    }
    Expr::node(Head::Block, significant)
}

/// [`canon`] applied at every level of the tree. Templates are run
/// through this once at compile time.
#[must_use]
pub(crate) fn canon_deep(ex: &Expr) -> Expr {
    let top = canon(ex);
    match &top {
        Expr::Node { head, args } => {
            let deep: Vec<Expr> = args.iter().map(canon_deep).collect();
            if deep.iter().zip(args.iter()).all(|(n, o)| n.ptr_eq(o)) {
                top.clone()
            } else {
                Expr::node(*head, deep)
            }
        }
        _ => top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use templar_core::tree;

    fn lined_block() -> Expr {
        Expr::block([
            Expr::line("in.jl", 1),
            tree!(f(1)),
            Expr::line("in.jl", 2),
            tree!(g(2)),
        ])
    }

    #[test]
    fn test_rm_lines_filters_one_level() {
        let cleaned = rm_lines(&lined_block());
        assert_eq!(cleaned, Expr::block([tree!(f(1)), tree!(g(2))]));
    }

    #[test]
    fn test_rm_lines_is_shallow() {
        let nested = Expr::block([Expr::block([Expr::line("in.jl", 1), tree!(x)])]);
        let cleaned = rm_lines(&nested);
        // The inner block keeps its marker.
        assert_eq!(cleaned.args()[0].args().len(), 2);
    }

    #[test]
    fn test_rm_lines_shares_untouched_trees() {
        let plain = tree!(f(x, y));
        assert!(rm_lines(&plain).ptr_eq(&plain));
    }

    #[test]
    fn test_unblock_single_statement() {
        let wrapped = Expr::block([Expr::line("in.jl", 1), tree!(f(1))]);
        assert_eq!(unblock(&wrapped), tree!(f(1)));
    }

    #[test]
    fn test_unblock_recurses_through_wrappers() {
        let doubled = Expr::block([Expr::block([tree!(x)])]);
        assert_eq!(unblock(&doubled), tree!(x));
    }

    #[test]
    fn test_unblock_keeps_real_blocks() {
        let b = lined_block();
        assert_eq!(unblock(&b), b);
        assert_eq!(unblock(&tree!(f(1))), tree!(f(1)));
    }

    #[test]
    fn test_flatten_blocks_splices() {
        let nested = Expr::block([
            tree!(a),
            Expr::block([tree!(b), Expr::block([tree!(c)])]),
        ]);
        assert_eq!(
            flatten_blocks(&nested),
            Expr::block([tree!(a), tree!(b), tree!(c)])
        );
    }

    #[test]
    fn test_flatten_blocks_leaves_call_args_alone() {
        let e = Expr::call(Expr::sym("f"), [Expr::block([tree!(x), tree!(y)])]);
        assert_eq!(flatten_blocks(&e), e);
    }

    #[test]
    fn test_canon_unwraps_and_filters() {
        let wrapped = Expr::block([Expr::line("in.jl", 1), tree!(f(1))]);
        assert_eq!(canon(&wrapped), tree!(f(1)));

        let two = lined_block();
        assert_eq!(canon(&two), Expr::block([tree!(f(1)), tree!(g(2))]));
    }

    #[test]
    fn test_canon_is_shallow() {
        let inner = Expr::block([tree!(x)]);
        let outer = Expr::call(Expr::sym("f"), [inner.clone()]);
        // Non-block root: untouched, inner wrapper survives.
        assert_eq!(canon(&outer).args()[1], inner);
    }

    #[test]
    fn test_canon_deep_reaches_everywhere() {
        let outer = Expr::call(Expr::sym("f"), [Expr::block([tree!(x)])]);
        assert_eq!(canon_deep(&outer), tree!(f(x)));
    }

    #[test]
    fn test_canon_empty_block_stays() {
        let empty = Expr::block([]);
        assert_eq!(canon(&empty), empty);

        let only_lines = Expr::block([Expr::line("in.jl", 1)]);
        assert_eq!(canon(&only_lines), Expr::block([]));
    }
}
