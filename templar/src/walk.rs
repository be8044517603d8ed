//! Whole-tree transformation.
//!
//! A walk visits every node of a tree with a visitor closure and builds a
//! new tree from the replacements. Inputs are never mutated; rebuilding
//! reuses the original node whenever no child changed, so untouched
//! subtrees stay shared with the input.
//!
//! Two orders are offered. [`Traversal::PostOrder`] transforms children
//! first and visits each rebuilt node exactly once, which is the safe
//! default for rewrites. [`Traversal::PreOrder`] visits the node first
//! and then descends into the *replacement*'s children, so a visitor
//! whose output keeps introducing fresh work will not terminate; use
//! [`walk_bounded`] when that is a live risk.

use smallvec::SmallVec;
use templar_core::{Expr, TemplarError, TemplarResult};

/// Visit order for [`walk`] and friends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Parent before children; children come from the replacement.
    PreOrder,
    /// Children before parent; every rebuilt node is visited once.
    PostOrder,
}

/// Transform `root` with an infallible visitor.
#[must_use]
pub fn walk(mode: Traversal, root: &Expr, mut visit: impl FnMut(Expr) -> Expr) -> Expr {
    walk_inner(mode, root, &mut visit)
}

/// [`walk`] in pre-order.
#[must_use]
pub fn prewalk(root: &Expr, visit: impl FnMut(Expr) -> Expr) -> Expr {
    walk(Traversal::PreOrder, root, visit)
}

/// [`walk`] in post-order.
#[must_use]
pub fn postwalk(root: &Expr, visit: impl FnMut(Expr) -> Expr) -> Expr {
    walk(Traversal::PostOrder, root, visit)
}

/// Transform `root` with a fallible visitor.
///
/// # Errors
///
/// The visitor's first error is returned unchanged and the walk stops
/// there; no partial tree is reported.
pub fn try_walk<E>(
    mode: Traversal,
    root: &Expr,
    mut visit: impl FnMut(Expr) -> Result<Expr, E>,
) -> Result<Expr, E> {
    try_walk_inner(mode, root, &mut visit)
}

/// [`try_walk`] in pre-order.
pub fn try_prewalk<E>(
    root: &Expr,
    visit: impl FnMut(Expr) -> Result<Expr, E>,
) -> Result<Expr, E> {
    try_walk(Traversal::PreOrder, root, visit)
}

/// [`try_walk`] in post-order.
pub fn try_postwalk<E>(
    root: &Expr,
    visit: impl FnMut(Expr) -> Result<Expr, E>,
) -> Result<Expr, E> {
    try_walk(Traversal::PostOrder, root, visit)
}

/// Transform `root`, allowing the visitor at most `limit` invocations.
///
/// The budget is the guard rail for pre-order rewriting that keeps
/// producing new work. It counts visits, not nodes, so a terminating
/// walk over `n` nodes needs a budget of at least `n`.
///
/// # Errors
///
/// [`TemplarError::WalkBudget`] once the visitor would be invoked a
/// `limit + 1`-th time.
pub fn walk_bounded(
    mode: Traversal,
    root: &Expr,
    limit: usize,
    mut visit: impl FnMut(Expr) -> Expr,
) -> TemplarResult<Expr> {
    let mut used = 0usize;
    try_walk_inner(mode, root, &mut |ex| {
        if used == limit {
            return Err(TemplarError::walk_budget(limit));
        }
        used += 1;
        Ok(visit(ex))
    })
}

fn walk_inner(mode: Traversal, ex: &Expr, visit: &mut impl FnMut(Expr) -> Expr) -> Expr {
    match mode {
        Traversal::PreOrder => {
            let replaced = visit(ex.clone());
            map_children(&replaced, |child| walk_inner(mode, child, visit))
        }
        Traversal::PostOrder => {
            let rebuilt = map_children(ex, |child| walk_inner(mode, child, visit));
            visit(rebuilt)
        }
    }
}

fn try_walk_inner<E>(
    mode: Traversal,
    ex: &Expr,
    visit: &mut impl FnMut(Expr) -> Result<Expr, E>,
) -> Result<Expr, E> {
    match mode {
        Traversal::PreOrder => {
            let replaced = visit(ex.clone())?;
            try_map_children(&replaced, |child| try_walk_inner(mode, child, visit))
        }
        Traversal::PostOrder => {
            let rebuilt = try_map_children(ex, |child| try_walk_inner(mode, child, visit))?;
            visit(rebuilt)
        }
    }
}

/// Rebuild a node from transformed children, reusing the original
/// allocation when every child came back identical.
fn map_children(ex: &Expr, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
    match ex {
        Expr::Node { head, args } => {
            let mut new_args: SmallVec<[Expr; 4]> = SmallVec::with_capacity(args.len());
            let mut changed = false;
            for child in args.iter() {
                let new_child = f(child);
                changed = changed || !new_child.ptr_eq(child);
                new_args.push(new_child);
            }
            if changed {
                Expr::node(*head, new_args)
            } else {
                ex.clone()
            }
        }
        leaf => leaf.clone(),
    }
}

fn try_map_children<E>(
    ex: &Expr,
    mut f: impl FnMut(&Expr) -> Result<Expr, E>,
) -> Result<Expr, E> {
    match ex {
        Expr::Node { head, args } => {
            let mut new_args: SmallVec<[Expr; 4]> = SmallVec::with_capacity(args.len());
            let mut changed = false;
            for child in args.iter() {
                let new_child = f(child)?;
                changed = changed || !new_child.ptr_eq(child);
                new_args.push(new_child);
            }
            if changed {
                Ok(Expr::node(*head, new_args))
            } else {
                Ok(ex.clone())
            }
        }
        leaf => Ok(leaf.clone()),
    }
}
