//! Structural matching of compiled patterns against subject trees.
//!
//! Matching is a pure recursion: each node comparison produces its own
//! [`Bindings`] environment and parent comparisons merge child results.
//! Failure of any kind, including a repeated capture name bound to two
//! different subtrees, reports `None`. Matching never panics and never
//! returns an error.
//!
//! Both sides are seen through [`canon`](crate::normalize): line markers
//! inside blocks are insignificant, and a single-statement block is the
//! statement it wraps.

use crate::bindings::{Binding, Bindings};
use crate::normalize::canon;
use crate::pattern::{compile, Pattern};
use templar_core::{Expr, Sym, TemplarResult};

impl Pattern {
    /// Match this pattern against `subject`.
    ///
    /// `Some(env)` holds one entry per named marker on success. `None`
    /// means the subject does not have the pattern's shape, or a repeated
    /// name bound two different values.
    #[must_use]
    pub fn capture(&self, subject: &Expr) -> Option<Bindings> {
        match_expr(self, subject)
    }

    /// Whether this pattern matches `subject`.
    #[must_use]
    pub fn is_match(&self, subject: &Expr) -> bool {
        self.capture(subject).is_some()
    }
}

/// Compile `template` and match it against `subject` in one step.
///
/// # Errors
///
/// Only template compilation can fail; see [`compile`]. A non-matching
/// subject is `Ok(None)`.
pub fn capture(template: &Expr, subject: &Expr) -> TemplarResult<Option<Bindings>> {
    Ok(compile(template)?.capture(subject))
}

/// Collect every subtree of `subject` the pattern matches, in pre-order.
///
/// Matched subtrees are searched too, so nested hits all appear.
#[must_use]
pub fn find_all(pattern: &Pattern, subject: &Expr) -> Vec<(Expr, Bindings)> {
    let mut found = Vec::new();
    collect_matches(pattern, subject, &mut found);
    found
}

fn collect_matches(pattern: &Pattern, subject: &Expr, found: &mut Vec<(Expr, Bindings)>) {
    if let Some(env) = pattern.capture(subject) {
        found.push((subject.clone(), env));
    }
    for child in subject.args() {
        collect_matches(pattern, child, found);
    }
}

fn match_expr(pattern: &Pattern, subject: &Expr) -> Option<Bindings> {
    // Wildcards bind the canonical form, so a capture never sees a
    // single-statement wrapper its pattern could not have named.
    let subject = canon(subject);
    match pattern {
        Pattern::Wildcard(name) => Some(bind_one(name.as_ref(), subject)),
        Pattern::Typed(name, constraint) => constraint
            .admits(&subject)
            .then(|| bind_one(name.as_ref(), subject)),
        // A slurp outside a child list sees a run of exactly one.
        Pattern::Slurp(name) => Some(bind_many(name.as_ref(), vec![subject])),
        Pattern::Lit(expected) => (subject.as_lit() == Some(expected)).then(Bindings::new),
        Pattern::Sym(expected) => (subject.as_sym() == Some(expected)).then(Bindings::new),
        Pattern::Alt(left, right) => {
            match_expr(left, &subject).or_else(|| match_expr(right, &subject))
        }
        Pattern::Node { head, args, slurp } => match &subject {
            Expr::Node {
                head: subject_head,
                args: subject_args,
            } if subject_head == head => match_children(args, *slurp, subject_args),
            _ => None,
        },
    }
}

fn match_children(
    patterns: &[Pattern],
    slurp: Option<usize>,
    subjects: &[Expr],
) -> Option<Bindings> {
    let Some(k) = slurp else {
        if patterns.len() != subjects.len() {
            return None;
        }
        let mut env = Bindings::new();
        for (pattern, subject) in patterns.iter().zip(subjects) {
            env = env.merge(match_expr(pattern, subject)?)?;
        }
        return Some(env);
    };

    // Fixed positions are everything but the slurp itself.
    let fixed = patterns.len() - 1;
    if subjects.len() < fixed {
        return None;
    }
    let suffix_len = fixed - k;
    let middle_end = subjects.len() - suffix_len;

    let mut env = Bindings::new();
    for (pattern, subject) in patterns[..k].iter().zip(&subjects[..k]) {
        env = env.merge(match_expr(pattern, subject)?)?;
    }
    if let Pattern::Slurp(name) = &patterns[k] {
        let run = subjects[k..middle_end].to_vec();
        env = env.merge(bind_many(name.as_ref(), run))?;
    }
    for (pattern, subject) in patterns[k + 1..].iter().zip(&subjects[middle_end..]) {
        env = env.merge(match_expr(pattern, subject)?)?;
    }
    Some(env)
}

fn bind_one(name: Option<&Sym>, value: Expr) -> Bindings {
    let mut env = Bindings::new();
    if let Some(name) = name {
        env.bind(name.clone(), Binding::One(value));
    }
    env
}

fn bind_many(name: Option<&Sym>, run: Vec<Expr>) -> Bindings {
    let mut env = Bindings::new();
    if let Some(name) = name {
        env.bind(name.clone(), Binding::Many(run));
    }
    env
}
