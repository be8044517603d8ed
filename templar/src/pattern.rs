//! Template compilation.
//!
//! A template is an ordinary [`Expr`] in which identifier spelling marks
//! capture points:
//!
//! | spelling   | compiles to                                      |
//! |------------|--------------------------------------------------|
//! | `_`        | anonymous wildcard                               |
//! | `__`       | anonymous slurp                                  |
//! | `name_`    | named wildcard, one node                         |
//! | `name__`   | named slurp, a run of siblings (possibly empty)  |
//! | `name_Type`| typed wildcard, one node passing the constraint  |
//!
//! Anything else, including spellings with three or more trailing
//! underscores or an unrecognized type suffix, is a plain identifier that
//! matches itself. [`compile`] is total over spellings; the only rejected
//! templates are those with more than one slurp among one node's children,
//! where the split of siblings would be ambiguous.

use crate::bindings::Bindings;
use crate::normalize::canon_deep;
use templar_core::{Expr, Head, Lit, Sym, TemplarError, TemplarResult};

// =============================================================================
// Constraints
// =============================================================================

/// Type constraint carried by a typed wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Integer literal. Suffixes `Int` and `Integer`.
    Int,
    /// Float literal.
    Float,
    /// Boolean literal.
    Bool,
    /// Character literal.
    Char,
    /// String literal, or an interpolated string node. Suffix `String`.
    Str,
    /// Identifier leaf. Suffix `Symbol`.
    Symbol,
}

impl Constraint {
    /// Parse a recognized type suffix.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "Int" | "Integer" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "Bool" => Some(Self::Bool),
            "Char" => Some(Self::Char),
            "String" => Some(Self::Str),
            "Symbol" => Some(Self::Symbol),
            _ => None,
        }
    }

    /// Whether `subject` satisfies this constraint.
    ///
    /// `Str` admits interpolated strings as well as plain string literals,
    /// so a string-shaped capture sees both spellings of string data.
    #[must_use]
    pub fn admits(self, subject: &Expr) -> bool {
        match self {
            Self::Int => matches!(subject.as_lit(), Some(Lit::Int(_))),
            Self::Float => matches!(subject.as_lit(), Some(Lit::Float(_))),
            Self::Bool => matches!(subject.as_lit(), Some(Lit::Bool(_))),
            Self::Char => matches!(subject.as_lit(), Some(Lit::Char(_))),
            Self::Str => {
                matches!(subject.as_lit(), Some(Lit::Str(_))) || subject.is_node(Head::StrInterp)
            }
            Self::Symbol => subject.as_sym().is_some(),
        }
    }

    /// The canonical suffix spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Bool => "Bool",
            Self::Char => "Char",
            Self::Str => "String",
            Self::Symbol => "Symbol",
        }
    }
}

// =============================================================================
// Marker classification
// =============================================================================

/// What an identifier spelling means inside a template.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Marker {
    /// Ordinary identifier, matches itself.
    Plain,
    /// Single-node capture.
    Wildcard(Option<Sym>),
    /// Sibling-run capture.
    Slurp(Option<Sym>),
    /// Single-node capture with a type constraint.
    Typed(Option<Sym>, Constraint),
}

pub(crate) fn classify_marker(name: &str) -> Marker {
    if name == "_" {
        return Marker::Wildcard(None);
    }
    if name == "__" {
        return Marker::Slurp(None);
    }
    let trailing = name.len() - name.trim_end_matches('_').len();
    match trailing {
        1 => Marker::Wildcard(Some(Sym::new(&name[..name.len() - 1]))),
        2 => Marker::Slurp(Some(Sym::new(&name[..name.len() - 2]))),
        0 => classify_typed(name),
        // Three or more trailing underscores mean nothing special.
        _ => Marker::Plain,
    }
}

fn classify_typed(name: &str) -> Marker {
    let Some(pos) = name.rfind('_') else {
        return Marker::Plain;
    };
    let Some(constraint) = Constraint::from_suffix(&name[pos + 1..]) else {
        return Marker::Plain;
    };
    let base = &name[..pos];
    if base.is_empty() {
        return Marker::Typed(None, constraint);
    }
    if base.ends_with('_') {
        // `xs__Int` and friends: slurps take no constraint.
        return Marker::Plain;
    }
    Marker::Typed(Some(Sym::new(base)), constraint)
}

// =============================================================================
// Compiled patterns
// =============================================================================

/// An executable pattern compiled from a template.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Matches any single node; binds it when named.
    Wildcard(Option<Sym>),
    /// Matches a run of siblings; binds the run when named.
    Slurp(Option<Sym>),
    /// Matches a single node passing the constraint.
    Typed(Option<Sym>, Constraint),
    /// Matches an equal literal leaf.
    Lit(Lit),
    /// Matches the identical identifier leaf.
    Sym(Sym),
    /// Matches a compound node with the same head and matching children.
    Node {
        /// Required head tag.
        head: Head,
        /// Child patterns, in order.
        args: Vec<Pattern>,
        /// Position of the one slurp child, if any. Fixed at compile time
        /// so matching partitions siblings without search.
        slurp: Option<usize>,
    },
    /// Ordered choice: try left, else right.
    Alt(Box<Pattern>, Box<Pattern>),
}

/// Compile a template into an executable [`Pattern`].
///
/// The template is canonicalized first (line markers dropped, single-
/// statement blocks unwrapped), so the compiled pattern matches modulo
/// that same sugar.
///
/// # Errors
///
/// [`TemplarError::MalformedPattern`] when more than one slurp marker
/// appears among a single node's children. Every other template compiles.
pub fn compile(template: &Expr) -> TemplarResult<Pattern> {
    compile_expr(&canon_deep(template))
}

fn compile_expr(ex: &Expr) -> TemplarResult<Pattern> {
    match ex {
        Expr::Lit(l) => Ok(Pattern::Lit(l.clone())),
        Expr::Sym(s) => Ok(match classify_marker(s.as_str()) {
            Marker::Plain => Pattern::Sym(s.clone()),
            Marker::Wildcard(name) => Pattern::Wildcard(name),
            Marker::Slurp(name) => Pattern::Slurp(name),
            Marker::Typed(name, constraint) => Pattern::Typed(name, constraint),
        }),
        Expr::Node {
            head: Head::Alt,
            args,
        } if args.len() == 2 => Ok(Pattern::Alt(
            Box::new(compile_expr(&args[0])?),
            Box::new(compile_expr(&args[1])?),
        )),
        Expr::Node { head, args } => {
            let compiled = args
                .iter()
                .map(compile_expr)
                .collect::<TemplarResult<Vec<_>>>()?;
            let mut slurp = None;
            for (i, child) in compiled.iter().enumerate() {
                if matches!(child, Pattern::Slurp(_)) {
                    if slurp.is_some() {
                        return Err(TemplarError::malformed_pattern(format!(
                            "more than one slurp marker among the children of `{ex}`"
                        )));
                    }
                    slurp = Some(i);
                }
            }
            Ok(Pattern::Node {
                head: *head,
                args: compiled,
                slurp,
            })
        }
    }
}

// =============================================================================
// Instantiation
// =============================================================================

/// Fill a template's markers from an environment, producing a new tree.
///
/// Named wildcards and typed wildcards are replaced by their bound node;
/// named slurps splice their bound run into the surrounding child list.
/// Unbound markers, anonymous markers, and everything else come through
/// verbatim, so partially-instantiated templates remain templates. A
/// bound slurp outside any child list substitutes only when its run has
/// exactly one element; there is nowhere to splice more.
#[must_use]
pub fn instantiate(template: &Expr, env: &Bindings) -> Expr {
    match template {
        Expr::Sym(s) => match classify_marker(s.as_str()) {
            Marker::Wildcard(Some(name)) | Marker::Typed(Some(name), _) => env
                .expr(name.as_str())
                .cloned()
                .unwrap_or_else(|| template.clone()),
            Marker::Slurp(Some(name)) => match env.seq(name.as_str()) {
                Some([single]) => single.clone(),
                _ => template.clone(),
            },
            _ => template.clone(),
        },
        Expr::Node { head, args } => {
            let mut out = Vec::with_capacity(args.len());
            for child in args.iter() {
                if let Some(run) = slurp_run(child, env) {
                    out.extend(run.iter().cloned());
                } else {
                    out.push(instantiate(child, env));
                }
            }
            Expr::node(*head, out)
        }
        Expr::Lit(_) => template.clone(),
    }
}

/// The bound run for a named-slurp child, if there is one to splice.
fn slurp_run<'e>(child: &Expr, env: &'e Bindings) -> Option<&'e [Expr]> {
    let sym = child.as_sym()?;
    match classify_marker(sym.as_str()) {
        Marker::Slurp(Some(name)) => env.seq(name.as_str()),
        _ => None,
    }
}
