//! The expression tree model.
//!
//! An [`Expr`] is an immutable tree: literal and symbol leaves, and
//! compound nodes carrying a [`Head`] tag plus children behind an
//! `Arc<[Expr]>`. Cloning an expression bumps one reference count, so
//! rewrites share every untouched subtree with their input and whole trees
//! can be handed across threads.
//!
//! Binary operators are not special-cased in the model: `x + y` is a
//! `Call` whose first child is the symbol `+`. The `Display` impl knows
//! the usual operators and prints them infix with precedence parentheses.

use crate::lit::Lit;
use crate::sym::Sym;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Head tags
// =============================================================================

/// Structural tag of a compound node.
///
/// The set is closed; growing the tree vocabulary means adding a variant
/// here, not changing any node representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Head {
    /// Application: `f(a, b)`. First child is the callee.
    Call,
    /// Statement sequence: `begin a; b end`.
    Block,
    /// Assignment: `lhs = rhs`, also the short function form.
    Assign,
    /// Long-form function definition: signature then body.
    FuncDef,
    /// Tuple: `(a, b)`.
    Tuple,
    /// Type-parameter scoping: `sig where {T, S}`. First child is the target.
    Where,
    /// Type annotation: `x::T`.
    TypeAnnot,
    /// Quotation: `:(inner)`.
    Quote,
    /// Source line marker; children are the file string and line number.
    Line,
    /// Ordered pattern alternation: `left | right`.
    Alt,
    /// Interpolated string; children alternate string and expression parts.
    StrInterp,
    /// Keyword argument or default: `name = value` inside a signature.
    Kw,
    /// Keyword-parameter group inside a call, after the `;`.
    Params,
    /// Splat: `xs...`.
    Splat,
    /// Parametric type application: `Name{T}`. First child is the base.
    Curly,
    /// Struct definition: name then field block.
    Struct,
}

impl Head {
    /// Lowercase tag name, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Block => "block",
            Self::Assign => "assign",
            Self::FuncDef => "function",
            Self::Tuple => "tuple",
            Self::Where => "where",
            Self::TypeAnnot => "annot",
            Self::Quote => "quote",
            Self::Line => "line",
            Self::Alt => "alt",
            Self::StrInterp => "strinterp",
            Self::Kw => "kw",
            Self::Params => "params",
            Self::Splat => "splat",
            Self::Curly => "curly",
            Self::Struct => "struct",
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Expression nodes
// =============================================================================

/// An immutable expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Literal leaf.
    Lit(Lit),
    /// Identifier leaf.
    Sym(Sym),
    /// Compound node.
    Node {
        /// Structural tag.
        head: Head,
        /// Children, shared.
        args: Arc<[Expr]>,
    },
}

impl Expr {
    /// Build a literal leaf.
    #[inline]
    #[must_use]
    pub fn lit(value: impl Into<Lit>) -> Self {
        Self::Lit(value.into())
    }

    /// Build an integer literal.
    #[inline]
    #[must_use]
    pub fn int(n: i64) -> Self {
        Self::Lit(Lit::Int(n))
    }

    /// Build a float literal.
    #[inline]
    #[must_use]
    pub fn float(x: f64) -> Self {
        Self::Lit(Lit::Float(x))
    }

    /// Build a string literal.
    #[inline]
    #[must_use]
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::Lit(Lit::str(s))
    }

    /// Build a symbol leaf.
    #[inline]
    #[must_use]
    pub fn sym(name: impl Into<Sym>) -> Self {
        Self::Sym(name.into())
    }

    /// Build a compound node.
    #[must_use]
    pub fn node(head: Head, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::Node {
            head,
            args: args.into_iter().collect(),
        }
    }

    /// Build a call: `callee(args...)`.
    #[must_use]
    pub fn call(callee: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        let mut children = vec![callee];
        children.extend(args);
        Self::node(Head::Call, children)
    }

    /// Build a binary operator call: `left op right`.
    #[must_use]
    pub fn binop(op: &str, left: Expr, right: Expr) -> Self {
        Self::call(Self::sym(op), [left, right])
    }

    /// Build a statement block.
    #[must_use]
    pub fn block(stmts: impl IntoIterator<Item = Expr>) -> Self {
        Self::node(Head::Block, stmts)
    }

    /// Build an assignment.
    #[must_use]
    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Self::node(Head::Assign, [lhs, rhs])
    }

    /// Build a long-form function definition from signature and body.
    #[must_use]
    pub fn func_def(signature: Expr, body: Expr) -> Self {
        Self::node(Head::FuncDef, [signature, body])
    }

    /// Build a tuple.
    #[must_use]
    pub fn tuple(items: impl IntoIterator<Item = Expr>) -> Self {
        Self::node(Head::Tuple, items)
    }

    /// Build a `where` clause: `target where {params...}`.
    #[must_use]
    pub fn where_clause(target: Expr, params: impl IntoIterator<Item = Expr>) -> Self {
        let mut children = vec![target];
        children.extend(params);
        Self::node(Head::Where, children)
    }

    /// Build a type annotation: `value::ty`.
    #[must_use]
    pub fn annot(value: Expr, ty: Expr) -> Self {
        Self::node(Head::TypeAnnot, [value, ty])
    }

    /// Build a quotation.
    #[must_use]
    pub fn quoted(inner: Expr) -> Self {
        Self::node(Head::Quote, [inner])
    }

    /// Build a source line marker.
    #[must_use]
    pub fn line(file: impl AsRef<str>, line: i64) -> Self {
        Self::node(Head::Line, [Self::string(file), Self::int(line)])
    }

    /// Build a keyword argument or parameter default: `name = value`.
    #[must_use]
    pub fn kw(name: Expr, value: Expr) -> Self {
        Self::node(Head::Kw, [name, value])
    }

    /// Build a keyword-parameter group.
    #[must_use]
    pub fn params(items: impl IntoIterator<Item = Expr>) -> Self {
        Self::node(Head::Params, items)
    }

    /// Build a splat: `inner...`.
    #[must_use]
    pub fn splat(inner: Expr) -> Self {
        Self::node(Head::Splat, [inner])
    }

    /// Build a parametric type application: `base{params...}`.
    #[must_use]
    pub fn curly(base: Expr, params: impl IntoIterator<Item = Expr>) -> Self {
        let mut children = vec![base];
        children.extend(params);
        Self::node(Head::Curly, children)
    }

    /// Build a struct definition from name and field block.
    #[must_use]
    pub fn struct_def(name: Expr, fields: Expr) -> Self {
        Self::node(Head::Struct, [name, fields])
    }

    /// Build an interpolated string from its parts.
    #[must_use]
    pub fn str_interp(parts: impl IntoIterator<Item = Expr>) -> Self {
        Self::node(Head::StrInterp, parts)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The head tag, if this is a compound node.
    #[inline]
    #[must_use]
    pub const fn head(&self) -> Option<Head> {
        match self {
            Self::Node { head, .. } => Some(*head),
            _ => None,
        }
    }

    /// The children. Empty for leaves.
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[Expr] {
        match self {
            Self::Node { args, .. } => args,
            _ => &[],
        }
    }

    /// The shared children allocation, if this is a compound node.
    #[inline]
    #[must_use]
    pub fn args_arc(&self) -> Option<&Arc<[Expr]>> {
        match self {
            Self::Node { args, .. } => Some(args),
            _ => None,
        }
    }

    /// Whether this is a leaf (literal or symbol).
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Node { .. })
    }

    /// Whether this is a compound node with the given head.
    #[inline]
    #[must_use]
    pub fn is_node(&self, head: Head) -> bool {
        self.head() == Some(head)
    }

    /// The symbol, if this is an identifier leaf.
    #[inline]
    #[must_use]
    pub const fn as_sym(&self) -> Option<&Sym> {
        match self {
            Self::Sym(s) => Some(s),
            _ => None,
        }
    }

    /// The literal, if this is a literal leaf.
    #[inline]
    #[must_use]
    pub const fn as_lit(&self) -> Option<&Lit> {
        match self {
            Self::Lit(l) => Some(l),
            _ => None,
        }
    }

    /// The integer value, if this is an integer literal.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Lit(Lit::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Whether this leaf is the symbol spelled `name`.
    #[inline]
    #[must_use]
    pub fn is_sym(&self, name: &str) -> bool {
        matches!(self, Self::Sym(s) if s == name)
    }

    /// Total number of nodes in the tree, leaves included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.args().iter().map(Expr::node_count).sum::<usize>()
    }

    /// Cheap identity test: equal leaves, or compound nodes sharing the
    /// same children allocation.
    ///
    /// `false` does not rule out structural equality; use `==` for that.
    #[must_use]
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        match (self, other) {
            (Self::Lit(a), Self::Lit(b)) => a == b,
            (Self::Sym(a), Self::Sym(b)) => a == b,
            (
                Self::Node { head: ha, args: aa },
                Self::Node { head: hb, args: ab },
            ) => ha == hb && Arc::ptr_eq(aa, ab),
            _ => false,
        }
    }
}

impl From<Lit> for Expr {
    #[inline]
    fn from(l: Lit) -> Self {
        Self::Lit(l)
    }
}

impl From<Sym> for Expr {
    #[inline]
    fn from(s: Sym) -> Self {
        Self::Sym(s)
    }
}

/// `a | b` builds an [`Head::Alt`] node, the template spelling of ordered
/// pattern alternation.
impl std::ops::BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        Expr::node(Head::Alt, [self, rhs])
    }
}

// =============================================================================
// Display
// =============================================================================

/// Operator precedence for infix rendering. Higher binds tighter.
fn op_precedence(op: &str) -> Option<(u8, OpAssoc)> {
    let entry = match op {
        "||" => (3, OpAssoc::Left),
        "&&" => (4, OpAssoc::Left),
        "==" | "!=" | "<" | ">" | "<=" | ">=" | "in" => (5, OpAssoc::Left),
        "+" | "-" => (6, OpAssoc::Left),
        "*" | "/" | "%" => (7, OpAssoc::Left),
        "^" => (8, OpAssoc::Right),
        _ => return None,
    };
    Some(entry)
}

#[derive(Clone, Copy, PartialEq)]
enum OpAssoc {
    Left,
    Right,
}

const PREC_ASSIGN: u8 = 1;
const PREC_ALT: u8 = 2;
const PREC_ATOM: u8 = 10;

impl Expr {
    /// Precedence of this expression when rendered, used to decide parens.
    fn render_precedence(&self) -> u8 {
        match self {
            Self::Node { head, args } => match head {
                Head::Assign | Head::Kw => PREC_ASSIGN,
                Head::Alt => PREC_ALT,
                Head::Call => match args.first().and_then(Expr::as_sym) {
                    Some(op) if args.len() == 3 => {
                        op_precedence(op).map_or(PREC_ATOM, |(p, _)| p)
                    }
                    _ => PREC_ATOM,
                },
                _ => PREC_ATOM,
            },
            _ => PREC_ATOM,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        let own = self.render_precedence();
        if own < min_prec {
            write!(f, "(")?;
            self.fmt_inner(f)?;
            write!(f, ")")
        } else {
            self.fmt_inner(f)
        }
    }

    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lit(l) => write!(f, "{l}"),
            Self::Sym(s) => write!(f, "{s}"),
            Self::Node { head, args } => fmt_node(f, *head, args),
        }
    }

    fn fmt_list(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            item.fmt_prec(f, PREC_ASSIGN)?;
        }
        Ok(())
    }
}

fn fmt_node(f: &mut fmt::Formatter<'_>, head: Head, args: &[Expr]) -> fmt::Result {
    // Raw `Expr::node` and slurp splicing accept any arity; nodes outside
    // a head's expected shape render generically instead of panicking.
    let malformed = match head {
        Head::Assign | Head::FuncDef | Head::Alt | Head::Kw | Head::Struct => args.len() != 2,
        Head::Splat => args.len() != 1,
        Head::Where | Head::Curly => args.is_empty(),
        _ => false,
    };
    if malformed {
        write!(f, "{head}(")?;
        Expr::fmt_list(f, args, ", ")?;
        return write!(f, ")");
    }

    match head {
        Head::Call => fmt_call(f, args),
        Head::Block => {
            write!(f, "begin ")?;
            Expr::fmt_list(f, args, "; ")?;
            write!(f, " end")
        }
        Head::Assign => {
            args[0].fmt_prec(f, PREC_ASSIGN + 1)?;
            write!(f, " = ")?;
            args[1].fmt_prec(f, PREC_ASSIGN)
        }
        Head::FuncDef => {
            write!(f, "function ")?;
            args[0].fmt_prec(f, PREC_ATOM)?;
            write!(f, " ")?;
            match &args[1] {
                Expr::Node {
                    head: Head::Block,
                    args: body,
                } => Expr::fmt_list(f, body, "; ")?,
                other => other.fmt_prec(f, PREC_ASSIGN)?,
            }
            write!(f, " end")
        }
        Head::Tuple => {
            write!(f, "(")?;
            Expr::fmt_list(f, args, ", ")?;
            if args.len() == 1 {
                write!(f, ",")?;
            }
            write!(f, ")")
        }
        Head::Where => {
            args[0].fmt_prec(f, PREC_ATOM)?;
            write!(f, " where {{")?;
            Expr::fmt_list(f, &args[1..], ", ")?;
            write!(f, "}}")
        }
        Head::TypeAnnot => {
            if let Some(value) = args.first() {
                if args.len() == 2 {
                    value.fmt_prec(f, PREC_ATOM)?;
                    write!(f, "::")?;
                    return args[1].fmt_prec(f, PREC_ATOM);
                }
                // Anonymous annotation: `::T`.
                write!(f, "::")?;
                return value.fmt_prec(f, PREC_ATOM);
            }
            write!(f, "::")
        }
        Head::Quote => {
            write!(f, ":(")?;
            Expr::fmt_list(f, args, "; ")?;
            write!(f, ")")
        }
        Head::Line => match (args.first(), args.get(1)) {
            (Some(Expr::Lit(Lit::Str(file))), Some(Expr::Lit(Lit::Int(n)))) => {
                write!(f, "#= {file}:{n} =#")
            }
            _ => write!(f, "#= line =#"),
        },
        Head::Alt => {
            args[0].fmt_prec(f, PREC_ALT)?;
            write!(f, " | ")?;
            args[1].fmt_prec(f, PREC_ALT + 1)
        }
        Head::StrInterp => {
            write!(f, "\"")?;
            for part in args {
                match part {
                    Expr::Lit(Lit::Str(s)) => write!(f, "{s}")?,
                    other => {
                        write!(f, "$(")?;
                        other.fmt_prec(f, PREC_ASSIGN)?;
                        write!(f, ")")?;
                    }
                }
            }
            write!(f, "\"")
        }
        Head::Kw => {
            args[0].fmt_prec(f, PREC_ASSIGN + 1)?;
            write!(f, " = ")?;
            args[1].fmt_prec(f, PREC_ASSIGN)
        }
        Head::Params => {
            write!(f, "; ")?;
            Expr::fmt_list(f, args, ", ")
        }
        Head::Splat => {
            args[0].fmt_prec(f, PREC_ATOM)?;
            write!(f, "...")
        }
        Head::Curly => {
            args[0].fmt_prec(f, PREC_ATOM)?;
            write!(f, "{{")?;
            Expr::fmt_list(f, &args[1..], ", ")?;
            write!(f, "}}")
        }
        Head::Struct => {
            write!(f, "struct ")?;
            args[0].fmt_prec(f, PREC_ATOM)?;
            write!(f, " ")?;
            match &args[1] {
                Expr::Node {
                    head: Head::Block,
                    args: body,
                } => Expr::fmt_list(f, body, "; ")?,
                other => other.fmt_prec(f, PREC_ASSIGN)?,
            }
            write!(f, " end")
        }
    }
}

fn fmt_call(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    if let Some(op) = args.first().and_then(Expr::as_sym) {
        if args.len() == 3 {
            if let Some((prec, assoc)) = op_precedence(op) {
                let (lp, rp) = match assoc {
                    OpAssoc::Left => (prec, prec + 1),
                    OpAssoc::Right => (prec + 1, prec),
                };
                args[1].fmt_prec(f, lp)?;
                write!(f, " {op} ")?;
                return args[2].fmt_prec(f, rp);
            }
        }
        if args.len() == 2 && (op == "-" || op == "!") {
            write!(f, "{op}")?;
            return args[1].fmt_prec(f, PREC_ATOM);
        }
    }

    match args.split_first() {
        Some((callee, rest)) => {
            callee.fmt_prec(f, PREC_ATOM)?;
            write!(f, "(")?;
            // A trailing Params group renders after `;`.
            match rest.split_last() {
                Some((last, positional)) if last.is_node(Head::Params) => {
                    Expr::fmt_list(f, positional, ", ")?;
                    last.fmt_inner(f)?;
                }
                _ => Expr::fmt_list(f, rest, ", ")?,
            }
            write!(f, ")")
        }
        None => write!(f, "()"),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(l: Expr, r: Expr) -> Expr {
        Expr::binop("+", l, r)
    }

    fn mul(l: Expr, r: Expr) -> Expr {
        Expr::binop("*", l, r)
    }

    #[test]
    fn test_leaf_accessors() {
        let n = Expr::int(5);
        let s = Expr::sym("x");

        assert!(n.is_leaf());
        assert!(s.is_leaf());
        assert_eq!(n.as_int(), Some(5));
        assert_eq!(s.as_sym().map(Sym::as_str), Some("x"));
        assert!(s.is_sym("x"));
        assert!(!s.is_sym("y"));
        assert_eq!(n.head(), None);
        assert!(n.args().is_empty());
    }

    #[test]
    fn test_node_accessors() {
        let call = Expr::call(Expr::sym("f"), [Expr::int(1), Expr::int(2)]);

        assert!(!call.is_leaf());
        assert!(call.is_node(Head::Call));
        assert!(!call.is_node(Head::Block));
        assert_eq!(call.head(), Some(Head::Call));
        assert_eq!(call.args().len(), 3);
        assert_eq!(call.args()[0], Expr::sym("f"));
    }

    #[test]
    fn test_structural_equality() {
        let a = Expr::call(Expr::sym("f"), [Expr::int(1)]);
        let b = Expr::call(Expr::sym("f"), [Expr::int(1)]);
        let c = Expr::call(Expr::sym("g"), [Expr::int(1)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_shares_children() {
        let a = Expr::call(Expr::sym("f"), [Expr::int(1)]);
        let b = a.clone();
        assert!(Arc::ptr_eq(a.args_arc().unwrap(), b.args_arc().unwrap()));
    }

    #[test]
    fn test_node_count() {
        assert_eq!(Expr::int(1).node_count(), 1);
        // f, 1, 2 plus the call node itself.
        let call = Expr::call(Expr::sym("f"), [Expr::int(1), Expr::int(2)]);
        assert_eq!(call.node_count(), 4);
    }

    #[test]
    fn test_bitor_builds_alt() {
        let alt = Expr::sym("a") | Expr::sym("b");
        assert!(alt.is_node(Head::Alt));
        assert_eq!(alt.args().len(), 2);
    }

    #[test]
    fn test_display_atoms() {
        assert_eq!(Expr::int(3).to_string(), "3");
        assert_eq!(Expr::sym("x").to_string(), "x");
        assert_eq!(Expr::string("hi").to_string(), "\"hi\"");
    }

    #[test]
    fn test_display_call() {
        let e = Expr::call(Expr::sym("f"), [Expr::sym("x"), Expr::int(2)]);
        assert_eq!(e.to_string(), "f(x, 2)");
        assert_eq!(Expr::call(Expr::sym("g"), []).to_string(), "g()");
    }

    #[test]
    fn test_display_infix_precedence() {
        let e = add(Expr::sym("a"), mul(Expr::sym("b"), Expr::sym("c")));
        assert_eq!(e.to_string(), "a + b * c");

        let e = mul(add(Expr::sym("a"), Expr::sym("b")), Expr::sym("c"));
        assert_eq!(e.to_string(), "(a + b) * c");
    }

    #[test]
    fn test_display_left_associativity() {
        let e = Expr::binop("-", Expr::binop("-", Expr::sym("a"), Expr::sym("b")), Expr::sym("c"));
        assert_eq!(e.to_string(), "a - b - c");

        let e = Expr::binop("-", Expr::sym("a"), Expr::binop("-", Expr::sym("b"), Expr::sym("c")));
        assert_eq!(e.to_string(), "a - (b - c)");
    }

    #[test]
    fn test_display_power_right_associativity() {
        let e = Expr::binop("^", Expr::sym("a"), Expr::binop("^", Expr::sym("b"), Expr::sym("c")));
        assert_eq!(e.to_string(), "a ^ b ^ c");
    }

    #[test]
    fn test_display_unary() {
        let e = Expr::call(Expr::sym("-"), [Expr::sym("x")]);
        assert_eq!(e.to_string(), "-x");
    }

    #[test]
    fn test_display_block_and_assign() {
        let e = Expr::block([
            Expr::assign(Expr::sym("x"), Expr::int(1)),
            Expr::call(Expr::sym("f"), [Expr::sym("x")]),
        ]);
        assert_eq!(e.to_string(), "begin x = 1; f(x) end");
    }

    #[test]
    fn test_display_function_forms() {
        let sig = Expr::call(Expr::sym("f"), [Expr::sym("x")]);
        let body = Expr::block([Expr::binop("+", Expr::sym("x"), Expr::int(1))]);
        assert_eq!(
            Expr::func_def(sig.clone(), body).to_string(),
            "function f(x) x + 1 end"
        );
        assert_eq!(
            Expr::assign(sig, Expr::int(1)).to_string(),
            "f(x) = 1"
        );
    }

    #[test]
    fn test_display_annot_where_curly() {
        let annot = Expr::annot(Expr::sym("x"), Expr::sym("Int"));
        assert_eq!(annot.to_string(), "x::Int");

        let curly = Expr::curly(Expr::sym("Point"), [Expr::sym("T")]);
        assert_eq!(curly.to_string(), "Point{T}");

        let wh = Expr::where_clause(
            Expr::call(Expr::sym("f"), [Expr::sym("x")]),
            [Expr::sym("T")],
        );
        assert_eq!(wh.to_string(), "f(x) where {T}");
    }

    #[test]
    fn test_display_tuple_and_splat() {
        assert_eq!(
            Expr::tuple([Expr::int(1), Expr::int(2)]).to_string(),
            "(1, 2)"
        );
        assert_eq!(Expr::tuple([Expr::int(1)]).to_string(), "(1,)");
        assert_eq!(Expr::splat(Expr::sym("xs")).to_string(), "xs...");
    }

    #[test]
    fn test_display_call_with_params() {
        let e = Expr::call(
            Expr::sym("f"),
            [
                Expr::sym("x"),
                Expr::params([Expr::kw(Expr::sym("k"), Expr::int(1))]),
            ],
        );
        assert_eq!(e.to_string(), "f(x; k = 1)");
    }

    #[test]
    fn test_display_line_marker() {
        assert_eq!(Expr::line("in.jl", 3).to_string(), "#= in.jl:3 =#");
    }

    #[test]
    fn test_display_str_interp() {
        let e = Expr::str_interp([
            Expr::string("v = "),
            Expr::sym("x"),
        ]);
        assert_eq!(e.to_string(), "\"v = $(x)\"");
    }

    #[test]
    fn test_display_alt() {
        let e = Expr::sym("a") | Expr::sym("b");
        assert_eq!(e.to_string(), "a | b");

        let nested = (Expr::sym("a") | Expr::sym("b")) | Expr::sym("c");
        assert_eq!(nested.to_string(), "a | b | c");

        let right = Expr::sym("a") | (Expr::sym("b") | Expr::sym("c"));
        assert_eq!(right.to_string(), "a | (b | c)");
    }

    #[test]
    fn test_display_struct() {
        let e = Expr::struct_def(
            Expr::sym("Foo"),
            Expr::block([
                Expr::annot(Expr::sym("x"), Expr::sym("Int")),
                Expr::sym("y"),
            ]),
        );
        assert_eq!(e.to_string(), "struct Foo x::Int; y end");
    }

    #[test]
    fn test_display_underful_node_falls_back() {
        let e = Expr::node(Head::Assign, [Expr::sym("x")]);
        assert_eq!(e.to_string(), "assign(x)");
        assert_eq!(Expr::node(Head::Splat, []).to_string(), "splat()");
    }

    #[test]
    fn test_expr_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expr>();
    }
}
