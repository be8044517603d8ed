//! Splitting and reassembling function definitions.
//!
//! [`split_def`] destructures both definition forms into an [`FnParts`]
//! record and [`combine_def`] rebuilds the long form, so rewriting a
//! definition is: split, edit parts, combine. The destructuring itself is
//! done with templates and [`capture`](crate::Pattern::capture); the
//! alternation covers the optional return annotation and `where` clause.
//!
//! [`split_arg`] and [`combine_arg`] do the same for one signature
//! argument (`x`, `x::T`, `x = d`, `x::T = d`, `xs...`, `::T`).

use crate::normalize::unblock;
use crate::pattern::{compile, Pattern};
use templar_core::{tree, Expr, Head, Sym, TemplarError, TemplarResult};

/// The named parts of a function definition.
///
/// `split_def(combine_def(parts)) == parts` holds, with one wrinkle: a
/// body that is a block holding a single statement is stored unwrapped,
/// the same way the matcher sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct FnParts {
    /// The function name; usually a symbol, `Name{T}` for parametric
    /// constructors.
    pub name: Expr,
    /// Positional arguments, in order, as written.
    pub args: Vec<Expr>,
    /// Keyword arguments, from the signature's post-`;` group.
    pub kwargs: Vec<Expr>,
    /// Return type annotation, if any.
    pub ret: Option<Expr>,
    /// `where` parameters, if any.
    pub where_params: Vec<Expr>,
    /// The body.
    pub body: Expr,
}

/// One signature argument, destructured.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgSpec {
    /// Argument name; `None` for an anonymous `::T`.
    pub name: Option<Sym>,
    /// Declared type, if any.
    pub ty: Option<Expr>,
    /// Whether the argument slurps the remaining positionals (`xs...`).
    pub slurp: bool,
    /// Default value, if any.
    pub default: Option<Expr>,
}

fn def_pattern() -> TemplarResult<Pattern> {
    compile(&Expr::func_def(Expr::sym("sig_"), Expr::sym("body_")))
}

fn sig_pattern() -> TemplarResult<Pattern> {
    let call = tree!(f_(args__));
    let with_ret = Expr::annot(call.clone(), Expr::sym("ret_"));
    let plain_where = Expr::where_clause(call.clone(), [Expr::sym("wparams__")]);
    let ret_where = Expr::where_clause(with_ret.clone(), [Expr::sym("wparams__")]);
    // Most decorated first; alternation commits to the first fit.
    compile(&(ret_where | plain_where | with_ret | call))
}

/// Destructure a function definition, long or short form.
///
/// # Errors
///
/// [`TemplarError::NotADefinition`] when the tree is not a definition
/// with a call-shaped signature.
pub fn split_def(ex: &Expr) -> TemplarResult<FnParts> {
    let reject = || TemplarError::not_a_definition(ex.to_string());

    let long = long_def(ex);
    let env = def_pattern()?.capture(&long).ok_or_else(reject)?;
    let sig = env.expr("sig").cloned().ok_or_else(reject)?;
    let body = env.expr("body").cloned().ok_or_else(reject)?;

    let sig_env = sig_pattern()?.capture(&sig).ok_or_else(reject)?;
    let name = sig_env.expr("f").cloned().ok_or_else(reject)?;
    let mut args = sig_env.seq("args").unwrap_or(&[]).to_vec();
    let ret = sig_env.expr("ret").cloned();
    let where_params = sig_env
        .seq("wparams")
        .map(<[Expr]>::to_vec)
        .unwrap_or_default();

    let mut kwargs = Vec::new();
    if args.last().is_some_and(|a| a.is_node(Head::Params)) {
        if let Some(params) = args.pop() {
            kwargs = params.args().to_vec();
        }
    }

    Ok(FnParts {
        name,
        args,
        kwargs,
        ret,
        where_params,
        body,
    })
}

/// Rebuild a long-form definition from its parts.
#[must_use]
pub fn combine_def(parts: &FnParts) -> Expr {
    let mut call_args = parts.args.clone();
    if !parts.kwargs.is_empty() {
        call_args.push(Expr::params(parts.kwargs.iter().cloned()));
    }
    let mut sig = Expr::call(parts.name.clone(), call_args);
    if let Some(ret) = &parts.ret {
        sig = Expr::annot(sig, ret.clone());
    }
    if !parts.where_params.is_empty() {
        sig = Expr::where_clause(sig, parts.where_params.iter().cloned());
    }
    Expr::func_def(sig, ensure_block(&parts.body))
}

/// Destructure one signature argument.
///
/// Defaults are recognized in both spellings a tree may carry, `Kw` and
/// plain assignment.
///
/// # Errors
///
/// [`TemplarError::UnsupportedArgument`] for argument forms outside the
/// supported set.
pub fn split_arg(arg: &Expr) -> TemplarResult<ArgSpec> {
    split_arg_inner(arg, arg)
}

fn split_arg_inner(arg: &Expr, whole: &Expr) -> TemplarResult<ArgSpec> {
    match arg {
        Expr::Sym(name) => Ok(ArgSpec {
            name: Some(name.clone()),
            ty: None,
            slurp: false,
            default: None,
        }),
        Expr::Node {
            head: Head::Kw | Head::Assign,
            args,
        } if args.len() == 2 => {
            let mut spec = split_arg_inner(&args[0], whole)?;
            spec.default = Some(args[1].clone());
            Ok(spec)
        }
        Expr::Node {
            head: Head::Splat,
            args,
        } if args.len() == 1 => {
            let mut spec = split_arg_inner(&args[0], whole)?;
            spec.slurp = true;
            Ok(spec)
        }
        Expr::Node {
            head: Head::TypeAnnot,
            args,
        } if args.len() == 2 => {
            let mut spec = split_arg_inner(&args[0], whole)?;
            spec.ty = Some(args[1].clone());
            Ok(spec)
        }
        Expr::Node {
            head: Head::TypeAnnot,
            args,
        } if args.len() == 1 => Ok(ArgSpec {
            name: None,
            ty: Some(args[0].clone()),
            slurp: false,
            default: None,
        }),
        _ => Err(TemplarError::unsupported_argument(whole.to_string())),
    }
}

/// Rebuild one signature argument from its parts.
#[must_use]
pub fn combine_arg(spec: &ArgSpec) -> Expr {
    let mut arg = match (&spec.name, &spec.ty) {
        (Some(name), Some(ty)) => Expr::annot(Expr::sym(name.clone()), ty.clone()),
        (Some(name), None) => Expr::sym(name.clone()),
        (None, Some(ty)) => Expr::node(Head::TypeAnnot, [ty.clone()]),
        (None, None) => Expr::sym("_"),
    };
    if spec.slurp {
        arg = Expr::splat(arg);
    }
    if let Some(default) = &spec.default {
        arg = Expr::kw(arg, default.clone());
    }
    arg
}

/// Convert a short-form definition to long form; other trees pass
/// through unchanged.
#[must_use]
pub fn long_def(ex: &Expr) -> Expr {
    if is_short_def(ex) {
        Expr::func_def(ex.args()[0].clone(), ensure_block(&ex.args()[1]))
    } else {
        ex.clone()
    }
}

/// Convert a long-form definition to short form where possible; other
/// trees pass through unchanged. Multi-statement bodies keep their block.
#[must_use]
pub fn short_def(ex: &Expr) -> Expr {
    match ex {
        Expr::Node {
            head: Head::FuncDef,
            args,
        } if args.len() == 2 && is_signature(&args[0]) => {
            Expr::assign(args[0].clone(), unblock(&args[1]))
        }
        _ => ex.clone(),
    }
}

/// Whether this tree is a function definition in either form.
#[must_use]
pub fn is_def(ex: &Expr) -> bool {
    if is_short_def(ex) {
        return true;
    }
    matches!(
        ex,
        Expr::Node { head: Head::FuncDef, args } if args.len() == 2 && is_signature(&args[0])
    )
}

/// Whether this tree is a short-form definition (`f(x) = body`).
#[must_use]
pub fn is_short_def(ex: &Expr) -> bool {
    matches!(
        ex,
        Expr::Node { head: Head::Assign, args } if args.len() == 2 && is_signature(&args[0])
    )
}

/// A call, possibly under a return annotation or `where` clause.
fn is_signature(ex: &Expr) -> bool {
    match ex {
        Expr::Node {
            head: Head::Call,
            args,
        } => !args.is_empty(),
        Expr::Node {
            head: Head::Where,
            args,
        } => args.first().is_some_and(is_signature),
        Expr::Node {
            head: Head::TypeAnnot,
            args,
        } => args.len() == 2 && is_signature(&args[0]),
        _ => false,
    }
}

fn ensure_block(body: &Expr) -> Expr {
    if body.is_node(Head::Block) {
        body.clone()
    } else {
        Expr::block([body.clone()])
    }
}
