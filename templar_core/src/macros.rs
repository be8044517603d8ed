//! Literal tree construction.
//!
//! [`tree!`] builds an [`Expr`](crate::Expr) from call-shaped source
//! spelling: identifiers become symbols, literals become literal leaves,
//! and `name(args...)` becomes a `Call` node. Marker spellings (`x_`,
//! `xs__`, `_`, `__`) are ordinary identifiers here; they only acquire
//! meaning when the tree is compiled as a template.
//!
//! ```
//! use templar_core::{tree, Expr};
//!
//! let e = tree!(f(x, g(1), "lit"));
//! assert_eq!(e.to_string(), r#"f(x, g(1), "lit")"#);
//! ```

/// Build the argument vector for a call inside [`tree!`].
#[macro_export]
macro_rules! tree_args {
    () => { ::std::vec::Vec::<$crate::Expr>::new() };

    (_) => { vec![$crate::Expr::sym("_")] };
    (_, $($rest:tt)*) => {{
        let mut args = vec![$crate::Expr::sym("_")];
        args.extend($crate::tree_args!($($rest)*));
        args
    }};

    ($lit:literal) => { vec![$crate::Expr::lit($lit)] };
    ($lit:literal, $($rest:tt)*) => {{
        let mut args = vec![$crate::Expr::lit($lit)];
        args.extend($crate::tree_args!($($rest)*));
        args
    }};

    ($name:ident($($inner:tt)*)) => { vec![$crate::tree!($name($($inner)*))] };
    ($name:ident($($inner:tt)*), $($rest:tt)*) => {{
        let mut args = vec![$crate::tree!($name($($inner)*))];
        args.extend($crate::tree_args!($($rest)*));
        args
    }};

    ($name:ident) => { vec![$crate::Expr::sym(stringify!($name))] };
    ($name:ident, $($rest:tt)*) => {{
        let mut args = vec![$crate::Expr::sym(stringify!($name))];
        args.extend($crate::tree_args!($($rest)*));
        args
    }};
}

/// Build an [`Expr`](crate::Expr) from call-shaped spelling.
#[macro_export]
macro_rules! tree {
    (_) => { $crate::Expr::sym("_") };
    ($lit:literal) => { $crate::Expr::lit($lit) };
    ($callee:ident($($args:tt)*)) => {
        $crate::Expr::call(
            $crate::Expr::sym(stringify!($callee)),
            $crate::tree_args!($($args)*),
        )
    };
    ($name:ident) => { $crate::Expr::sym(stringify!($name)) };
}

#[cfg(test)]
mod tests {
    use crate::Expr;

    #[test]
    fn test_tree_atoms() {
        assert_eq!(tree!(x), Expr::sym("x"));
        assert_eq!(tree!(42), Expr::int(42));
        assert_eq!(tree!(2.5), Expr::float(2.5));
        assert_eq!(tree!("s"), Expr::string("s"));
        assert_eq!(tree!(true), Expr::lit(true));
        assert_eq!(tree!(_), Expr::sym("_"));
    }

    #[test]
    fn test_tree_call() {
        assert_eq!(
            tree!(f(x, 1)),
            Expr::call(Expr::sym("f"), [Expr::sym("x"), Expr::int(1)])
        );
        assert_eq!(tree!(f()), Expr::call(Expr::sym("f"), []));
    }

    #[test]
    fn test_tree_nested_call() {
        assert_eq!(
            tree!(f(g(h(1)), y)),
            Expr::call(
                Expr::sym("f"),
                [
                    Expr::call(
                        Expr::sym("g"),
                        [Expr::call(Expr::sym("h"), [Expr::int(1)])]
                    ),
                    Expr::sym("y"),
                ],
            )
        );
    }

    #[test]
    fn test_tree_marker_spellings_are_plain_symbols() {
        assert_eq!(tree!(f(x_, xs__)), {
            Expr::call(Expr::sym("f"), [Expr::sym("x_"), Expr::sym("xs__")])
        });
        assert_eq!(tree!(f(_, 2)).args()[1], Expr::int(2));
    }

    #[test]
    fn test_tree_wildcard_between_args() {
        let e = tree!(f(1, _, 3));
        assert_eq!(e.args()[2], Expr::sym("_"));
        assert_eq!(e.args().len(), 4);
    }
}
