//! Rewrite demo: thread a context argument through every call to `fetch`.

use templar::*;

fn main() {
    let program = Expr::block([
        Expr::assign(Expr::sym("user"), tree!(fetch("users", 1))),
        Expr::assign(Expr::sym("posts"), tree!(map(fetch("posts", 2), render))),
        tree!(render(user, posts)),
    ]);

    let pattern = compile(&tree!(fetch(args__))).unwrap();
    let rebuild = tree!(fetch(ctx, args__));

    let rewritten = postwalk(&program, |ex| match pattern.capture(&ex) {
        Some(env) => instantiate(&rebuild, &env),
        None => ex,
    });

    println!("before:\n{program}\n");
    println!("after:\n{rewritten}");
}
