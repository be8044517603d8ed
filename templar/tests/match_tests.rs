//! End-to-end tests for template compilation, capture, and instantiation.
//!
//! Exercises the full destructure-and-rebuild cycle on program-shaped
//! trees:
//! - Marker grammar (wildcards, slurps, typed wildcards, plain spellings)
//! - Slurp partitioning around fixed prefix and suffix positions
//! - Alternation ordering and commitment
//! - Block/statement equivalence at depth
//! - Capture-then-instantiate rewrite pipelines
//! - Compile-time rejection of ambiguous templates
//!
//! # Test Organization
//!
//! Tests are organized into sections:
//! - Destructuring: one-step capture of realistic shapes
//! - Rewriting: capture feeding `instantiate`
//! - Equivalence: sugar-insensitive matching
//! - Failure modes: mismatches and malformed templates

use templar::{capture, compile, find_all, instantiate, tree, Bindings, Expr, Pattern};

// ============================================================================
// Test Utilities
// ============================================================================

/// Helper to compile a template that is known to be well formed.
fn pat(template: &Expr) -> Pattern {
    compile(template).expect("template should compile")
}

/// Helper to capture and unwrap an expected match.
fn must_capture(template: &Expr, subject: &Expr) -> Bindings {
    pat(template)
        .capture(subject)
        .expect("subject should match template")
}

/// A small program: a block with a docstring, an assignment, and a call.
fn sample_program() -> Expr {
    Expr::block([
        Expr::line("prog.jl", 1),
        Expr::string("Frobnicates the widget."),
        Expr::line("prog.jl", 2),
        Expr::assign(Expr::sym("state"), Expr::int(0)),
        Expr::line("prog.jl", 3),
        Expr::call(Expr::sym("run"), [Expr::sym("state"), Expr::int(3)]),
    ])
}

// ============================================================================
// Section: Destructuring
// ============================================================================

#[test]
fn test_docstring_extraction() {
    let template = Expr::block([Expr::sym("doc_String"), Expr::sym("rest__")]);
    let env = must_capture(&template, &sample_program());

    assert_eq!(env.expr("doc"), Some(&Expr::string("Frobnicates the widget.")));
    // Line markers are insignificant, so the tail is the two statements.
    assert_eq!(env.seq("rest").map(<[Expr]>::len), Some(2));
}

#[test]
fn test_assignment_destructuring_anywhere() {
    let template = Expr::assign(Expr::sym("lhs_Symbol"), Expr::sym("rhs_"));
    let hits = find_all(&pat(&template), &sample_program());
    // One structural assignment in the program.
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1.expr("lhs"), Some(&Expr::sym("state")));
    assert_eq!(hits[0].1.expr("rhs"), Some(&Expr::int(0)));
}

#[test]
fn test_call_head_and_argument_split() {
    let env = must_capture(
        &tree!(callee_(first_, rest__)),
        &Expr::call(Expr::sym("run"), [Expr::sym("state"), Expr::int(3)]),
    );
    assert_eq!(env.expr("callee"), Some(&Expr::sym("run")));
    assert_eq!(env.expr("first"), Some(&Expr::sym("state")));
    assert_eq!(env.seq("rest"), Some(&[Expr::int(3)][..]));
}

#[test]
fn test_struct_destructuring() {
    let point = Expr::struct_def(
        Expr::sym("Point"),
        Expr::block([
            Expr::annot(Expr::sym("x"), Expr::sym("Int")),
            Expr::annot(Expr::sym("y"), Expr::sym("Int")),
        ]),
    );
    let env = must_capture(
        &Expr::struct_def(Expr::sym("name_"), Expr::sym("body_")),
        &point,
    );
    assert_eq!(env.expr("name"), Some(&Expr::sym("Point")));
    // The multi-field body keeps its block shape; fields are its children.
    let body = env.expr("body").unwrap();
    assert_eq!(body.args().len(), 2);

    // A one-field body is indistinguishable from the bare field.
    let single = Expr::struct_def(
        Expr::sym("Tag"),
        Expr::block([Expr::annot(Expr::sym("id"), Expr::sym("Int"))]),
    );
    let env = must_capture(
        &Expr::struct_def(Expr::sym("name_"), Expr::sym("body_")),
        &single,
    );
    assert_eq!(
        env.expr("body"),
        Some(&Expr::annot(Expr::sym("id"), Expr::sym("Int")))
    );
}

#[test]
fn test_definition_forms_via_alternation() {
    let template = Expr::assign(Expr::sym("sig_"), Expr::sym("rhs_"))
        | Expr::func_def(Expr::sym("sig_"), Expr::sym("rhs_"));
    let pattern = pat(&template);

    let short = Expr::assign(
        Expr::call(Expr::sym("f"), [Expr::sym("x")]),
        Expr::binop("+", Expr::sym("x"), Expr::int(1)),
    );
    let long = Expr::func_def(
        Expr::call(Expr::sym("g"), [Expr::sym("y")]),
        Expr::block([Expr::sym("y")]),
    );

    let env = pattern.capture(&short).expect("short form should match");
    assert_eq!(
        env.expr("sig"),
        Some(&Expr::call(Expr::sym("f"), [Expr::sym("x")]))
    );

    let env = pattern.capture(&long).expect("long form should match");
    assert_eq!(env.expr("rhs"), Some(&Expr::sym("y")));
}

#[test]
fn test_typed_markers_discriminate_literals() {
    let ints = pat(&tree!(f(n_Int)));
    let floats = pat(&tree!(f(n_Float)));
    let strings = pat(&tree!(f(s_String)));

    let int_call = tree!(f(3));
    let float_call = tree!(f(2.5));
    let str_call = tree!(f("three"));

    assert!(ints.is_match(&int_call));
    assert!(!ints.is_match(&float_call));
    assert!(!ints.is_match(&str_call));

    assert!(floats.is_match(&float_call));
    assert!(!floats.is_match(&int_call));

    assert!(strings.is_match(&str_call));
    assert!(!strings.is_match(&int_call));
}

#[test]
fn test_repeated_names_enforce_equality_across_depth() {
    let template = tree!(f(x_, g(h(x_))));
    assert!(pat(&template).is_match(&tree!(f(k(1), g(h(k(1)))))));
    assert!(!pat(&template).is_match(&tree!(f(k(1), g(h(k(2)))))));
}

// ============================================================================
// Section: Rewriting
// ============================================================================

#[test]
fn test_capture_then_instantiate_swaps_operands() {
    let template = Expr::assign(Expr::sym("a_"), Expr::sym("b_"));
    let rebuild = Expr::assign(Expr::sym("b_"), Expr::sym("a_"));

    let env = must_capture(&template, &Expr::assign(Expr::sym("x"), Expr::int(1)));
    let swapped = instantiate(&rebuild, &env);
    assert_eq!(swapped, Expr::assign(Expr::int(1), Expr::sym("x")));
}

#[test]
fn test_instantiate_splices_argument_runs() {
    let env = must_capture(&tree!(f(args__)), &tree!(f(1, 2, 3)));
    let forwarded = instantiate(&tree!(g(0, args__)), &env);
    assert_eq!(forwarded, tree!(g(0, 1, 2, 3)));
}

#[test]
fn test_instantiate_drops_empty_runs() {
    let env = must_capture(&tree!(f(args__)), &tree!(f()));
    assert_eq!(instantiate(&tree!(g(args__)), &env), tree!(g()));
}

#[test]
fn test_template_reuse_across_subjects() {
    // One compiled pattern, many subjects.
    let pattern = pat(&tree!(f(x_)));
    for n in 0..10 {
        let env = pattern.capture(&Expr::call(Expr::sym("f"), [Expr::int(n)]));
        assert_eq!(env.unwrap().expr("x"), Some(&Expr::int(n)));
    }
}

// ============================================================================
// Section: Equivalence
// ============================================================================

#[test]
fn test_single_statement_block_matches_like_its_statement() {
    let pattern = pat(&tree!(f(x_)));
    let bare = tree!(f(1));
    let wrapped = Expr::block([Expr::line("w.jl", 1), bare.clone()]);
    let nested = Expr::block([Expr::block([bare.clone()])]);

    let from_bare = pattern.capture(&bare).unwrap();
    let from_wrapped = pattern.capture(&wrapped).unwrap();
    let from_nested = pattern.capture(&nested).unwrap();
    assert_eq!(from_bare.expr("x"), from_wrapped.expr("x"));
    assert_eq!(from_bare.expr("x"), from_nested.expr("x"));
}

#[test]
fn test_block_wrapped_template_matches_bare_statement() {
    let template = Expr::block([Expr::line("t.jl", 9), tree!(f(x_))]);
    let env = must_capture(&template, &tree!(f(4)));
    assert_eq!(env.expr("x"), Some(&tree!(4)));
}

#[test]
fn test_equivalence_holds_inside_larger_matches() {
    // The block sugar appears as a child of the subject, not at the root.
    let template = Expr::func_def(Expr::sym("sig_"), tree!(body_));
    let subject = Expr::func_def(
        Expr::call(Expr::sym("f"), [Expr::sym("x")]),
        Expr::block([Expr::line("d.jl", 2), Expr::sym("x")]),
    );
    let env = must_capture(&template, &subject);
    assert_eq!(env.expr("body"), Some(&Expr::sym("x")));
}

#[test]
fn test_multi_statement_blocks_stay_blocks() {
    let pattern = pat(&tree!(f(1)));
    let two = Expr::block([tree!(f(1)), tree!(g(2))]);
    assert!(!pattern.is_match(&two));
}

// ============================================================================
// Section: Failure Modes
// ============================================================================

#[test]
fn test_double_slurp_is_rejected_with_location() {
    let err = compile(&tree!(f(a__, g, b__))).unwrap_err();
    assert_eq!(err.kind(), "MalformedPattern");
    assert!(err.to_string().contains("f(a__, g, b__)"));
}

#[test]
fn test_double_slurp_detected_below_the_root() {
    let template = tree!(outer(f(a__, b__)));
    assert!(compile(&template).is_err());
}

#[test]
fn test_one_step_capture_reports_compile_errors() {
    assert!(capture(&tree!(f(a__, b__)), &tree!(f(1))).is_err());
    assert_eq!(capture(&tree!(f(x_)), &tree!(g(1))).unwrap(), None);
}

#[test]
fn test_underlength_subjects_fail_cleanly() {
    let pattern = pat(&tree!(f(a_, mid__, b_)));
    assert!(pattern.is_match(&tree!(f(1, 2))));
    assert!(!pattern.is_match(&tree!(f(1))));
    assert!(!pattern.is_match(&tree!(f())));
}

#[test]
fn test_no_partial_bindings_escape_failed_matches() {
    // First child binds x, second child fails; the caller sees only None.
    let pattern = pat(&tree!(f(x_, 3)));
    assert_eq!(pattern.capture(&tree!(f(1, 4))), None);
}
