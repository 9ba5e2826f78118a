use obscurix::{Config, RunError, Runtime};
use pretty_assertions::assert_eq;

fn run_with(source: &str, config: Config) -> Result<String, RunError> {
    Runtime::from_source("test.obx", source, config)
        .execute(Vec::new())
        .map(|out| String::from_utf8(out).expect("program output is utf-8"))
}

fn run(source: &str) -> Result<String, RunError> {
    run_with(source, Config::default())
}

fn assert_output(source: &str, expected: &str) {
    match run(source) {
        Ok(output) => assert_eq!(output, expected, "program:\n{source}"),
        Err(e) => panic!("program failed:\n{source}\nError: {e:?}"),
    }
}

fn assert_unhandled(source: &str, expected: &str) {
    match run(source) {
        Err(RunError::Unhandled(message)) => assert_eq!(message, expected),
        other => panic!("expected an unhandled error for:\n{source}\ngot: {other:?}"),
    }
}

#[test]
fn scenario_a_function_call_result() {
    assert_output("⥀§add a b ⎋ a ⊞ b ⥁\nx ≔ §add 3 4 *x", "7\n");
}

#[test]
fn scenario_b_then_branch() {
    assert_output("x ≔ 5 ↜ ? x ≺ 10 ⇒ *x ⇏ *x ↯", "5\n");
}

#[test]
fn scenario_c_caught_throw() {
    assert_output("⛌ λ! \"boom\" ⎁ e *e ⍰", "boom\n");
}

#[test]
fn scenario_d_finally_before_return_reaches_caller() {
    let source = r#"
        ok ≔ "ok"
        ⥀§one
            ⛌ ⎋ 1 ⎎ *ok ⍰
        ⥁
        r ≔ §one
        *r
    "#;
    assert_output(source, "ok\n1\n");
}

#[test]
fn scenario_e_undefined_function() {
    assert_unhandled("§ghost", "Function not found: §ghost");
}

#[test]
fn call_arity_must_match() {
    let source = "⥀§f a b ⎋ a ⊞ b ⥁ x ≔ §f 1 2 *x";
    assert_output(source, "3\n");

    assert_unhandled(
        "⥀§f a b ⎋ a ⊞ b ⥁ x ≔ §f 1 2 3",
        "Parameter error when calling §f. Required 2, received 3.",
    );
    assert_unhandled("x ≔ §f 1 2", "Function not found: §f");
}

#[test]
fn assignment_inside_function_updates_local_binding_only() {
    let source = r#"
        a ≔ 100
        ⥀§bump a
            a ≔ a ⊞ 1
            ⎋ a
        ⥁
        r ≔ §bump 5
        *r *a
    "#;
    assert_output(source, "6\n100\n");
}

#[test]
fn assignment_to_new_name_inside_function_creates_global() {
    let source = r#"
        ⥀§set v
            created ≔ v
        ⥁
        §set 42
        *created
    "#;
    assert_output(source, "42\n");
}

#[test]
fn inherited_global_is_shadowed_by_the_snapshot() {
    // Globals copied into the frame are locals from then on.
    let source = r#"
        g ≔ 1
        ⥀§touch
            g ≔ 2
            ⎋ g
        ⥁
        r ≔ §touch
        *r *g
    "#;
    assert_output(source, "2\n1\n");
}

#[test]
fn callee_sees_callers_locals() {
    let source = r#"
        ⥀§inner ⎋ secret ⥁
        ⥀§outer secret ⎋ §inner ⥁
        r ≔ §outer "shh"
        *r
    "#;
    assert_output(source, "shh\n");
}

#[test]
fn each_call_snapshots_the_callers_scope_at_entry() {
    let source = r#"
        ⥀§read ⎋ n ⥁
        ⥀§outer n
            first ≔ §read
            n ≔ 2
            second ≔ §read
        ⥁
        §outer 1
        *first *second
    "#;
    assert_output(source, "1\n2\n");
}

#[test]
fn errors_cross_call_frames_to_the_nearest_handler() {
    let source = r#"
        ⥀§fail m λ! m ⥁
        ⥀§middle ⎋ §fail "deep" ⥁
        ⛌ §middle ⎁ err *err ⍰
        *"after"
    "#;
    assert_output(source, "deep\nafter\n");
}

#[test]
fn return_from_inside_nested_blocks() {
    let source = r#"
        ⥀§classify n
            ↜ ? n ≺ 0 ⇒ ⎋ "negative" ↯
            ↜ ? n ≡ 0 ⇒ ⎋ "zero" ⇏ ⎋ "positive" ↯
        ⥁
        a ≔ §classify -3 b ≔ §classify 0 c ≔ §classify 8
        *a *b *c
    "#;
    assert_output(source, "negative\nzero\npositive\n");
}

#[test]
fn recursion_through_conditionals() {
    let source = r#"
        ⥀§fact n
            ↜ ? n ≺ 2 ⇒ ⎋ 1 ↯
            m ≔ n ⊖ 1
            sub ≔ §fact m
            ⎋ §times n sub
        ⥁
        ⥀§times a b
            ↜ ? b ≡ 0 ⇒ ⎋ 0 ↯
            c ≔ b ⊖ 1
            rest ≔ §times a c
            ⎋ a ⊞ rest
        ⥁
        r ≔ §fact 5
        *r
    "#;
    assert_output(source, "120\n");
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let source = "⥀§loop ⎋ §loop ⥁ ⛌ §loop ⎁ e *e ⍰";
    let output = run_with(source, Config::default().with_max_call_depth(16)).unwrap();
    assert_eq!(output, "Call depth limit of 16 exceeded calling §loop\n");
}

#[test]
fn void_function_value_prints_as_none() {
    assert_output("⥀§nothing ⥁ v ≔ §nothing *v", "None\n");
}

#[test]
fn comments_and_free_form_layout() {
    let source = "※ header\nx≔1※ inline\n  y ≔\n x ⊞ 2\n*y";
    assert_output(source, "3\n");
}

#[test]
fn output_before_an_unhandled_error_is_kept_in_order() {
    let runtime = Runtime::from_source("t.obx", "*\"a\" λ! \"stop\" *\"b\"", Config::default());
    let mut out = Vec::new();
    let error = runtime.execute(&mut out).unwrap_err();
    assert_eq!(error.to_string(), "stop");
    assert_eq!(String::from_utf8(out).unwrap(), "a\n");
}

#[test]
fn rerunning_from_fresh_runtime_is_idempotent() {
    let source = r#"
        ⥀§next n ⎋ n ⊞ 1 ⥁
        counter ≔ 0
        counter ≔ §next counter
        counter ≔ §next counter
        *counter
    "#;
    let first = run(source).unwrap();
    let second = run(source).unwrap();
    assert_eq!(first, "2\n");
    assert_eq!(first, second);
}

#[test]
fn debug_flag_does_not_change_results() {
    let source = "⥀§add a b ⎋ a ⊞ b ⥁ x ≔ §add 3 4 *x";
    let plain = run(source).unwrap();
    let traced = run_with(source, Config::default().with_debug(true)).unwrap();
    assert_eq!(plain, traced);
}

#[test]
fn assignment_expression_runs_until_the_next_statement_starter() {
    // A call after an assignment is read as part of its expression.
    assert_unhandled("⥀§f a ⥁ x ≔ 1 §f 9", "Invalid expression: 1 §f 9");
    assert_output("⥀§f a ⥁ x ≔ 1 *x §f 9", "1\n");
}

#[test]
fn default_depth_limit_is_reached_through_nested_blocks() {
    // Each level recurses from inside an if and a try with a finally clause.
    let source = r#"
        ⥀§loop n
            ↜ ? 1 ⇒
                ⛌ m ≔ n ⊞ 1 r ≔ §loop m ⎋ r ⎎ *"" ⍰
            ↯
        ⥁
        ⛌ §loop 0 ⎁ e *e ⍰
    "#;
    let output = run(source).unwrap();
    let expected = format!("{}Call depth limit of 256 exceeded calling §loop\n", "\n".repeat(256));
    assert_eq!(output, expected);
}

#[test]
fn glyph_parameters_are_rejected_at_load() {
    let error = run("⥀§f a ⊞ b ⎋ a ⥁ x ≔ §f 1 2 3 *x").unwrap_err();
    assert!(matches!(error, RunError::Load(_)));
    assert_eq!(error.to_string(), "Invalid parameter '⊞' in definition of §f.");
}
