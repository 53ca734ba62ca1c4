use muffin::HeadlessTarget;
use muffin::codegen::generate;
use muffin::parser::parse_program;

use crate::support::{HELLO_WORLD, headless, muffin};

#[test]
fn generation_is_deterministic() {
    let program = parse_program(HELLO_WORLD).expect("parses");
    let first = generate(&program, &HeadlessTarget);
    let second = generate(&program, &HeadlessTarget);
    assert_eq!(first, second);
    assert_eq!(first, headless(HELLO_WORLD));
}

#[test]
fn recipe_becomes_a_step_machine() {
    let code = headless(HELLO_WORLD);
    assert!(code.starts_with("const m = {};\n"));
    assert!(code.contains("function f0() {\n  const b = {};\n  let i = 1;\n  while (i <= 4) {\n"));
    assert!(code.contains("    switch (i) {\n      case 1: "));
    assert!(code.contains("      case 4: return 0; break;\n"));
    assert!(code.contains("    if (I == null) i++; else i = I;\n"));
    assert!(code.contains("  return 0;\n}\n"));
}

#[test]
fn string_ingredients_are_escaped_literals() {
    let code = headless(&muffin(
        &["\"say \\\\ hi\" brand Salt"],
        &["set up a Cake Mold", "add Salt into Cake Mold"],
    ));
    assert!(code.contains("m.k0[0].push(\"say \\\\\\\\ hi\");"));
}

#[test]
fn first_ordinal_skips_the_bounds_guard() {
    let code = headless(&muffin(&[], &["set up 2 Bowls", "clean Bowl"]));
    assert!(!code.contains("too large"));
    assert!(code.contains("else { b.k0[0] = 0; }"));

    let code = headless(&muffin(&[], &["set up 2 Bowls", "clean 2nd Bowl"]));
    assert!(code.contains("else if (b.k0.length < 2) { throw [0, 2, 2]; }"));
    assert!(code.contains("else { b.k0[1] = 0; }"));
}

#[test]
fn jumps_set_the_next_instruction() {
    let code = headless(&muffin(
        &[],
        &["set up a Bowl", "if Bowl is empty, proceed to step 4", "clean Bowl", "go back to step 3"],
    ));
    assert!(code.contains("if (!b.k0[0]) { I = 4; }"));
    assert!(code.contains("case 4: I = 3; break;"));
}

#[test]
fn serves_returns_one_less_than_its_count() {
    let code = headless(&muffin(&[], &["serves 3"]));
    assert!(code.contains("case 1: return 2; break;"));
}
