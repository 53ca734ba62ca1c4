use muffin::codegen::{Features, HeadlessTarget, Target};

use crate::support::{HELLO_WORLD, headless, muffin};

#[test]
fn programs_without_input_stay_synchronous() {
    let code = headless(HELLO_WORLD);
    assert!(!code.contains("async"));
    assert!(!code.contains("await"));
    assert!(!code.contains("readline"));
    assert!(code.contains("process.exit(f0());"));
    assert!(code.contains("console.log(m.k0[0][m.k0[0].length - 1]);"));
    assert!(code.ends_with("}\n"));
}

#[test]
fn reading_programs_get_the_line_reader() {
    let code = headless(&muffin(
        &[],
        &["set up a Bowl", "place Bowl in the oven and bake at 230C"],
    ));
    assert!(code.starts_with("const rl = require(\"node:readline\")"));
    assert!(code.contains("(async () => {\nconst m = {};\n"));
    assert!(code.contains("async function f0() {"));
    assert!(code.contains("t = await readLine();"));
    assert!(code.contains("process.exit(await f0());"));
    assert!(code.contains("} finally { rl.close(); }"));
    assert!(code.ends_with("})();\n"));
}

#[test]
fn fault_boundary_reports_through_console_error() {
    let code = headless(HELLO_WORLD);
    assert!(code.contains("} catch (e) {"));
    assert!(code.contains("if (e instanceof Array) { console.error(\"Muffin error: \" + `in recipe"));
    assert!(code.contains("else { console.error(`Unexpected error: ${e}`); process.exitCode = 1; }"));
}

#[test]
fn hooks_depend_on_features() {
    let target = HeadlessTarget;
    let reading = Features { reads_input: true };
    assert!(target.asynchronous(&reading));
    assert!(!target.asynchronous(&Features::default()));
    assert_eq!(target.teardown(&reading), "rl.close();");
    assert_eq!(target.teardown(&Features::default()), "");
    assert_eq!(target.at_last("x".to_string(), &Features::default()), "x");
    assert_eq!(target.loop_epilog(), "");
}
