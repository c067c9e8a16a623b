//! Compile-fail tests for macro error paths.
//!
//! Each case checks the diagnostic a misused macro reports against the
//! `.stderr` file next to it.

#[test]
fn macro_compile_fail_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/compile_fail/*.rs");
}
