//! Macro expansion tests.
//!
//! Each case under `tests/ui` is compiled and run as its own binary, so the
//! exports it declares are the only ones it can see.

#[test]
fn macro_pass_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/*.rs");
}
