//! Test export name that is not a C identifier.

use forbind::export;

#[export(name = "2fast")]
fn double(value: i32) -> i32 {
    value * 2
}

fn main() {}
