//! Test unknown export attribute error.

use forbind::export;

#[export(bogus)]
fn double(value: i32) -> i32 {
    value * 2
}

fn main() {}
