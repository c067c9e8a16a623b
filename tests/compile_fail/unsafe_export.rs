//! Test unsafe export error.

use forbind::export;

#[export]
unsafe fn double(value: i32) -> i32 {
    value * 2
}

fn main() {}
