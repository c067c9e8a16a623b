//! Test export with a non-Rust ABI.

use forbind::export;

#[export]
extern "C" fn double(value: i32) -> i32 {
    value * 2
}

fn main() {}
