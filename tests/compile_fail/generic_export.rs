//! Test generic export error.

use forbind::export;

#[export]
fn first<T: Copy>(value: T) -> T {
    value
}

fn main() {}
