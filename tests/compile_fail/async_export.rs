//! Test async export error.

use forbind::export;

#[export]
async fn double(value: i32) -> i32 {
    value * 2
}

fn main() {}
