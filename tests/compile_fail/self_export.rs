//! Test export that takes `self`.

use forbind::export;

struct Counter;

impl Counter {
    #[export]
    fn get(&self) -> i32 {
        0
    }
}

fn main() {
    let _ = Counter;
}
