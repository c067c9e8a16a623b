//! Test unknown forbind attribute error.

use forbind::Opaque;

#[derive(Opaque)]
#[forbind(weak)]
struct Stack;

fn main() {
    let _ = Stack;
}
