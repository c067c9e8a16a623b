//! Test generic opaque type error.

use forbind::Opaque;

#[derive(Opaque)]
struct Wrapper<T> {
    value: T,
}

fn main() {
    let wrapper = Wrapper { value: 1 };
    let _ = wrapper.value;
}
