use forbind::{ForeignParam, ForeignReturn, ForeignType, Opaque, handle};

#[derive(Clone, Opaque)]
#[forbind(name = "Particle", clone)]
struct Body {
    mass: f64,
}

fn main() {
    assert_eq!(Body::NAME, "Particle");
    assert_eq!(<&Body as ForeignParam>::FOREIGN, ForeignType::Handle);
    assert_eq!(<&mut Body as ForeignParam>::FOREIGN, ForeignType::Handle);
    assert_eq!(<Body as ForeignParam>::FOREIGN, ForeignType::Handle);
    assert_eq!(<Body as ForeignReturn>::FOREIGN, ForeignType::Handle);

    let cell = Body { mass: 2.0 }.into_foreign();
    unsafe {
        let copy = <Body as ForeignParam>::from_foreign(cell).unwrap();
        assert_eq!(copy.mass, 2.0);
        handle::release(cell);
    }
}
