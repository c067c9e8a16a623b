use forbind::{ArrayDescriptor, Registry, export_bindings};

fn dot(left: &[f64; 3], right: &[f64; 3]) -> f64 {
    left.iter().zip(right).map(|(a, b)| a * b).sum()
}

export_bindings! {
    /// Dot product of two 3-vectors.
    #[export(wrapped, generic = "dot")]
    pub fn dot3(&[f64; 3], &[f64; 3]) -> f64 = dot;
    fn twice(i64) -> i64 = |value| value * 2;
}

fn main() {
    let mut left = [1.0, 2.0, 3.0];
    let mut right = [4.0, 5.0, 6.0];
    let mut left_desc = ArrayDescriptor::describe(&mut left);
    let mut right_desc = ArrayDescriptor::describe(&mut right);

    assert_eq!(unsafe { dot3(&mut left_desc, &mut right_desc) }, 32.0);
    assert_eq!(unsafe { twice(21) }, 42);

    let registry = Registry::collect().unwrap();
    let dot = registry.get("dot3").unwrap();
    assert!(dot.is_wrapped());
    assert_eq!(dot.generic.as_deref(), Some("dot"));
    assert_eq!(dot.signature.params.len(), 2);
}
