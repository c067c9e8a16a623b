use forbind::{Registry, export, last_error};

#[export(name = "checked_div")]
fn divide(numerator: i32, denominator: &i32) -> i32 {
    numerator / *denominator
}

fn main() {
    let denominator = 4;
    assert_eq!(divide(12, &denominator), 3);

    let quotient = unsafe { __forbind_export_divide(12, &denominator) };
    assert_eq!(quotient, 3);

    assert_eq!(unsafe { __forbind_export_divide(12, std::ptr::null()) }, 0);
    assert_eq!(last_error().as_deref(), Some("checked_div: null pointer passed for `i32`"));

    let registry = Registry::collect().unwrap();
    assert!(registry.contains("checked_div"));
    assert!(!registry.contains("divide"));
}
