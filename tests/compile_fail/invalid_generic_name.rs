//! Test generic name that is not a Fortran identifier.

use forbind::export;

#[export(generic = "scale real")]
fn scale_f64(value: f64) -> f64 {
    value * 2.0
}

fn main() {}
