//! Test generic name equal to the export name.

use forbind::export;

#[export(generic = "scale")]
fn scale(value: f64) -> f64 {
    value * 2.0
}

fn main() {}
