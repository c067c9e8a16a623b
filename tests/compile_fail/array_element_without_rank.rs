//! Test array view element given without a rank.

use forbind::ArrayView;

#[derive(ArrayView)]
#[forbind(element = f64)]
struct Grid;

fn main() {
    let _ = Grid;
}
