//! Test array view marked present without a shape.

use forbind::ArrayView;

#[derive(ArrayView)]
#[forbind(acc_present)]
struct Grid;

fn main() {
    let _ = Grid;
}
