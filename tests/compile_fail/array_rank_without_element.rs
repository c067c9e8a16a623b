//! Test array view rank given without an element type.

use forbind::ArrayView;

#[derive(ArrayView)]
#[forbind(rank = 2)]
struct Grid;

fn main() {
    let _ = Grid;
}
