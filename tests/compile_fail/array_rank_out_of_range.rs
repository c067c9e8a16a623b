//! Test array view rank above the descriptor limit.

use forbind::ArrayView;

#[derive(ArrayView)]
#[forbind(element = f64, rank = 8)]
struct Grid;

fn main() {
    let _ = Grid;
}
