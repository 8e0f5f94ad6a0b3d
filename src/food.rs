use crate::config::GridSize;
use crate::random::RandomSource;
use crate::snake::Point;

/// The single food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Point,
}

impl Food {
    /// Creates a food at `position`.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self { position }
    }

    /// Places food on a uniformly random cell of the grid.
    ///
    /// Snake cells are not excluded; food may land under the body.
    #[must_use]
    pub fn spawn<R: RandomSource + ?Sized>(rng: &mut R, bounds: GridSize) -> Self {
        Self::at(Point {
            x: rng.int_below(i32::from(bounds.width)),
            y: rng.int_below(i32::from(bounds.height)),
        })
    }
}
