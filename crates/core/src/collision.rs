//! Collision resolver - pure placement queries against a grid
//!
//! A placement collides when any mino is left of column 0, right of the last
//! column, below the last row, or on a filled cell. Minos above the grid
//! (`y < 0`) never collide with blocks so pieces can spawn partly hidden and
//! fall in; locking a piece there is handled by the state machine as game over.

use crate::grid::Grid;
use crate::pieces::PieceShape;

/// Whether `blocks` placed at origin `(x, y)` collides with walls, floor or blocks
pub fn is_colliding(grid: &Grid, x: i8, y: i8, blocks: &PieceShape) -> bool {
    blocks.iter().any(|&(dx, dy)| {
        let px = x + dx;
        let py = y + dy;
        if px < 0 || px >= grid.width() as i8 || py >= grid.height() as i8 {
            return true;
        }
        py >= 0 && grid.is_occupied(px, py)
    })
}

/// Lowest non-colliding origin row reachable by falling straight down from `y`
///
/// Returns `y` itself when the piece cannot move down at all.
pub fn drop_position(grid: &Grid, x: i8, y: i8, blocks: &PieceShape) -> i8 {
    let mut landing = y;
    while !is_colliding(grid, x, landing + 1, blocks) {
        landing += 1;
    }
    landing
}

/// Whether any mino of the placement lies above the visible grid
pub fn is_above_grid(y: i8, blocks: &PieceShape) -> bool {
    blocks.iter().any(|&(_, dy)| y + dy < 0)
}
