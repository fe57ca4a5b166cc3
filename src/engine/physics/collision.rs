// Tile collision resolution
//
// Discrete least-penetration correction of an axis-aligned box against the
// solid cells of a grid. This is a position correction, not a swept test:
// a box moving more than a cell per tick can tunnel through thin geometry.

use glam::Vec2;

use crate::core::Rect;
use crate::engine::grid::Grid;

/// Which sides of the actor touched solid geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSides {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionSides {
    pub const NONE: Self = Self {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };

    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }

    /// Keep only the left/right flags
    pub fn horizontal(self) -> Self {
        Self {
            left: self.left,
            right: self.right,
            ..Self::NONE
        }
    }

    /// Keep only the top/bottom flags
    pub fn vertical(self) -> Self {
        Self {
            top: self.top,
            bottom: self.bottom,
            ..Self::NONE
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            top: self.top || other.top,
            bottom: self.bottom || other.bottom,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }
}

/// Outcome of one resolution call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub collided: bool,
    pub sides: CollisionSides,
    /// Corrected top-left position; equals the desired position when nothing collided
    pub snap: Vec2,
}

impl CollisionResult {
    fn clear(desired: Vec2) -> Self {
        Self {
            collided: false,
            sides: CollisionSides::NONE,
            snap: desired,
        }
    }
}

/// How stacked solid cells are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeamPolicy {
    /// Every solid cell is its own box
    PerCell,
    /// Vertically adjacent solid cells in a column form one tall box, so a
    /// body sliding along a wall does not catch on the seams between tiles.
    /// Horizontal neighbours are never merged.
    #[default]
    MergeVertical,
}

/// Edge along which the actor is pushed out, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Penetration {
    /// Actor's right edge is inside the cell's left edge
    FromLeft,
    /// Actor's left edge is inside the cell's right edge
    FromRight,
    /// Actor's bottom edge is inside the cell's top edge
    FromTop,
    /// Actor's top edge is inside the cell's bottom edge
    FromBottom,
}

/// Pushes a box out of the grid's solid cells
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver {
    policy: SeamPolicy,
}

impl CollisionResolver {
    pub fn new(policy: SeamPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SeamPolicy {
        self.policy
    }

    /// Resolve `body` (the box at its desired position) against `grid`.
    ///
    /// Cells are visited row by row, left to right. Each overlapping solid
    /// region corrects exactly one axis; a later region overwrites the snap
    /// coordinate and side flags of the axis it corrects.
    pub fn resolve(&self, grid: &Grid, body: Rect) -> CollisionResult {
        let mut result = CollisionResult::clear(body.origin);

        let finite = body.origin.is_finite() && body.size.is_finite();
        if !finite || grid.width() == 0 || grid.height() == 0 {
            return result;
        }

        let cell_size = grid.cell_size();
        let cell_of = |coordinate: f32| (coordinate / cell_size).floor() as i64;

        // The -1 keeps a box that is exactly flush with a cell boundary out of the next cell
        let left = cell_of(body.left());
        let right = cell_of(body.right() - 1.0).max(left);
        let top = cell_of(body.top());
        let bottom = cell_of(body.bottom() - 1.0).max(top);

        let left = left.max(0);
        let right = right.min(grid.width() as i64 - 1);
        let top = top.max(0);
        let bottom = bottom.min(grid.height() as i64 - 1);

        for row in top..=bottom {
            for column in left..=right {
                if !grid.is_solid(row, column) {
                    continue;
                }

                let region = self.solid_region(grid, row, column);
                if !body.intersects(&region) {
                    continue;
                }

                result.collided = true;
                match least_penetration(&body, &region) {
                    Penetration::FromLeft => {
                        result.sides.right = true;
                        result.sides.left = false;
                        result.snap.x = region.left() - body.size.x;
                    }
                    Penetration::FromRight => {
                        result.sides.left = true;
                        result.sides.right = false;
                        result.snap.x = region.right();
                    }
                    Penetration::FromTop => {
                        result.sides.bottom = true;
                        result.sides.top = false;
                        result.snap.y = region.top() - body.size.y;
                    }
                    Penetration::FromBottom => {
                        result.sides.top = true;
                        result.sides.bottom = false;
                        result.snap.y = region.bottom();
                    }
                }
            }
        }

        result
    }

    /// Whether `body` is standing on solid ground, probed one unit below it
    pub fn is_supported(&self, grid: &Grid, body: Rect) -> bool {
        let probe = Rect::from_origin_size(body.origin + Vec2::new(0.0, 1.0), body.size);
        let result = self.resolve(grid, probe);
        result.collided && result.sides.bottom
    }

    fn solid_region(&self, grid: &Grid, row: i64, column: i64) -> Rect {
        match self.policy {
            SeamPolicy::PerCell => grid.cell_rect(row, column),
            SeamPolicy::MergeVertical => {
                let mut first = row;
                while grid.is_solid(first - 1, column) {
                    first -= 1;
                }
                let mut last = row;
                while grid.is_solid(last + 1, column) {
                    last += 1;
                }

                let cell_size = grid.cell_size();
                let top = grid.cell_rect(first, column);
                Rect::new(
                    top.left(),
                    top.top(),
                    cell_size,
                    (last - first + 1) as f32 * cell_size,
                )
            }
        }
    }
}

/// Smallest of the four overlap depths; ties go left, right, top, bottom
fn least_penetration(body: &Rect, cell: &Rect) -> Penetration {
    let candidates = [
        (Penetration::FromLeft, body.right() - cell.left()),
        (Penetration::FromRight, cell.right() - body.left()),
        (Penetration::FromTop, body.bottom() - cell.top()),
        (Penetration::FromBottom, cell.bottom() - body.top()),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}
