//! Cells and adjacency edges of a rectangular grid.

use std::{collections::TryReserveError, fmt};

/// A grid cell identified by its column `x` and row `y`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Cell {
    x: usize,
    y: usize,
}

impl Cell {
    /// Creates the cell at column `x`, row `y`.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Column of the cell.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(&self) -> usize { self.x }

    /// Row of the cell.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(&self) -> usize { self.y }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// An interior wall between two adjacent cells.
///
/// `first` is always the upper-left cell; `second` is its right neighbour or
/// its neighbour below.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GridEdge {
    first: Cell,
    second: Cell,
}

impl GridEdge {
    /// Returns the upper-left endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn first(&self) -> Cell { self.first }

    /// Returns the endpoint to the right of or below [`Self::first`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn second(&self) -> Cell { self.second }

    /// Returns `true` when the endpoints share a row, i.e. the wall between
    /// them is vertical.
    #[must_use]
    pub const fn joins_row(&self) -> bool {
        self.first.y == self.second.y
    }
}

impl fmt::Display for GridEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// Cells of a `width × height` grid in row-major order.
pub(super) fn cells(width: usize, height: usize) -> impl Iterator<Item = Cell> {
    (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
}

/// Number of adjacencies in a `width × height` grid, `2wh - w - h`, or `None`
/// when it does not fit in `usize`.
pub(super) fn edge_count(width: usize, height: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    width
        .checked_mul(height)?
        .checked_mul(2)?
        .checked_sub(width)?
        .checked_sub(height)
}

/// Every adjacency of the grid, emitting each cell's right edge before its
/// down edge.
///
/// `edge_count` must come from [`edge_count`]. Storage is reserved fallibly so an unaddressable
/// grid surfaces as an error rather than an abort.
pub(super) fn candidate_edges(
    width: usize,
    height: usize,
    edge_count: usize,
) -> Result<Vec<GridEdge>, TryReserveError> {
    let mut edges = Vec::new();
    edges.try_reserve_exact(edge_count)?;
    for cell in cells(width, height) {
        if cell.x + 1 < width {
            edges.push(GridEdge {
                first: cell,
                second: Cell::new(cell.x + 1, cell.y),
            });
        }
        if cell.y + 1 < height {
            edges.push(GridEdge {
                first: cell,
                second: Cell::new(cell.x, cell.y + 1),
            });
        }
    }
    Ok(edges)
}
