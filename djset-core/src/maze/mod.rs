//! Perfect maze generation via randomized Kruskal over a grid graph.
//!
//! Every pair of horizontally or vertically adjacent cells starts separated
//! by a wall. Walls are drawn from the candidate pool in uniformly random
//! order and knocked down whenever the cells on either side are not yet
//! connected. Once `cells - 1` walls have fallen the passages form a spanning
//! tree: every cell is reachable from every other along exactly one path.

mod grid;

use rand::Rng;
use tracing::{Span, debug, field, instrument};

use crate::{disjoint_set::DisjointSet, error::MazeError};

pub use self::grid::{Cell, GridEdge};

/// Source of uniformly distributed indices.
///
/// Injected into [`RandomSpanningTreeBuilder::build`] so callers decide how
/// randomness is seeded. Every [`rand::Rng`] implements it.
pub trait RandomIndex {
    /// Returns an index drawn uniformly from `0..bound`.
    ///
    /// Callers never pass `bound == 0`.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomIndex for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// A generated maze: the walls that remain and the passages knocked through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    walls: Vec<GridEdge>,
    passages: Vec<GridEdge>,
}

impl Maze {
    /// Width of the grid in cells.
    #[must_use]
    #[rustfmt::skip]
    pub fn width(&self) -> usize { self.width }

    /// Height of the grid in cells.
    #[must_use]
    #[rustfmt::skip]
    pub fn height(&self) -> usize { self.height }

    /// Number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Interior walls left standing, in candidate (row-major) order.
    #[must_use]
    #[rustfmt::skip]
    pub fn walls(&self) -> &[GridEdge] { &self.walls }

    /// Walls that were knocked down, in the order they fell.
    #[must_use]
    #[rustfmt::skip]
    pub fn passages(&self) -> &[GridEdge] { &self.passages }

    /// Number of interior walls the grid started with.
    #[must_use]
    pub fn candidate_edge_count(&self) -> usize {
        self.walls.len().saturating_add(self.passages.len())
    }

    /// Returns `true` when the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }
}

/// Configures and generates mazes over a `width × height` grid.
///
/// Non-positive dimensions describe an empty grid and produce an empty maze.
///
/// # Examples
/// ```
/// use djset_core::RandomSpanningTreeBuilder;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let maze = RandomSpanningTreeBuilder::new(7, 7)
///     .build(&mut rng)
///     .expect("7x7 grid is valid");
/// assert_eq!(maze.candidate_edge_count(), 84);
/// assert_eq!(maze.passages().len(), 48);
/// assert_eq!(maze.walls().len(), 36);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomSpanningTreeBuilder {
    width: i64,
    height: i64,
}

impl RandomSpanningTreeBuilder {
    /// Creates a builder for a `width × height` grid.
    #[must_use]
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Returns the requested width.
    #[must_use]
    #[rustfmt::skip]
    pub const fn width(&self) -> i64 { self.width }

    /// Returns the requested height.
    #[must_use]
    #[rustfmt::skip]
    pub const fn height(&self) -> i64 { self.height }

    /// Generates a maze using `rng` to order the candidate walls.
    ///
    /// # Errors
    /// Returns [`MazeError::GridTooLarge`] when the cell or wall count
    /// overflows `usize` or the grid's storage cannot be allocated. The
    /// remaining variants indicate internal logic errors.
    #[instrument(
        name = "core.build_maze",
        err,
        skip(self, rng),
        fields(width = self.width, height = self.height, passages = field::Empty),
    )]
    pub fn build<R>(&self, rng: &mut R) -> Result<Maze, MazeError>
    where
        R: RandomIndex + ?Sized,
    {
        let (width, height, edge_count) = self.dimensions()?;
        let cell_count = width.saturating_mul(height);
        let edges =
            grid::candidate_edges(width, height, edge_count).map_err(|_| self.too_large())?;

        let mut set = DisjointSet::try_with_capacity(cell_count).map_err(|_| self.too_large())?;
        for cell in grid::cells(width, height) {
            set.make_set(cell)?;
        }

        let mut pool: Vec<usize> = self.reserve(edges.len())?;
        pool.extend(0..edges.len());
        let mut knocked: Vec<bool> = self.reserve(edges.len())?;
        knocked.resize(edges.len(), false);
        let mut passages = self.reserve(cell_count.saturating_sub(1))?;
        let mut remaining = cell_count.saturating_sub(1);

        while remaining > 0 {
            if pool.is_empty() {
                return Err(MazeError::CandidatesExhausted { remaining });
            }
            let drawn = pool.swap_remove(rng.next_index(pool.len()));
            let Some(edge) = edges.get(drawn) else {
                continue;
            };
            let first = set.find(&edge.first())?;
            let second = set.find(&edge.second())?;
            if first == second {
                continue;
            }
            set.union(first, second)?;
            if let Some(flag) = knocked.get_mut(drawn) {
                *flag = true;
            }
            passages.push(*edge);
            remaining -= 1;
        }

        let walls: Vec<GridEdge> = edges
            .iter()
            .zip(&knocked)
            .filter(|(_, knocked)| !**knocked)
            .map(|(edge, _)| *edge)
            .collect();

        Span::current().record("passages", passages.len());
        debug!(
            cells = cell_count,
            walls = walls.len(),
            untouched = pool.len(),
            "maze generation completed"
        );
        Ok(Maze {
            width,
            height,
            walls,
            passages,
        })
    }

    /// Resolves the grid to `(width, height, edge_count)`, clamping
    /// non-positive dimensions to an empty grid.
    fn dimensions(&self) -> Result<(usize, usize, usize), MazeError> {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        if width == 0 || height == 0 {
            return Ok((0, 0, 0));
        }
        width.checked_mul(height).ok_or_else(|| self.too_large())?;
        let edge_count = grid::edge_count(width, height).ok_or_else(|| self.too_large())?;
        Ok((width, height, edge_count))
    }

    fn reserve<T>(&self, capacity: usize) -> Result<Vec<T>, MazeError> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| self.too_large())?;
        Ok(storage)
    }

    const fn too_large(&self) -> MazeError {
        MazeError::GridTooLarge {
            width: self.width,
            height: self.height,
        }
    }
}
