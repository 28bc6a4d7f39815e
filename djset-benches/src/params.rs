//! Benchmark parameter types.

use std::fmt;

/// Parameters for a disjoint-set merge benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct MergeBenchParams {
    /// Number of registered elements.
    pub element_count: usize,
    /// Number of random relations applied.
    pub relation_count: usize,
}

impl fmt::Display for MergeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},r={}", self.element_count, self.relation_count)
    }
}

/// Parameters for a maze generation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct MazeBenchParams {
    /// Grid width and height in cells.
    pub side: i64,
}

impl fmt::Display for MazeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{side}x{side}", side = self.side)
    }
}
