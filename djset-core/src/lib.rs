//! djset core library.
//!
//! Provides a disjoint-set forest with path compression and union by size,
//! together with the two clients built on it: connected-component labelling
//! from pairwise relations and perfect-maze generation by randomized Kruskal.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod components;
mod disjoint_set;
mod error;
#[cfg(feature = "maze")]
#[cfg_attr(docsrs, doc(cfg(feature = "maze")))]
mod maze;
#[cfg(test)]
mod test_utils;

pub use crate::{
    components::{Assignment, ComponentId, ComponentLabeler, ComponentLabels, label_components},
    disjoint_set::{DisjointSet, ElementHandle},
    error::{DisjointSetError, DisjointSetErrorCode, Result},
};

#[cfg(feature = "maze")]
pub use crate::{
    error::{MazeError, MazeErrorCode},
    maze::{Cell, GridEdge, Maze, RandomIndex, RandomSpanningTreeBuilder},
};
