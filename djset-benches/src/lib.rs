//! Benchmark support crate for djset.
//!
//! Provides seeded workloads and parameter types used by the Criterion
//! benchmarks for disjoint-set merging and maze generation.

pub mod params;
pub mod workload;
