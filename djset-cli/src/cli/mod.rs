//! Command-line interface orchestration for djset.
//!
//! Two commands are offered: `components` labels the connected components of
//! a declared universe under a set of relations, and `maze` carves a perfect
//! maze over a rectangular grid.

mod commands;

pub use commands::{
    Cli, CliError, Command, ComponentsCommand, ComponentsInput, ComponentsSummary,
    ExecutionSummary, MazeCommand, MazeFormat, MazeSummary, parse_components_input, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
