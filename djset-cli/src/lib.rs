//! Support library for the djset CLI binary.
//!
//! Re-exports the CLI, logging, and rendering modules so doctests and
//! integration tests can exercise the commands without forking a subprocess.

pub mod cli;
pub mod logging;
pub mod render;
