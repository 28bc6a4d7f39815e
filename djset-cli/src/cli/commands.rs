//! Command implementations and argument parsing for the djset CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use djset_core::{
    ComponentLabels, DisjointSetError, Maze, MazeError, RandomSpanningTreeBuilder,
    label_components,
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_MAZE_WIDTH: i64 = 7;

const DEMO_SOURCE_NAME: &str = "demo";

const DEMO_UNIVERSE: [&str; 9] = [
    "John", "George", "Paul", "Mick", "Ringo", "Bill", "Brian", "Charlie", "Keith",
];

const DEMO_RELATIONS: [(&str, &str); 7] = [
    ("John", "George"),
    ("Paul", "Ringo"),
    ("Ringo", "George"),
    ("Charlie", "Bill"),
    ("Keith", "Mick"),
    ("Brian", "Bill"),
    ("Charlie", "Keith"),
];

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "djset",
    about = "Label connected components or carve perfect mazes with a disjoint-set forest."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Partition declared elements into connected components.
    Components(ComponentsCommand),
    /// Generate a perfect maze with randomized Kruskal.
    Maze(MazeCommand),
}

/// Options accepted by the `components` command.
#[derive(Debug, Args, Clone)]
pub struct ComponentsCommand {
    /// Text file of element declarations (one token per line) and relations
    /// (two tokens per line). Runs the built-in demo when omitted.
    pub path: Option<PathBuf>,
}

/// Options accepted by the `maze` command.
#[derive(Debug, Args, Clone)]
pub struct MazeCommand {
    /// Maze width in cells. Non-positive values produce an empty maze.
    #[arg(default_value_t = DEFAULT_MAZE_WIDTH, allow_negative_numbers = true)]
    pub width: i64,

    /// Maze height in cells (defaults to the width).
    #[arg(allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Seed for the random wall order. A fresh seed is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = MazeFormat::Tikz)]
    pub format: MazeFormat,
}

/// Supported maze output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MazeFormat {
    /// A TikZ `tikzpicture` drawing the border and every remaining wall.
    Tikz,
    /// One `x1,y1 x2,y2` line per remaining wall.
    Edges,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading an input source.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input line was neither a declaration nor a relation.
    #[error("line {line} of `{source_name}` has {tokens} tokens; expected 1 or 2")]
    MalformedLine {
        /// Name of the input being parsed.
        source_name: String,
        /// 1-based line number.
        line: usize,
        /// Number of whitespace-separated tokens found.
        tokens: usize,
    },
    /// Component labelling failed.
    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
    /// Maze generation failed.
    #[error(transparent)]
    Maze(#[from] MazeError),
}

impl CliError {
    /// Stable code of the underlying core error, when there is one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::DisjointSet(error) => Some(error.code().as_str()),
            Self::Maze(error) => Some(error.code().as_str()),
            Self::Io { .. } | Self::MalformedLine { .. } => None,
        }
    }
}

/// Element declarations and relations read from a `components` input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentsInput {
    /// Declared elements in declaration order.
    pub universe: Vec<String>,
    /// Relations in input order.
    pub relations: Vec<(String, String)>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Result of the `components` command.
    Components(ComponentsSummary),
    /// Result of the `maze` command.
    Maze(MazeSummary),
}

/// Labels produced by the `components` command.
#[derive(Debug, Clone)]
pub struct ComponentsSummary {
    /// Name of the input (file stem, or `demo`).
    pub source: String,
    /// Component assignment for every declared element.
    pub labels: ComponentLabels<String>,
}

/// Maze produced by the `maze` command.
#[derive(Debug, Clone)]
pub struct MazeSummary {
    /// Seed that reproduces this maze.
    pub seed: u64,
    /// Requested output format.
    pub format: MazeFormat,
    /// The generated maze.
    pub maze: Maze,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading input or running the core fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use djset_cli::cli::{Cli, Command, ExecutionSummary, MazeCommand, MazeFormat, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Maze(MazeCommand {
///         width: 4,
///         height: Some(3),
///         seed: Some(9),
///         format: MazeFormat::Edges,
///     }),
/// };
/// let ExecutionSummary::Maze(summary) = run_cli(cli)? else {
///     unreachable!("maze command yields a maze summary");
/// };
/// assert_eq!(summary.maze.passages().len(), 11);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Components(command) => {
            span.record("command", field::display("components"));
            run_components(command).map(ExecutionSummary::Components)
        }
        Command::Maze(command) => {
            span.record("command", field::display("maze"));
            Ok(ExecutionSummary::Maze(run_maze(&command)?))
        }
    }
}

#[instrument(
    name = "cli.components",
    err,
    skip(command),
    fields(source = field::Empty, elements = field::Empty, relations = field::Empty),
)]
pub(super) fn run_components(command: ComponentsCommand) -> Result<ComponentsSummary, CliError> {
    let (source, input) = match command.path {
        Some(path) => {
            let source = derive_source_name(&path);
            let reader = open_reader(&path)?;
            let input = parse_components_input(&source, reader)?;
            (source, input)
        }
        None => (DEMO_SOURCE_NAME.to_owned(), demo_input()),
    };

    let span = Span::current();
    span.record("source", field::display(&source));
    span.record("elements", field::display(input.universe.len()));
    span.record("relations", field::display(input.relations.len()));

    let labels = label_components(input.universe, input.relations)?;
    info!(
        source = source.as_str(),
        components = labels.component_count(),
        "components command completed"
    );
    Ok(ComponentsSummary { source, labels })
}

#[instrument(
    name = "cli.maze",
    err,
    skip(command),
    fields(width = command.width, height = field::Empty, seed = field::Empty),
)]
pub(super) fn run_maze(command: &MazeCommand) -> Result<MazeSummary, CliError> {
    let height = command.height.unwrap_or(command.width);
    let seed = command.seed.unwrap_or_else(rand::random);

    let span = Span::current();
    span.record("height", height);
    span.record("seed", seed);

    let mut rng = SmallRng::seed_from_u64(seed);
    let maze = RandomSpanningTreeBuilder::new(command.width, height).build(&mut rng)?;
    info!(
        seed,
        cells = maze.cell_count(),
        walls = maze.walls().len(),
        "maze command completed"
    );
    Ok(MazeSummary {
        seed,
        format: command.format,
        maze,
    })
}

/// Parses declarations and relations from `reader`.
///
/// Blank lines and lines starting with `#` are ignored. A line holding one
/// token declares an element; a line holding two tokens relates them.
///
/// # Errors
/// Returns [`CliError::Io`] if reading fails and
/// [`CliError::MalformedLine`] for lines with more than two tokens.
pub fn parse_components_input(
    source_name: &str,
    reader: impl BufRead,
) -> Result<ComponentsInput, CliError> {
    let mut input = ComponentsInput::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: PathBuf::from(source_name),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match tokens.as_slice() {
            [element] => input.universe.push((*element).to_owned()),
            [left, right] => input
                .relations
                .push(((*left).to_owned(), (*right).to_owned())),
            _ => {
                return Err(CliError::MalformedLine {
                    source_name: source_name.to_owned(),
                    line: index.saturating_add(1),
                    tokens: tokens.len(),
                });
            }
        }
    }
    Ok(input)
}

fn demo_input() -> ComponentsInput {
    ComponentsInput {
        universe: DEMO_UNIVERSE.iter().map(|&name| name.to_owned()).collect(),
        relations: DEMO_RELATIONS
            .iter()
            .map(|&(left, right)| (left.to_owned(), right.to_owned()))
            .collect(),
    }
}

#[instrument(name = "cli.open_reader", err, fields(path = field::Empty))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "input".to_owned(), ToOwned::to_owned)
}
