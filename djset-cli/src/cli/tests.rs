//! Unit tests for the CLI commands and input parsing helpers.

use super::commands::{derive_source_name, run_components, run_maze};
use super::test_helpers::{components_cli, create_text_file, run_cli_expecting_error, temp_dir};
use super::{
    Cli, CliError, Command, ComponentsCommand, ExecutionSummary, MazeCommand, MazeFormat,
    parse_components_input, run_cli,
};
use crate::render::render_summary;

use std::io::Cursor;
use std::path::Path;

use clap::Parser;
use djset_core::{DisjointSetError, DisjointSetErrorCode};
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use djset_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const DEMO_OUTPUT: &str = "\
components: 2
John belongs to set George (size 4)
George belongs to set George (size 4)
Paul belongs to set George (size 4)
Mick belongs to set Bill (size 5)
Ringo belongs to set George (size 4)
Bill belongs to set Bill (size 5)
Brian belongs to set Bill (size 5)
Charlie belongs to set Bill (size 5)
Keith belongs to set Bill (size 5)
";

fn maze_command(width: i64, height: Option<i64>, format: MazeFormat) -> MazeCommand {
    MazeCommand {
        width,
        height,
        seed: Some(42),
        format,
    }
}

#[rstest]
#[case::stem_with_extension("/tmp/bands.txt", "bands")]
#[case::stem_without_extension("/tmp/bands", "bands")]
#[case::missing_stem("", "input")]
fn derive_source_name_selects_expected_name(#[case] raw_path: &str, #[case] expected: &str) {
    assert_eq!(derive_source_name(Path::new(raw_path)), expected);
}

#[rstest]
fn demo_renders_two_components() -> TestResult {
    let summary = run_cli(components_cli(None))?;
    let ExecutionSummary::Components(components) = &summary else {
        panic!("components command must yield a components summary");
    };
    assert_eq!(components.source, "demo");

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(String::from_utf8(buffer)?, DEMO_OUTPUT);
    Ok(())
}

#[rstest]
fn components_file_is_labelled() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(
        &dir,
        "letters.txt",
        "# four letters\nA\nB\n\nC\nD\nA B\nC D\n",
    )?;
    let summary = run_components(ComponentsCommand { path: Some(path) })?;
    assert_eq!(summary.source, "letters");
    assert_eq!(summary.labels.component_count(), 2);
    assert_eq!(
        summary.labels.groups(),
        vec![
            vec![&"A".to_owned(), &"B".to_owned()],
            vec![&"C".to_owned(), &"D".to_owned()],
        ]
    );
    Ok(())
}

#[rstest]
fn relations_may_precede_declarations() -> TestResult {
    let input = parse_components_input("mixed", Cursor::new("x y\nx\n  y  \n"))?;
    assert_eq!(input.universe, vec!["x".to_owned(), "y".to_owned()]);
    assert_eq!(input.relations, vec![("x".to_owned(), "y".to_owned())]);
    Ok(())
}

#[rstest]
fn malformed_line_reports_its_position() {
    let err = parse_components_input("bad", Cursor::new("a\nb\n# skip me\na b c\n"))
        .expect_err("three tokens must be rejected");
    match err {
        CliError::MalformedLine {
            source_name,
            line,
            tokens,
        } => {
            assert_eq!(source_name, "bad");
            assert_eq!(line, 4);
            assert_eq!(tokens, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::unknown_element("a\nb\na c\n", DisjointSetErrorCode::UnknownElement)]
#[case::duplicate_element("a\nb\na\n", DisjointSetErrorCode::DuplicateElement)]
fn invalid_universe_surfaces_core_code(
    #[case] contents: &str,
    #[case] expected: DisjointSetErrorCode,
) -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "broken.txt", contents)?;
    let err = run_cli_expecting_error(components_cli(Some(path)), "invalid input must fail");
    assert!(matches!(err, CliError::DisjointSet(_)));
    assert_eq!(err.code(), Some(expected.as_str()));
    Ok(())
}

#[rstest]
fn unknown_element_names_the_element() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "stray.txt", "a\na zed\n")?;
    let err = run_cli_expecting_error(components_cli(Some(path)), "stray element must fail");
    match err {
        CliError::DisjointSet(DisjointSetError::UnknownElement { element }) => {
            assert_eq!(&*element, "\"zed\"");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn missing_file_is_an_io_error() {
    let dir = temp_dir();
    let err = run_cli_expecting_error(
        components_cli(Some(dir.path().join("missing.txt"))),
        "missing file must fail",
    );
    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.code(), None);
}

#[rstest]
#[case::zero_width(0, None)]
#[case::negative_width(-3, None)]
#[case::negative_height(4, Some(-1))]
fn degenerate_maze_dimensions_yield_an_empty_maze(
    #[case] width: i64,
    #[case] height: Option<i64>,
) -> TestResult {
    let summary = run_maze(&maze_command(width, height, MazeFormat::Edges))?;
    assert!(summary.maze.is_empty());
    assert!(summary.maze.walls().is_empty());
    assert!(summary.maze.passages().is_empty());
    Ok(())
}

#[rstest]
fn maze_height_defaults_to_width() -> TestResult {
    let summary = run_maze(&maze_command(5, None, MazeFormat::Tikz))?;
    assert_eq!(summary.maze.width(), 5);
    assert_eq!(summary.maze.height(), 5);
    assert_eq!(summary.maze.passages().len(), 24);
    assert_eq!(summary.seed, 42);
    Ok(())
}

#[rstest]
fn seeded_mazes_render_identically() -> TestResult {
    let render = || -> Result<String, Box<dyn std::error::Error>> {
        let summary = run_cli(Cli {
            command: Command::Maze(maze_command(6, Some(4), MazeFormat::Edges)),
        })?;
        let mut buffer = Vec::new();
        render_summary(&summary, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    };
    let first = render()?;
    assert_eq!(first, render()?);
    // 6x4 grid: 38 candidates, 23 passages.
    assert_eq!(first.lines().count(), 15);
    Ok(())
}

#[rstest]
fn tikz_is_the_default_format() -> TestResult {
    let cli = Cli::try_parse_from(["djset", "maze", "--seed", "1"])?;
    let summary = run_cli(cli)?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.starts_with("\\begin{tikzpicture}"));
    assert!(text.contains("\\draw[thick](0,7) -- (7,7);"));
    Ok(())
}

#[rstest]
fn clap_parses_maze_arguments() -> TestResult {
    let cli = Cli::try_parse_from(["djset", "maze", "-4", "3", "--seed", "9", "--format", "edges"])?;
    let Command::Maze(command) = cli.command else {
        panic!("maze subcommand expected");
    };
    assert_eq!(command.width, -4);
    assert_eq!(command.height, Some(3));
    assert_eq!(command.seed, Some(9));
    assert_eq!(command.format, MazeFormat::Edges);
    Ok(())
}

#[rstest]
fn clap_defaults_maze_width_to_seven() -> TestResult {
    let cli = Cli::try_parse_from(["djset", "maze"])?;
    let Command::Maze(command) = cli.command else {
        panic!("maze subcommand expected");
    };
    assert_eq!(command.width, 7);
    assert_eq!(command.height, None);
    assert_eq!(command.seed, None);
    assert_eq!(command.format, MazeFormat::Tikz);
    Ok(())
}

#[rstest]
#[case::unknown_format(&["djset", "maze", "--format", "svg"])]
#[case::non_numeric_width(&["djset", "maze", "wide"])]
#[case::extra_components_path(&["djset", "components", "a.txt", "b.txt"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn components_command_emits_tracing_fields() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "pairs.txt", "a\nb\nc\na b\n")?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let summary = tracing::subscriber::with_default(subscriber, || {
        run_cli(components_cli(Some(path)))
    })?;
    assert!(matches!(summary, ExecutionSummary::Components(_)));

    let run = layer.span_named("cli.run").expect("cli.run span must exist");
    assert_eq!(run.fields.get("command"), Some(&"components".to_owned()));

    let components = layer
        .span_named("cli.components")
        .expect("cli.components span must exist");
    assert_eq!(components.fields.get("source"), Some(&"pairs".to_owned()));
    assert_eq!(components.fields.get("elements"), Some(&"3".to_owned()));
    assert_eq!(components.fields.get("relations"), Some(&"1".to_owned()));

    let reader = layer
        .span_named("cli.open_reader")
        .expect("cli.open_reader span must exist");
    assert!(
        reader
            .fields
            .get("path")
            .is_some_and(|value| value.ends_with("pairs.txt"))
    );

    assert!(layer.events_at(Level::INFO).iter().any(|event| {
        event
            .fields
            .get("message")
            .is_some_and(|value| value == "components command completed")
            && event.fields.get("components") == Some(&"2".to_owned())
    }));
    Ok(())
}

#[rstest]
fn maze_command_records_resolved_height_and_seed() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        run_maze(&maze_command(3, None, MazeFormat::Edges))
    })?;

    let span = layer.span_named("cli.maze").expect("cli.maze span must exist");
    assert_eq!(span.fields.get("width"), Some(&"3".to_owned()));
    assert_eq!(span.fields.get("height"), Some(&"3".to_owned()));
    assert_eq!(span.fields.get("seed"), Some(&"42".to_owned()));
    assert!(layer.span_named("core.build_maze").is_some());
    Ok(())
}

#[rstest]
fn open_reader_records_path_on_error() {
    let dir = temp_dir();
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let err = tracing::subscriber::with_default(subscriber, || {
        run_components(ComponentsCommand {
            path: Some(dir.path().join("missing.txt")),
        })
    })
    .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));

    let reader = layer
        .span_named("cli.open_reader")
        .expect("reader span must exist");
    assert!(
        reader
            .fields
            .get("path")
            .is_some_and(|value| value.ends_with("missing.txt"))
    );
    assert!(!layer.events_at(Level::ERROR).is_empty());
}
