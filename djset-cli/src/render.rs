//! Text renderers for command results.
//!
//! The maze renderers consume only the maze dimensions and its list of
//! remaining walls.

use std::io::{self, Write};

use djset_core::{ComponentLabels, Maze};

use crate::cli::{ExecutionSummary, MazeFormat};

/// Writes a human-readable rendering of `summary` to `writer`.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn render_summary(summary: &ExecutionSummary, writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Components(components) => render_components(&components.labels, writer),
        ExecutionSummary::Maze(maze) => match maze.format {
            MazeFormat::Tikz => render_tikz(&maze.maze, writer),
            MazeFormat::Edges => render_edge_list(&maze.maze, writer),
        },
    }
}

/// Writes one `<element> belongs to set <representative> (size <n>)` line per
/// element, preceded by a component count header.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use djset_cli::render::render_components;
/// # use djset_core::label_components;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let labels = label_components(["a", "b"], [("a", "b")])?;
/// let mut buffer = Vec::new();
/// render_components(&labels, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "components: 1\na belongs to set b (size 2)\nb belongs to set b (size 2)\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_components<T: std::fmt::Display>(
    labels: &ComponentLabels<T>,
    mut writer: impl Write,
) -> io::Result<()> {
    writeln!(writer, "components: {}", labels.component_count())?;
    for assignment in labels.assignments() {
        writeln!(
            writer,
            "{} belongs to set {} (size {})",
            assignment.element(),
            assignment.representative(),
            assignment.component_size()
        )?;
    }
    Ok(())
}

/// Writes `maze` as a TikZ picture with one unit per cell.
///
/// The outer border leaves two gaps: the left side is open beside row
/// `height - 1` and the right side is open beside row 0.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn render_tikz(maze: &Maze, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "\\begin{{tikzpicture}}[>=latex]")?;
    if !maze.is_empty() {
        let (width, height) = (maze.width(), maze.height());
        writeln!(writer, "  \\draw[thick](0,0) -- ({width},0);")?;
        writeln!(writer, "  \\draw[thick](0,{height}) -- ({width},{height});")?;
        writeln!(writer, "  \\draw[thick](0,0) -- (0,{});", height.saturating_sub(1))?;
        writeln!(writer, "  \\draw[thick]({width},1) -- ({width},{height});")?;
    }
    for wall in maze.walls() {
        let (first, second) = (wall.first(), wall.second());
        if wall.joins_row() {
            writeln!(writer, "  \\draw({},{}) -- ++(0,1);", second.x(), first.y())?;
        } else {
            writeln!(writer, "  \\draw({},{}) -- ++(1,0);", first.x(), second.y())?;
        }
    }
    writeln!(writer, "\\end{{tikzpicture}}")
}

/// Writes one `x1,y1 x2,y2` line per remaining wall.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn render_edge_list(maze: &Maze, mut writer: impl Write) -> io::Result<()> {
    for wall in maze.walls() {
        writeln!(writer, "{wall}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use djset_core::{RandomIndex, RandomSpanningTreeBuilder};
    use rand::{SeedableRng, rngs::SmallRng};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn maze(width: i64, height: i64) -> Maze {
        let mut rng = SmallRng::seed_from_u64(3);
        RandomSpanningTreeBuilder::new(width, height)
            .build(&mut rng)
            .expect("valid grid")
    }

    #[test]
    fn tikz_draws_border_and_one_segment_per_wall() -> TestResult {
        let maze = maze(7, 7);
        let mut buffer = Vec::new();
        render_tikz(&maze, &mut buffer)?;
        let text = String::from_utf8(buffer)?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first(), Some(&"\\begin{tikzpicture}[>=latex]"));
        assert_eq!(lines.last(), Some(&"\\end{tikzpicture}"));
        assert!(text.contains("\\draw[thick](0,0) -- (7,0);"));
        assert!(text.contains("\\draw[thick](0,7) -- (7,7);"));
        assert!(text.contains("\\draw[thick](0,0) -- (0,6);"));
        assert!(text.contains("\\draw[thick](7,1) -- (7,7);"));
        let segments = lines.iter().filter(|line| line.contains("-- ++(")).count();
        assert_eq!(segments, 36);
        Ok(())
    }

    #[test]
    fn border_is_open_beside_the_top_left_and_bottom_right_rows() -> TestResult {
        let mut buffer = Vec::new();
        render_tikz(&maze(3, 4), &mut buffer)?;
        let text = String::from_utf8(buffer)?;

        // Left side stops one unit short of the top: row 3 stays open.
        assert!(text.contains("  \\draw[thick](0,0) -- (0,3);\n"));
        assert!(!text.contains("(0,0) -- (0,4)"));
        // Right side starts one unit above the bottom: row 0 stays open.
        assert!(text.contains("  \\draw[thick](3,1) -- (3,4);\n"));
        assert!(!text.contains("(3,0) -- (3,"));
        Ok(())
    }

    /// Draws either the first or the last candidate in the pool.
    struct EdgeIndex {
        last: bool,
    }

    impl RandomIndex for EdgeIndex {
        fn next_index(&mut self, bound: usize) -> usize {
            if self.last { bound - 1 } else { 0 }
        }
    }

    fn tikz_of_square(last: bool) -> Result<String, Box<dyn std::error::Error>> {
        let maze = RandomSpanningTreeBuilder::new(2, 2).build(&mut EdgeIndex { last })?;
        let mut buffer = Vec::new();
        render_tikz(&maze, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    #[test]
    fn tikz_orients_segments_by_wall_direction() -> TestResult {
        // Front to back leaves (0,0)-(0,1) standing: a horizontal segment.
        let text = tikz_of_square(false)?;
        assert!(text.contains("  \\draw(0,1) -- ++(1,0);\n"));

        // Back to front leaves (0,0)-(1,0) standing: a vertical segment.
        let text = tikz_of_square(true)?;
        assert!(text.contains("  \\draw(1,0) -- ++(0,1);\n"));
        Ok(())
    }

    #[test]
    fn tikz_of_an_empty_maze_has_no_drawing_commands() -> TestResult {
        let mut buffer = Vec::new();
        render_tikz(&maze(0, 4), &mut buffer)?;
        assert_eq!(
            String::from_utf8(buffer)?,
            "\\begin{tikzpicture}[>=latex]\n\\end{tikzpicture}\n"
        );
        Ok(())
    }

    #[test]
    fn edge_list_writes_one_line_per_wall() -> TestResult {
        let maze = maze(4, 4);
        let mut buffer = Vec::new();
        render_edge_list(&maze, &mut buffer)?;
        let text = String::from_utf8(buffer)?;
        assert_eq!(text.lines().count(), maze.walls().len());
        for (line, wall) in text.lines().zip(maze.walls()) {
            let expected = format!(
                "{},{} {},{}",
                wall.first().x(),
                wall.first().y(),
                wall.second().x(),
                wall.second().y()
            );
            assert_eq!(line, expected);
        }
        Ok(())
    }
}
