use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::schedule::ShiftBoard;

const EMPTY_ROW_FILL: &str = "░";

/// Formats a cell, marking highlighted names with their color token
pub fn format_cell(name: Option<&str>, color: Option<&str>) -> String {
    match (name, color) {
        (Some(name), Some(color)) => format!("{} ({})", name, color),
        (Some(name), None) => name.to_string(),
        (None, _) => "-".to_string(),
    }
}

fn row_strings(board: &ShiftBoard) -> Vec<Vec<String>> {
    board
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            // Placeholder rows are shaded instead of highlighted
            let runner = if row.is_empty {
                row.runner.clone()
            } else {
                let color = board.runner_colors.get(r).and_then(|c| c.as_deref());
                format_cell(Some(row.runner.as_str()), color)
            };
            let mut line = vec![row.time.clone(), runner];
            for (c, cell) in row.cells.iter().enumerate() {
                if row.is_empty {
                    line.push(EMPTY_ROW_FILL.to_string());
                } else {
                    let color = board.colors.get(r).and_then(|cols| cols.get(c)).and_then(|c| c.as_deref());
                    line.push(format_cell(cell.as_deref(), color));
                }
            }
            line.push(row.time.clone());
            line
        })
        .collect()
}

/// Renders the board as a text table: time | runner | slots | time
pub fn render_board(title: &str, board: &ShiftBoard) -> String {
    let mut header = vec!["time".to_string(), "runner".to_string()];
    header.extend(board.scheme.labels().iter().map(|l| l.to_string()));
    header.push("time".to_string());

    let rows = row_strings(board);

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &rows {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let join = |line: &[String]| -> String {
        line.iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = format!("=== {} ===\n", title);
    out.push_str(&join(&header));
    out.push('\n');
    for line in &rows {
        out.push_str(&join(line));
        out.push('\n');
    }
    out
}

/// Prints a board in a readable format
pub fn print_board(title: &str, board: &ShiftBoard) {
    println!("\n{}", render_board(title, board));
    let highlighted = board.colors.iter().flatten().chain(&board.runner_colors).filter(|c| c.is_some()).count();
    println!("Highlighted cells: {}", highlighted);
}

/// Writes a board to a file in the format: time runner | names...
pub fn write_board_to_file<P: AsRef<Path>>(title: &str, board: &ShiftBoard, filename: P) -> Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "** {} **", title)?;

    for row in &board.rows {
        if row.is_empty {
            writeln!(file, "{} {} | [EMPTY]", row.time, row.runner)?;
            continue;
        }
        let names: Vec<&str> = row.cells.iter().map(|c| c.as_deref().unwrap_or("-")).collect();
        writeln!(file, "{} {} | {}", row.time, row.runner, names.join(" "))?;
    }

    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RowExport {
    pub time: String,
    pub runner: String,
    pub runner_color: Option<String>,
    pub cells: Vec<Option<String>>,
    pub colors: Vec<Option<String>>,
    pub is_empty: bool,
}

/// JSON handoff for an external renderer
#[derive(Debug, Serialize)]
pub struct BoardExport {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<RowExport>,
}

impl BoardExport {
    pub fn new(title: &str, board: &ShiftBoard) -> Self {
        let rows = board
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| RowExport {
                time: row.time.clone(),
                runner: row.runner.clone(),
                runner_color: board.runner_colors.get(r).cloned().flatten(),
                cells: row.cells.clone(),
                colors: board
                    .colors
                    .get(r)
                    .cloned()
                    .unwrap_or_else(|| vec![None; row.cells.len()]),
                is_empty: row.is_empty,
            })
            .collect();

        BoardExport {
            title: title.to_string(),
            columns: board.scheme.labels().iter().map(|l| l.to_string()).collect(),
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ColumnLayout, SlotScheme};

    fn board() -> ShiftBoard {
        ShiftBoard {
            scheme: SlotScheme::generic(2),
            rows: vec![
                ColumnLayout {
                    time: "10-11".into(),
                    start_hour: 10,
                    end_hour: 11,
                    runner: "Host".into(),
                    cells: vec![Some("A".into()), None],
                    is_empty: false,
                },
                ColumnLayout::placeholder(11, "Host".into(), 2),
            ],
            colors: vec![vec![Some("#FFDDC1".into()), None], vec![None, None]],
            runner_colors: vec![Some("#FFFFCC".into()), None],
        }
    }

    #[test]
    fn renders_highlights_and_placeholders() {
        let text = render_board("12/24(木)", &board());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=== 12/24(木) ===");
        assert!(lines[1].starts_with("time"));
        assert!(lines[1].contains("member 2"));
        assert!(lines[2].contains("Host (#FFFFCC)"));
        assert!(lines[2].contains("A (#FFDDC1)"));
        assert!(lines[3].contains("░"));
        assert!(lines[3].ends_with("11-12"));
    }

    #[test]
    fn writes_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.txt");
        write_board_to_file("Shift", &board(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "** Shift **\n10-11 Host | A -\n11-12 Host | [EMPTY]\n");
    }

    #[test]
    fn export_keeps_colors_parallel_to_cells() {
        let export = BoardExport::new("Shift", &board());
        assert_eq!(export.columns, vec!["member 1", "member 2"]);
        assert_eq!(export.rows[0].colors[0].as_deref(), Some("#FFDDC1"));
        assert_eq!(export.rows[0].runner_color.as_deref(), Some("#FFFFCC"));
        assert_eq!(export.rows[1].runner_color, None);
        assert!(export.rows[1].is_empty);

        let json = export.to_json().unwrap();
        assert!(json.contains("\"is_empty\": true"));
    }
}
