use rand::Rng;
use tracing::info;

use super::align::align_duplicate_names;
use super::columns::arrange_columns;
use super::gaps::fill_empty_slots;
use super::highlight::{assign_highlight_colors, ColorAllocator};
use super::roles::{layouts_from_assignments, Assignment};
use super::types::{ColumnLayout, ShiftBoard, Slot, SlotScheme};

/// Builds the highlighted table for reaction-collected slots
pub fn build_board(slots: &[Slot], scheme: &SlotScheme) -> ShiftBoard {
    build_board_with(slots, scheme, ColorAllocator::new())
}

/// Same as [`build_board`], drawing colors from `colors`
///
/// The allocator is consumed so its name to color map lives for one table only.
pub fn build_board_with<R: Rng>(slots: &[Slot], scheme: &SlotScheme, colors: ColorAllocator<R>) -> ShiftBoard {
    let sparse = arrange_columns(slots, scheme.width());
    finish_board(&sparse, scheme, colors)
}

/// Builds the highlighted table for an already-decided assignment list
pub fn board_from_assignments(assignments: &[Assignment], runner: &str, scheme: &SlotScheme) -> ShiftBoard {
    board_from_assignments_with(assignments, runner, scheme, ColorAllocator::new())
}

pub fn board_from_assignments_with<R: Rng>(
    assignments: &[Assignment],
    runner: &str,
    scheme: &SlotScheme,
    colors: ColorAllocator<R>,
) -> ShiftBoard {
    let sparse = layouts_from_assignments(assignments, runner, scheme);
    finish_board(&sparse, scheme, colors)
}

/// Aligns repeated names within each group of same-role columns, so a name
/// never trades an encore slot for a support slot
fn align_by_role(rows: &[ColumnLayout], scheme: &SlotScheme) -> Vec<Vec<Option<String>>> {
    let mut aligned: Vec<Vec<Option<String>>> = rows.iter().map(|r| r.cells.clone()).collect();

    for group in scheme.role_groups() {
        let sub: Vec<Vec<Option<String>>> = aligned
            .iter()
            .map(|cells| group.iter().map(|&c| cells[c].clone()).collect())
            .collect();
        let sub = align_duplicate_names(&sub);
        for (cells, sub_row) in aligned.iter_mut().zip(sub) {
            for (&c, value) in group.iter().zip(sub_row) {
                cells[c] = value;
            }
        }
    }

    aligned
}

/// Rows as examined by the highlighter: runner first, then the slot cells
fn highlight_input(rows: &[ColumnLayout]) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|row| {
            let mut line = Vec::with_capacity(row.cells.len() + 1);
            line.push((!row.runner.is_empty()).then(|| row.runner.clone()));
            line.extend(row.cells.iter().cloned());
            line
        })
        .collect()
}

/// Gap filling, alignment and highlighting, in that order
fn finish_board<R: Rng>(sparse: &[ColumnLayout], scheme: &SlotScheme, mut colors: ColorAllocator<R>) -> ShiftBoard {
    // Step 1: one row per hour
    let mut rows = fill_empty_slots(sparse);

    // Step 2: line repeated names up, role group by role group
    let aligned = align_by_role(&rows, scheme);
    for (row, cells) in rows.iter_mut().zip(aligned) {
        row.cells = cells;
    }

    // Step 3: highlight with the runner as an examined column
    let empty_rows: Vec<bool> = rows.iter().map(|r| r.is_empty).collect();
    let highlight = assign_highlight_colors(&highlight_input(&rows), None, &empty_rows, &mut colors);

    let (runner_colors, cell_colors): (Vec<Option<String>>, Vec<Vec<Option<String>>>) = highlight
        .into_iter()
        .map(|mut line| {
            let runner = if line.is_empty() { None } else { line.remove(0) };
            (runner, line)
        })
        .unzip();

    info!(
        rows = rows.len(),
        placeholders = empty_rows.iter().filter(|e| **e).count(),
        highlighted = colors.assigned().len(),
        "shift board built"
    );

    ShiftBoard {
        scheme: scheme.clone(),
        rows,
        colors: cell_colors,
        runner_colors,
    }
}
