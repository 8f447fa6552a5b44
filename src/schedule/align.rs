/// Pulls names that repeat on the next row back into the column they held above
///
/// Rows are visited top to bottom and columns left to right. A swap changes the
/// next row before its remaining columns are examined, so a later swap may move
/// a name that an earlier one had already lined up. The input is left untouched.
pub fn align_duplicate_names(data: &[Vec<Option<String>>]) -> Vec<Vec<Option<String>>> {
    let mut rows = data.to_vec();

    for row in 0..rows.len().saturating_sub(1) {
        let (upper, lower) = rows.split_at_mut(row + 1);
        let current = &upper[row];
        let next = &mut lower[0];

        for col in 0..current.len() {
            let Some(value) = current[col].as_deref() else {
                continue;
            };
            if next[col].as_deref() == Some(value) {
                continue;
            }
            if let Some(target) = next.iter().position(|cell| cell.as_deref() == Some(value)) {
                next.swap(col, target);
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<Option<String>>> {
        rows.iter()
            .map(|r| {
                r.iter()
                    .map(|s| (!s.is_empty()).then(|| s.to_string()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn swaps_name_back_under_previous_position() {
        let input = matrix(&[&["A", "B", "C"], &["B", "A", "C"]]);
        let aligned = align_duplicate_names(&input);
        assert_eq!(aligned, matrix(&[&["A", "B", "C"], &["A", "B", "C"]]));
    }

    #[test]
    fn aligning_twice_changes_nothing() {
        let input = matrix(&[&["A", "B", "C"], &["B", "A", "C"]]);
        let once = align_duplicate_names(&input);
        assert_eq!(align_duplicate_names(&once), once);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = matrix(&[&["A", "B"], &["B", "A"]]);
        let snapshot = input.clone();
        let _ = align_duplicate_names(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn alignment_cascades_down_the_table() {
        let input = matrix(&[&["A", "B", "C"], &["B", "A", "C"], &["D", "E", "A"]]);
        let aligned = align_duplicate_names(&input);
        assert_eq!(aligned[1], matrix(&[&["A", "B", "C"]])[0]);
        assert_eq!(aligned[2], matrix(&[&["A", "E", "D"]])[0]);
    }

    #[test]
    fn name_moves_into_empty_cell() {
        let input = matrix(&[&["", "X"], &["X", ""]]);
        let aligned = align_duplicate_names(&input);
        assert_eq!(aligned[1], matrix(&[&["", "X"]])[0]);
    }

    #[test]
    fn later_swap_undoes_earlier_alignment() {
        // A holds two columns above; the second swap pulls A away from column 0
        let input = matrix(&[&["A", "A", "B"], &["B", "A", "C"]]);
        let aligned = align_duplicate_names(&input);
        assert_eq!(aligned[1], matrix(&[&["C", "A", "B"]])[0]);

        let input = matrix(&[&["A", "", "B"], &["B", "", "A"]]);
        let aligned = align_duplicate_names(&input);
        assert_eq!(aligned[1], matrix(&[&["A", "", "B"]])[0]);
    }

    #[test]
    fn empty_table() {
        assert!(align_duplicate_names(&[]).is_empty());
    }
}
