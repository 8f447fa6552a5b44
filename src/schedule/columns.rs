use std::collections::HashSet;

use tracing::debug;

use super::types::{ColumnLayout, Participant, Slot};

/// Score added to every free column when the participant also shows up in the next slot
pub const LOOKAHEAD_BONUS: f64 = 0.5;

/// Counts the consecutive rows right above the current one holding `name` in `col`
fn continuity_in_column(layouts: &[ColumnLayout], col: usize, name: &str) -> usize {
    layouts
        .iter()
        .rev()
        .take_while(|layout| layout.cells.get(col).and_then(|c| c.as_deref()) == Some(name))
        .count()
}

/// Places each slot's participants into `width` columns, keeping people in the
/// column they held on the rows above whenever it is still free
///
/// # Arguments
/// * `slots` - Observed hours, already ordered by start hour
/// * `width` - Number of columns every row gets
///
/// Participants are processed in arrival order and take the free column with
/// the strictly highest continuity score, lowest index on ties. Without any
/// positive score the first free column is used. Participants that find no
/// free column are dropped.
pub fn arrange_columns(slots: &[Slot], width: usize) -> Vec<ColumnLayout> {
    let mut layouts: Vec<ColumnLayout> = Vec::with_capacity(slots.len());

    for (slot_index, slot) in slots.iter().enumerate() {
        let mut columns: Vec<Option<String>> = vec![None; width];
        let mut assigned: HashSet<&str> = HashSet::new();
        let next_slot = slots.get(slot_index + 1);

        // Stable sort keeps encounter order for equal arrivals
        let mut sorted: Vec<&Participant> = slot.participants.iter().collect();
        sorted.sort_by_key(|p| p.arrival);

        for participant in sorted {
            let name = participant.name.as_str();
            if assigned.contains(name) {
                continue;
            }

            // Staying on for the next hour favours any column over none
            let joins_next = next_slot.is_some_and(|next| next.has_participant(name));

            let mut best_column = None;
            let mut max_continuity = 0.0;
            for (col, occupant) in columns.iter().enumerate() {
                if occupant.is_some() {
                    continue;
                }
                let mut continuity = continuity_in_column(&layouts, col, name) as f64;
                if joins_next {
                    continuity += LOOKAHEAD_BONUS;
                }
                if continuity > max_continuity {
                    max_continuity = continuity;
                    best_column = Some(col);
                }
            }

            // Fall back to the first free column
            match best_column.or_else(|| columns.iter().position(Option::is_none)) {
                Some(col) => {
                    columns[col] = Some(name.to_string());
                    assigned.insert(name);
                }
                None => {
                    debug!(time = %slot.time, participant = name, "row is full, participant dropped");
                }
            }
        }

        layouts.push(ColumnLayout {
            time: slot.time.clone(),
            start_hour: slot.start_hour,
            end_hour: slot.end_hour,
            runner: slot.runner.clone(),
            cells: columns,
            is_empty: false,
        });
    }

    layouts
}
