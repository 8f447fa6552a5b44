use std::collections::BTreeMap;

use super::types::ColumnLayout;

/// Fills every missing hour between the first start and the last end with a
/// placeholder row
///
/// Placeholders take the runner of the real row one hour before, falling back
/// to the real row one hour after, so a short quiet stretch keeps its label.
pub fn fill_empty_slots(layouts: &[ColumnLayout]) -> Vec<ColumnLayout> {
    let Some(min_start) = layouts.iter().map(|l| l.start_hour).min() else {
        return Vec::new();
    };
    let max_end = layouts.iter().map(|l| l.end_hour).max().unwrap_or(min_start);
    let width = layouts.first().map(|l| l.cells.len()).unwrap_or(0);

    // A later row for the same hour replaces an earlier one
    let by_hour: BTreeMap<u32, &ColumnLayout> = layouts.iter().map(|l| (l.start_hour, l)).collect();

    let mut result = Vec::with_capacity(max_end.saturating_sub(min_start) as usize);
    for hour in min_start..max_end {
        if let Some(layout) = by_hour.get(&hour) {
            result.push((*layout).clone());
            continue;
        }

        let runner = hour
            .checked_sub(1)
            .and_then(|prev| by_hour.get(&prev))
            .or_else(|| by_hour.get(&(hour + 1)))
            .map(|l| l.runner.clone())
            .unwrap_or_default();

        result.push(ColumnLayout::placeholder(hour, runner, width));
    }

    result
}
