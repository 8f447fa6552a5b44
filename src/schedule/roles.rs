use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::intervals::parse_time_range;
use super::types::{ColumnLayout, Role, SlotScheme};

/// One already-decided placement: who fills which role in which hour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub time: String,
    pub role: Role,
    #[serde(default)]
    pub user_id: String,
    pub user_name: String,
}

fn is_emoji(ch: char) -> bool {
    matches!(ch as u32,
        0x2011..=0x26FF
        | 0x2700..=0x27BF
        | 0xE000..=0xF8FF
        | 0x1F000..=0x1F7FF
        | 0x1F910..=0x1F9FF)
}

/// Strips emoji and pictographs from a display name; a name made only of
/// emoji is kept as it was
pub fn remove_emojis(text: &str) -> String {
    let stripped: String = text.chars().filter(|&c| !is_emoji(c)).collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        text.to_string()
    } else {
        stripped.to_string()
    }
}

/// Lays an assignment list out as one row per hour in `scheme`'s slots
///
/// # Arguments
/// * `assignments` - Decided placements; labels that are not a valid "H-H" range are skipped
/// * `runner` - Runner shown on every row unless a `runner` assignment replaces it
/// * `scheme` - Named slots each row carries
///
/// Each assignment fills the first free slot carrying its role, in list order.
/// Assignments left without a matching free slot are dropped.
pub fn layouts_from_assignments(
    assignments: &[Assignment],
    runner: &str,
    scheme: &SlotScheme,
) -> Vec<ColumnLayout> {
    let mut by_hour: BTreeMap<u32, Vec<&Assignment>> = BTreeMap::new();
    for assignment in assignments {
        // Rows are keyed by start hour, so "10-12" lands on the 10-11 row
        match parse_time_range(&assignment.time) {
            Some((hour, _)) => by_hour.entry(hour).or_default().push(assignment),
            None => warn!(time = %assignment.time, "invalid time label, assignment skipped"),
        }
    }

    let runner = remove_emojis(runner);
    let mut layouts = Vec::with_capacity(by_hour.len());

    for (hour, group) in by_hour {
        let mut layout = ColumnLayout {
            time: format!("{}-{}", hour, hour + 1),
            start_hour: hour,
            end_hour: hour + 1,
            runner: runner.clone(),
            cells: vec![None; scheme.width()],
            is_empty: false,
        };

        for assignment in group {
            let name = remove_emojis(&assignment.user_name);

            // Runner is a row field, not a slot
            if assignment.role == Role::Runner {
                layout.runner = name;
                continue;
            }

            let free_slot = scheme
                .slots()
                .iter()
                .zip(layout.cells.iter())
                .position(|(def, cell)| def.role == assignment.role && cell.is_none());

            match free_slot {
                Some(idx) => layout.cells[idx] = Some(name),
                None => debug!(time = %layout.time, role = %assignment.role, user = %name, "no free slot for role, dropped"),
            }
        }

        layouts.push(layout);
    }

    layouts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(time: &str, role: Role, name: &str) -> Assignment {
        Assignment {
            time: time.to_string(),
            role,
            user_id: String::new(),
            user_name: name.to_string(),
        }
    }

    #[test]
    fn strips_emoji_from_names() {
        assert_eq!(remove_emojis("🌸Sakura🌸"), "Sakura");
        assert_eq!(remove_emojis(" Mika ✨ "), "Mika");
        assert_eq!(remove_emojis("🎉🎉"), "🎉🎉");
        assert_eq!(remove_emojis("ユウ"), "ユウ");
    }

    #[test]
    fn places_roles_into_their_slots() {
        let assignments = vec![
            assign("10-11", Role::Support, "S1"),
            assign("10-11", Role::Encore, "E"),
            assign("10-11", Role::Standby, "W"),
            assign("10-11", Role::Support, "S2"),
            assign("10-11", Role::Support, "S3"),
            assign("10-11", Role::Support, "S4"),
        ];
        let layouts = layouts_from_assignments(&assignments, "Host", &SlotScheme::roles());

        assert_eq!(layouts.len(), 1);
        let names: Vec<Option<&str>> = layouts[0].cells.iter().map(|c| c.as_deref()).collect();
        assert_eq!(names, vec![Some("E"), Some("S1"), Some("S2"), Some("S3"), Some("W")]);
        assert_eq!(layouts[0].runner, "Host");
    }

    #[test]
    fn groups_by_hour_in_ascending_order() {
        let assignments = vec![
            assign("13-14", Role::Encore, "B"),
            assign("10-11", Role::Encore, "A"),
            assign("soon", Role::Encore, "C"),
        ];
        let layouts = layouts_from_assignments(&assignments, "Host", &SlotScheme::roles());
        let times: Vec<&str> = layouts.iter().map(|l| l.time.as_str()).collect();
        assert_eq!(times, vec!["10-11", "13-14"]);
    }

    #[test]
    fn out_of_range_labels_are_skipped() {
        let assignments = vec![
            assign("10-11", Role::Encore, "A"),
            assign("100000-100001", Role::Encore, "B"),
            assign("4294967295-0", Role::Encore, "C"),
            assign("23-24", Role::Encore, "D"),
        ];
        let layouts = layouts_from_assignments(&assignments, "Host", &SlotScheme::roles());

        let times: Vec<&str> = layouts.iter().map(|l| l.time.as_str()).collect();
        assert_eq!(times, vec!["10-11", "23-24"]);
        assert_eq!(layouts[1].end_hour, 24);
    }

    #[test]
    fn runner_assignment_overrides_default() {
        let assignments = vec![assign("10-11", Role::Runner, "Guest☀")];
        let layouts = layouts_from_assignments(&assignments, "Host", &SlotScheme::roles());
        assert_eq!(layouts[0].runner, "Guest");
        assert!(layouts[0].cells.iter().all(Option::is_none));
    }

    #[test]
    fn roles_without_slots_are_dropped() {
        let assignments = vec![assign("10-11", Role::Encore, "E"), assign("10-11", Role::Member, "M")];
        let layouts = layouts_from_assignments(&assignments, "Host", &SlotScheme::generic(2));
        assert_eq!(layouts[0].cells, vec![Some("M".to_string()), None]);
    }
}
