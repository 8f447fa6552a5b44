use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::schedule::{parse_time_range, Assignment, Participant, Role, Slot};

/// Assignment list as handed over by the scheduling collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentList {
    pub schedule: Vec<Assignment>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AssignmentFile {
    Wrapped(AssignmentList),
    Bare(Vec<Assignment>),
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Parses a number, returning 0 if empty or invalid
fn parse_number(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

/// Lowercased header without separators, so "user_name" and "userName" match
fn header_key(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_column(headers: &StringRecord, key: &str, fallback: usize) -> usize {
    headers
        .iter()
        .position(|h| header_key(h).contains(key))
        .unwrap_or(fallback)
}

/// Reads reaction records and groups them into slots in encounter order
///
/// # Arguments
/// * `input` - CSV with `time,runner,participant,arrival` columns, one row per reaction
///
/// A row with a blank participant declares a slot nobody joined. Rows whose
/// time label is not a valid "H-H" range are skipped.
pub fn read_slots_csv<R: Read>(input: R) -> Result<Vec<Slot>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    // Find column indices from headers, falling back to the documented order
    let headers = reader.headers()?.clone();
    let time_col = find_column(&headers, "time", 0);
    let runner_col = find_column(&headers, "runner", 1);
    let participant_col = find_column(&headers, "participant", 2);
    let arrival_col = find_column(&headers, "arrival", 3);

    let mut slots: Vec<Slot> = Vec::new();
    let mut index_by_range: HashMap<(u32, u32), usize> = HashMap::new();

    for result in reader.records() {
        let record = result?;

        let time = record.get(time_col).unwrap_or("");
        let Some(range) = parse_time_range(time) else {
            warn!(time, "invalid time label, row skipped");
            continue;
        };
        let runner = record.get(runner_col).unwrap_or("");

        // One slot per range; the first non-blank runner wins
        let idx = *index_by_range.entry(range).or_insert_with(|| {
            slots.push(Slot::new(range.0, range.1, runner));
            slots.len() - 1
        });
        let slot = &mut slots[idx];
        if slot.runner.is_empty() && !runner.is_empty() {
            slot.runner = runner.to_string();
        }

        let participant = record.get(participant_col).unwrap_or("");
        if participant.is_empty() {
            continue;
        }
        slot.participants.push(Participant {
            name: participant.to_string(),
            arrival: parse_number(record.get(arrival_col).unwrap_or("")),
        });
    }

    Ok(slots)
}

/// Reads a JSON array of slots, dropping any whose hours disagree with its
/// time label or fall outside the day
pub fn read_slots_json<R: Read>(input: R) -> Result<Vec<Slot>> {
    let slots: Vec<Slot> = serde_json::from_reader(input)?;

    let valid = slots
        .into_iter()
        .filter(|slot| {
            let consistent = parse_time_range(&slot.time) == Some((slot.start_hour, slot.end_hour));
            if !consistent {
                warn!(
                    time = %slot.time,
                    start_hour = slot.start_hour,
                    end_hour = slot.end_hour,
                    "slot hours do not match its time label, slot skipped"
                );
            }
            consistent
        })
        .collect();

    Ok(valid)
}

/// Loads slots from a CSV or JSON file, ordered by start hour
pub fn load_slots<P: AsRef<Path>>(path: P) -> Result<Vec<Slot>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut slots: Vec<Slot> = if is_json(path) {
        read_slots_json(BufReader::new(file))?
    } else {
        read_slots_csv(file)?
    };
    slots.sort_by_key(|s| s.start_hour);

    debug!(count = slots.len(), path = %path.display(), "slots loaded");
    Ok(slots)
}

/// Reads `time,role,user_id,user_name` rows; an unknown role is an error
pub fn read_assignments_csv<R: Read>(input: R) -> Result<Vec<Assignment>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let time_col = find_column(&headers, "time", 0);
    let role_col = find_column(&headers, "role", 1);
    let id_col = headers.iter().position(|h| header_key(h) == "userid");
    let name_col = find_column(&headers, "username", 2);

    let mut assignments = Vec::new();
    for result in reader.records() {
        let record = result?;

        let user_name = record.get(name_col).unwrap_or("");
        if user_name.is_empty() {
            continue;
        }

        assignments.push(Assignment {
            time: record.get(time_col).unwrap_or("").to_string(),
            role: Role::from_str(record.get(role_col).unwrap_or(""))?,
            user_id: id_col.and_then(|c| record.get(c)).unwrap_or("").to_string(),
            user_name: user_name.to_string(),
        });
    }

    Ok(assignments)
}

/// Loads an assignment list from CSV, or from JSON given either as a bare
/// array or as `{ "schedule": [...], "reasoning": "..." }`
pub fn load_assignments<P: AsRef<Path>>(path: P) -> Result<AssignmentList> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let list = if is_json(path) {
        match serde_json::from_reader(BufReader::new(file))? {
            AssignmentFile::Wrapped(list) => list,
            AssignmentFile::Bare(schedule) => AssignmentList {
                schedule,
                reasoning: None,
            },
        }
    } else {
        AssignmentList {
            schedule: read_assignments_csv(file)?,
            reasoning: None,
        }
    };

    debug!(count = list.schedule.len(), path = %path.display(), "assignments loaded");
    Ok(list)
}
