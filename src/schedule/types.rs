use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShiftError;

/// Someone who signaled interest in a slot, with the order they did it in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub arrival: i64,
}

/// One observed hour window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub runner: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Slot {
    pub fn new(start_hour: u32, end_hour: u32, runner: &str) -> Self {
        Slot {
            time: format!("{}-{}", start_hour, end_hour),
            start_hour,
            end_hour,
            runner: runner.to_string(),
            participants: Vec::new(),
        }
    }

    pub fn with_participant(mut self, name: &str, arrival: i64) -> Self {
        self.participants.push(Participant {
            name: name.to_string(),
            arrival,
        });
        self
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }
}

/// What a named slot is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Runner,
    Encore,
    Support,
    Standby,
    Member,
}

impl FromStr for Role {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "runner" => Ok(Role::Runner),
            "encore" => Ok(Role::Encore),
            "support" => Ok(Role::Support),
            "standby" => Ok(Role::Standby),
            "member" => Ok(Role::Member),
            _ => Err(ShiftError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Runner => "runner",
            Role::Encore => "encore",
            Role::Support => "support",
            Role::Standby => "standby",
            Role::Member => "member",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDef {
    pub role: Role,
    pub label: String,
}

/// The named slots every row of one table carries, in column order
///
/// The runner is not part of the scheme; every row keeps it in its own field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotScheme {
    slots: Vec<SlotDef>,
}

impl SlotScheme {
    pub fn new(slots: Vec<SlotDef>) -> Self {
        SlotScheme { slots }
    }

    /// `width` interchangeable member columns
    pub fn generic(width: usize) -> Self {
        let slots = (0..width)
            .map(|i| SlotDef {
                role: Role::Member,
                label: format!("member {}", i + 1),
            })
            .collect();
        SlotScheme { slots }
    }

    /// Encore, three supports and a standby next to the runner
    pub fn roles() -> Self {
        let mut slots = vec![SlotDef {
            role: Role::Encore,
            label: "encore".to_string(),
        }];
        for i in 1..=3 {
            slots.push(SlotDef {
                role: Role::Support,
                label: format!("support {}", i),
            });
        }
        slots.push(SlotDef {
            role: Role::Standby,
            label: "standby".to_string(),
        });
        SlotScheme { slots }
    }

    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[SlotDef] {
        &self.slots
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.label.as_str()).collect()
    }

    /// Column indices sharing a role, grouped in order of first appearance
    pub fn role_groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<(Role, Vec<usize>)> = Vec::new();
        for (idx, slot) in self.slots.iter().enumerate() {
            match groups.iter_mut().find(|(role, _)| *role == slot.role) {
                Some((_, cols)) => cols.push(idx),
                None => groups.push((slot.role, vec![idx])),
            }
        }
        groups.into_iter().map(|(_, cols)| cols).collect()
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub time: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub runner: String,
    pub cells: Vec<Option<String>>,
    /// Synthesized placeholder for an hour without data
    pub is_empty: bool,
}

impl ColumnLayout {
    pub fn placeholder(hour: u32, runner: String, width: usize) -> Self {
        ColumnLayout {
            time: format!("{}-{}", hour, hour + 1),
            start_hour: hour,
            end_hour: hour + 1,
            runner,
            cells: vec![None; width],
            is_empty: true,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.iter().any(|c| c.as_deref() == Some(name))
    }
}

/// Cell-parallel color tokens; `None` means default background
pub type HighlightMatrix = Vec<Vec<Option<String>>>;

/// Dense rows plus their highlight colors, ready to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftBoard {
    pub scheme: SlotScheme,
    pub rows: Vec<ColumnLayout>,
    /// Parallel to each row's cells
    pub colors: HighlightMatrix,
    /// One entry per row for the runner cell
    pub runner_colors: Vec<Option<String>>,
}
