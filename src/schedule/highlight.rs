use std::collections::{HashMap, HashSet};

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::types::HighlightMatrix;

/// Background colors handed out to highlighted names, in allocation order
pub const HIGHLIGHT_PALETTE: [&str; 31] = [
    "#FFDDC1", "#FFFFCC", "#D4F1F4", "#F0E6FF", "#FFD1DC",
    "#D9EAD3", "#C9DAF8", "#FFECB3", "#E1E0FF", "#FADADD",
    "#D0F0C0", "#BCE4E8", "#F5CBA7", "#FFFACD", "#CFE2F3",
    "#EAD1DC", "#FFE5CC", "#E0FFFF", "#DAE8FC", "#FCE6C9",
    "#D6FFD6", "#F8D5E1", "#D1E8E2", "#FFF0F5", "#E6F0FF",
    "#F3E5AB", "#D8BFD8", "#B0E0E6", "#FAFAD2", "#98FB98",
    "#FFB6C1",
];

/// Hands out one palette color per name for the lifetime of a single table
///
/// Colors are taken in palette order until every entry is used; after that a
/// random palette entry is reused.
pub struct ColorAllocator<R: Rng = ThreadRng> {
    palette: Vec<String>,
    used: HashSet<String>,
    assigned: HashMap<String, String>,
    rng: R,
}

impl ColorAllocator<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for ColorAllocator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ColorAllocator<R> {
    pub fn with_rng(rng: R) -> Self {
        let palette = HIGHLIGHT_PALETTE.iter().map(|c| c.to_string()).collect();
        Self::with_palette(palette, rng)
    }

    /// An empty palette falls back to the default one
    pub fn with_palette(palette: Vec<String>, rng: R) -> Self {
        let palette = if palette.is_empty() {
            HIGHLIGHT_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette
        };
        ColorAllocator {
            palette,
            used: HashSet::new(),
            assigned: HashMap::new(),
            rng,
        }
    }

    fn next_color(&mut self) -> String {
        if let Some(color) = self.palette.iter().find(|c| !self.used.contains(*c)) {
            let color = color.clone();
            self.used.insert(color.clone());
            return color;
        }
        self.palette
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the name's color, allocating one on first use
    pub fn color_for(&mut self, name: &str) -> &str {
        if !self.assigned.contains_key(name) {
            let color = self.next_color();
            self.assigned.insert(name.to_string(), color);
        }
        self.assigned[name].as_str()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.assigned.get(name).map(String::as_str)
    }

    pub fn assigned(&self) -> &HashMap<String, String> {
        &self.assigned
    }
}

/// Names in the examined columns of one row with the columns each occupies,
/// in first-seen order
fn user_groups<'a>(row: &'a [Option<String>], check_cols: &[usize]) -> Vec<(&'a str, Vec<usize>)> {
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for &col in check_cols {
        let Some(user) = row.get(col).and_then(|c| c.as_deref()) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == user) {
            Some((_, cols)) => cols.push(col),
            None => groups.push((user, vec![col])),
        }
    }
    groups
}

/// Colors every cell of names that moved to a different column group or
/// skipped an active row
///
/// # Arguments
/// * `values` - Fixed-width table of names
/// * `target_cols` - Columns to examine, all of them when `None`
/// * `empty_rows` - Placeholder flags per row; rows without a flag count as active
/// * `colors` - Allocator for this table
///
/// A name missing only across placeholder rows has not skipped anything.
pub fn assign_highlight_colors<R: Rng>(
    values: &[Vec<Option<String>>],
    target_cols: Option<&[usize]>,
    empty_rows: &[bool],
    colors: &mut ColorAllocator<R>,
) -> HighlightMatrix {
    let Some(first_row) = values.first() else {
        return Vec::new();
    };
    let check_cols: Vec<usize> = match target_cols {
        Some(cols) => cols.to_vec(),
        None => (0..first_row.len()).collect(),
    };
    let is_empty_row = |row: usize| empty_rows.get(row).copied().unwrap_or(false);

    // Step 1: rows each name appears in
    let mut order: Vec<&str> = Vec::new();
    let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::new();
    for (r, row) in values.iter().enumerate() {
        for &col in &check_cols {
            let Some(user) = row.get(col).and_then(|c| c.as_deref()) else {
                continue;
            };
            let rows = occurrences.entry(user).or_insert_with(|| {
                order.push(user);
                Vec::new()
            });
            if rows.last() != Some(&r) {
                rows.push(r);
            }
        }
    }

    let mut affected: HashSet<&str> = HashSet::new();

    // Step 2: jumps over at least one active row
    for &user in &order {
        let jumped = occurrences[user].windows(2).any(|pair| {
            let (start, end) = (pair[0], pair[1]);
            end - start > 1 && (start + 1..end).any(|r| !is_empty_row(r))
        });
        if jumped {
            debug!(user, "skips an active row");
            colors.color_for(user);
            affected.insert(user);
        }
    }

    // Step 3: complete relocation between adjacent rows
    let mut prev_groups = user_groups(first_row, &check_cols);
    for (r, row) in values.iter().enumerate().skip(1) {
        let current_groups = user_groups(row, &check_cols);
        for (user, curr_pos) in &current_groups {
            let prev_pos = prev_groups
                .iter()
                .find(|(name, _)| name == user)
                .map(|(_, cols)| cols.as_slice())
                .unwrap_or(&[]);

            let relocated = !prev_pos.is_empty() && !prev_pos.iter().any(|col| curr_pos.contains(col));
            if relocated {
                debug!(user = *user, row = r, "changes column group");
                colors.color_for(user);
                affected.insert(*user);
            }
        }
        prev_groups = current_groups;
    }

    // Step 4: paint every examined cell of affected names
    let mut result: HighlightMatrix = values.iter().map(|row| vec![None; row.len()]).collect();
    for (r, row) in values.iter().enumerate() {
        for &col in &check_cols {
            let Some(user) = row.get(col).and_then(|c| c.as_deref()) else {
                continue;
            };
            if affected.contains(user) {
                result[r][col] = colors.get(user).map(str::to_string);
            }
        }
    }

    result
}
