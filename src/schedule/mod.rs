pub mod types;
pub mod intervals;
pub mod columns;
pub mod gaps;
pub mod align;
pub mod highlight;
pub mod roles;
pub mod board;

pub use types::{ColumnLayout, HighlightMatrix, Participant, Role, ShiftBoard, Slot, SlotDef, SlotScheme};
pub use intervals::{has_gap_shift, normalize_time_string, parse_intervals, parse_time_range};
pub use columns::arrange_columns;
pub use gaps::fill_empty_slots;
pub use align::align_duplicate_names;
pub use highlight::{assign_highlight_colors, ColorAllocator, HIGHLIGHT_PALETTE};
pub use roles::{layouts_from_assignments, remove_emojis, Assignment};
pub use board::{board_from_assignments, board_from_assignments_with, build_board, build_board_with};
