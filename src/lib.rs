pub mod date;
pub mod display;
pub mod error;
pub mod parser;
pub mod schedule;

pub use error::{Result, ShiftError};
