use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("invalid time label '{0}': expected H-H within 0-24")]
    InvalidTimeLabel(String),

    #[error("unknown role '{0}': expected runner, encore, support or standby")]
    UnknownRole(String),

    #[error("no shift slots found in {0}")]
    NoSlots(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShiftError>;
