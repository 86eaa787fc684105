use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history backend unavailable: {0}")]
    Unavailable(String),

    #[error("invalid history event: {reason}")]
    InvalidEvent { reason: String },
}

pub type HistoryResult<T> = Result<T, HistoryError>;
