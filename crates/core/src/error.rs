use crate::doctor::DoctorId;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to open roster file: {0}")]
    RosterOpen(std::io::Error),
    #[error("failed to parse roster row: {0}")]
    RosterParse(csv::Error),
    #[error("failed to open feedback log: {0}")]
    FeedbackOpen(std::io::Error),
    #[error("failed to append feedback row: {0}")]
    FeedbackAppend(csv::Error),
    #[error("failed to flush feedback log: {0}")]
    FeedbackFlush(std::io::Error),
    #[error("no doctor with id {0}")]
    UnknownDoctor(DoctorId),
    #[error("login rejected: {0}")]
    IdentityRejected(String),
    #[error("invalid session token")]
    InvalidSessionToken,
    #[error("text validation failed: {0}")]
    Text(#[from] docmatch_types::TextError),
    #[error("mail delivery failed: {0}")]
    Mail(Box<dyn std::error::Error + Send + Sync>),
}

pub type RosterResult<T> = std::result::Result<T, RosterError>;
