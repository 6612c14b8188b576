use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaftarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Expected {0}")]
    WrongType(&'static str),

    #[error("Missing delimiter: {0}")]
    MissingDelimiter(char),

    #[error("Name is missing or empty")]
    InvalidName,

    #[error("Marks are missing or empty")]
    NoMarks,

    #[error("Score for {0} is not a number between 0 and 100")]
    ScoreOutOfRange(String),

    #[error("Transaction list is missing or empty")]
    NoTransactions,

    #[error("No valid credit/debit transactions")]
    NoValidTransactions,

    #[error("PNR must be exactly 10 digits")]
    InvalidPnr,

    #[error("Train details are missing")]
    MissingTrain,

    #[error("Passenger list is missing or empty")]
    NoPassengers,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DaftarError>;
