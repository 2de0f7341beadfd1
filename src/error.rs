use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while reading tabular input (rebate records or summaries).
///
/// Every variant is fatal for the run that hit it.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("missing required column: {column}")]
    MissingColumn { column: &'static str },

    #[error("row {row}: invalid {column} '{value}': {reason}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("account {account_id}: {column} total exceeds the representable range")]
    Overflow {
        account_id: String,
        column: &'static str,
    },

    #[error("row {row}: unknown product type '{value}'")]
    UnknownProductType { row: usize, value: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors loading the payout address directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("address directory not found: {path}")]
    NotFound { path: String },

    #[error("failed to read address directory: {0}")]
    Read(#[source] std::io::Error),

    #[error("malformed address directory: {0}")]
    Malformed(String),

    #[error("address directory is empty")]
    Empty,
}

/// Errors surfaced by an exchange session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// Client and server clocks disagree; safe to retry with a fresh session.
    #[error("timestamp outside of recv window: {message}")]
    TimeDesync { message: String },

    #[error("exchange rejected request ({code}): {message}")]
    Api { code: i64, message: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("missing credentials: {0}")]
    Credentials(&'static str),
}

impl ExchangeError {
    /// Whether another attempt with a fresh session may succeed.
    #[must_use]
    pub const fn is_time_desync(&self) -> bool {
        matches!(self, Self::TimeDesync { .. })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("withdrawals need confirmation; pass --yes to submit in JSON mode")]
    ConfirmationRequired,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Input(InputError::Csv(err))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
