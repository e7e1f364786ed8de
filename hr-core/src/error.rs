use thiserror::Error;

/// Failure to turn a star table into rows. Fatal for the whole table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed star table: {0}")]
    Csv(#[from] csv::Error),

    #[error("star table has no `{0}` column")]
    MissingColumn(&'static str),
}

/// Why a single row was left off the plot. Never fatal.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RowRejection {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("{field} is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} {value} outside plotted range")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid viewer config: {0}")]
    Invalid(String),
}
