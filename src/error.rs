use thiserror::Error;

/// Reasons a raw hotel payload is rejected by the normalizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("property has no identifier")]
    MissingId,
    #[error("property {id} has no display name")]
    MissingName { id: String },
    #[error("property {id} is sold out")]
    SoldOut { id: String },
    #[error("malformed property payload: {0}")]
    InvalidJson(String),
}

/// Failures loading search sessions or exchange rates
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no search session found at {0}")]
    MissingSession(String),
    #[error("invalid search session: {0}")]
    InvalidSession(String),
    #[error("rate provider returned no rates")]
    EmptyRates,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
