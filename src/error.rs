use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown shuffle algorithm `{0}` (expected one of: random-sort, naive-swap, fisher-yates, fisher-yates-modulo)")]
    UnknownAlgorithm(String),

    #[error("cannot compute statistics over an empty sample")]
    EmptySample,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<statrs::StatsError> for Error {
    fn from(err: statrs::StatsError) -> Self {
        Error::InvalidParameter(err.to_string())
    }
}
