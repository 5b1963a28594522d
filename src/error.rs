use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConjunctionError {
    #[error("malformed element set: {0}")]
    MalformedElementSet(String),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("element source unavailable: {0}")]
    ElementSourceUnavailable(String),
}

impl From<sgp4::TleError> for ConjunctionError {
    fn from(err: sgp4::TleError) -> Self {
        ConjunctionError::MalformedElementSet(err.to_string())
    }
}

impl From<sgp4::ElementsError> for ConjunctionError {
    fn from(err: sgp4::ElementsError) -> Self {
        ConjunctionError::MalformedElementSet(err.to_string())
    }
}

impl From<sgp4::Error> for ConjunctionError {
    fn from(err: sgp4::Error) -> Self {
        ConjunctionError::Propagation(err.to_string())
    }
}
