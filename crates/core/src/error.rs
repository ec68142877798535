#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub type SynthResult<T> = std::result::Result<T, SynthError>;
