use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Cannot build the court header: both party names are missing")]
    MissingParties,

    #[error("Failed to serialize case record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid engine configuration: {0}")]
    Config(String),
}
