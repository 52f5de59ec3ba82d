/// Station driver error types.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Init error: {0}")]
    Init(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StationError>;
