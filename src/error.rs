use thiserror::Error;

/// Everything that can abort a run. None of these are retried; the process
/// prints the message and exits non-zero.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
