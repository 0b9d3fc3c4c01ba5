use std::io;
use std::sync::Arc;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("io error: {0}")]
    IO(Arc<io::Error>),
    #[error("'{0}' is not supported by the current command factory.")]
    NotSupported(String),
    #[error("client error: {0}")]
    Client(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("scan limit exceeded: {0}")]
    Exceed(String),
    #[error("config error: {0}")]
    Config(String),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::IO(Arc::new(value))
    }
}

impl Error {
    pub fn not_supported(command: impl Into<String>) -> Self {
        Self::NotSupported(command.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
