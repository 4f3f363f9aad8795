use placescout::ProviderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebApiError>;

#[derive(Error, Debug)]
pub enum WebApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {0:?}")]
    Status(String),
}

impl From<WebApiError> for ProviderError {
    fn from(error: WebApiError) -> Self {
        match error {
            WebApiError::Status(status) => Self::Status(status),
            WebApiError::Http(inner) => Self::Transport(anyhow::Error::new(inner)),
        }
    }
}
