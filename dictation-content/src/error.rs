use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),

    #[error("Could not extract article id from URL: {0}")]
    MissingArticleId(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP status {0}")]
    Status(u16),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid data structure")]
    InvalidData,

    #[error("No content found")]
    NoContent,

    #[error("Failed to extract {0} from the response")]
    Missing(&'static str),
}

pub type Result<T> = std::result::Result<T, ContentError>;
