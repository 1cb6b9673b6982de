//! Error types shared by the fetch, extraction and output stages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure: timeout, connection error or a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The RSS body could not be parsed as a well-formed XML document.
    #[error("not well-formed XML: {0}")]
    MalformedXml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::MalformedXml(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
