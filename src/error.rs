//! Crate-level error type and `Result` alias.
//! Converts underlying I/O, JSON and XML errors, and provides semantic variants
//! for option parsing, profile loading and detection failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid corpus file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Missing value for option: {flag}")]
    MissingOptionValue { flag: String },

    #[error("Invalid option value: {key}={value}")]
    InvalidOptionValue { key: String, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("{0}")]
    ProfileLoad(String),

    #[error("duplicate the same language profile: {0}")]
    DuplicateProfile(String),

    #[error("no features in text")]
    NoFeatures,

    #[error("Not Found text file : lang = {lang}")]
    CorpusNotFound { lang: String },
}
