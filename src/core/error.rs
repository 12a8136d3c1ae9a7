use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConstantError {
    #[error("{class} is not supported by {rep}")]
    NotSupported { class: &'static str, rep: String },
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Unknown type representative: {0}")]
    UnknownRep(String),
}

impl ConstantError {
    pub(crate) fn not_supported(class: &'static str, rep: impl ToString) -> Self {
        ConstantError::NotSupported {
            class,
            rep: rep.to_string(),
        }
    }
}
