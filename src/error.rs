use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HashCardError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{name} cannot be empty")]
    EmptyParameter { name: String },

    #[error("invalid strategy: {name}")]
    UnknownStrategy { name: String, available: Vec<String> },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize card {id}: {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Traversal error: {message}")]
    Walk { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for HashCardError {
    fn user_message(&self) -> String {
        match self {
            HashCardError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            HashCardError::EmptyParameter { name } => {
                format!("{} cannot be empty", name)
            }
            HashCardError::UnknownStrategy { name, available } => {
                let mut message = format!("invalid strategy: {}\nvalid strategies:", name);
                for strategy in available {
                    message.push_str(&format!("\n  - {}", strategy));
                }
                message
            }
            HashCardError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            HashCardError::Config { .. } => Some(
                "Check the key=value file: one assignment per line, keys HASH_CARD_DIR, HASH_CARD_STRATEGY or HASH_CARD_OUT_DIR.".to_string()
            ),
            HashCardError::EmptyParameter { name } => Some(format!(
                "Pass a non-empty value with --{} or remove the empty assignment from the config file.",
                name
            )),
            HashCardError::UnknownStrategy { .. } => Some(
                "Run with --list-strategies to see every registered strategy.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for HashCardError {
    fn from(error: walkdir::Error) -> Self {
        let message = match error.path() {
            Some(path) => format!("{}: {}", path.display(), error),
            None => error.to_string(),
        };
        HashCardError::Walk { message }
    }
}

pub type Result<T> = std::result::Result<T, HashCardError>;
