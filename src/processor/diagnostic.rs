use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable problem met while processing one entry. The run keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    Scan {
        message: String,
    },
    Read {
        path: PathBuf,
        message: String,
    },
    MissingFront {
        path: PathBuf,
        id: String,
        line: usize,
    },
    Strategy {
        path: PathBuf,
        id: String,
        line: usize,
        message: String,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::MissingFront { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Scan { message } => write!(f, "{}", message),
            // the message already names the file
            Diagnostic::Read { message, .. } => write!(f, "{}", message),
            Diagnostic::MissingFront { path, id, line } => {
                write!(f, "{}:{}: no front for card {}", path.display(), line, id)
            }
            Diagnostic::Strategy {
                path,
                id,
                line,
                message,
            } => write!(f, "{}:{}: card {}: {}", path.display(), line, id, message),
        }
    }
}
