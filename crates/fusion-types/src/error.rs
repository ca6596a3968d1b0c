use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Couldn't open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No specification of {}", .missing.join(" and "))]
    MissingHeader { missing: Vec<&'static str> },

    #[error("Invalid line for {directive}: body ended before all values were read")]
    ShortDirective { directive: &'static str },

    #[error("Invalid value for {directive}: '{token}'")]
    InvalidToken {
        directive: &'static str,
        token: String,
    },

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FusionError {
    /// Directive keyword the failure is attributed to, if any.
    pub fn directive(&self) -> Option<&'static str> {
        match self {
            FusionError::ShortDirective { directive }
            | FusionError::InvalidToken { directive, .. } => Some(*directive),
            _ => None,
        }
    }
}

pub type FusionResult<T> = Result<T, FusionError>;
