use smol_str::SmolStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("Name not found: {0}")]
    NameNotFound(SmolStr),
    #[error("Invalid nonlocal scope level {level}: {reason}")]
    InvalidLevel { level: String, reason: &'static str },
    #[error("{scope} has no attribute '{name}'")]
    NoAttribute { scope: String, name: SmolStr },
    #[error("Globals do not provide a builtins mapping under '{0}'")]
    MissingBuiltins(SmolStr),
    #[error("Hierarchy walk for '{name}' exceeded the limit of {limit} nodes")]
    WalkLimitExceeded { name: SmolStr, limit: usize },
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScopeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScopeError::NameNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
