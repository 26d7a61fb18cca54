use crate::error::SourceError;
use std::fmt;

/// User-facing status line
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Finding,
    Loaded { count: usize },
    NoCounties,
    Hidden,
    Failed(SourceError),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Ready"),
            Status::Finding => write!(f, "Finding county at map center..."),
            Status::Loaded { count: 1 } => write!(f, "1 county loaded"),
            Status::Loaded { count } => write!(f, "{} counties loaded", count),
            Status::NoCounties => write!(f, "No counties found in this area"),
            Status::Hidden => write!(f, "Counties hidden"),
            Status::Failed(err) => write!(f, "Error loading county boundary: {}", err.advice()),
        }
    }
}
