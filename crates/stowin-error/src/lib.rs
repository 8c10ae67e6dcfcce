use std::fmt;

#[derive(Debug)]
pub enum StowError {
    DuplicatePackage(String),
    UnknownPackage(String),
    SourceUnavailable(String, String),
    BuildFailed(String, String),
    ConflictWithForeignFile(String),
    DanglingLink(String),
    LockTimeout(String),
    StoreFailed(String, String),
    InvalidPattern(String, String),
    Io(String),
}

impl fmt::Display for StowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePackage(name) => {
                write!(f, "Package '{name}' is already installed")
            }
            Self::UnknownPackage(name) => {
                write!(f, "Package '{name}' is not installed")
            }
            Self::SourceUnavailable(spec, cause) => {
                write!(f, "Failed to obtain source '{spec}': {cause}")
            }
            Self::BuildFailed(step, output) => {
                write!(f, "Build step '{step}' failed:\n{output}")
            }
            Self::ConflictWithForeignFile(path) => {
                write!(f, "Refusing to overwrite existing file at {path}")
            }
            Self::DanglingLink(path) => {
                write!(f, "Dangling symlink at {path} does not resolve into any package")
            }
            Self::LockTimeout(path) => {
                write!(f, "Timed out waiting for lock on {path}")
            }
            Self::StoreFailed(name, cause) => {
                write!(f, "Failed to store package '{name}': {cause}")
            }
            Self::InvalidPattern(pattern, cause) => {
                write!(f, "Invalid ignore pattern '{pattern}': {cause}")
            }
            Self::Io(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for StowError {}

impl From<std::io::Error> for StowError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for StowError {
    fn from(err: anyhow::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StowError>;
