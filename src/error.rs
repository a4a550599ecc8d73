use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbConvertError {
    #[error("Target not found: {path}")]
    TargetNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Wrong extension for {path}: expected .{expected}")]
    WrongExtension { path: PathBuf, expected: String },

    #[error("Failed to extract text from {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("Failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },

    #[error("Required tool not found: {tool}")]
    ToolMissing { tool: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for KbConvertError {
    fn user_message(&self) -> String {
        match self {
            KbConvertError::TargetNotFound { path } => {
                format!("Target not found: {}", path.display())
            }
            KbConvertError::NotADirectory { path } => {
                format!("{} is not a directory", path.display())
            }
            KbConvertError::WrongExtension { path, expected } => {
                format!(
                    "{} does not have the expected .{} extension",
                    path.display(),
                    expected
                )
            }
            KbConvertError::Extraction { path, message } => {
                format!("Could not extract text from {}: {}", path.display(), message)
            }
            KbConvertError::Render { path, message } => {
                format!("Could not render {}: {}", path.display(), message)
            }
            KbConvertError::ToolMissing { tool } => {
                format!("The external tool '{}' is not installed or not on PATH", tool)
            }
            KbConvertError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            KbConvertError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            KbConvertError::TargetNotFound { .. } => Some(
                "Check the path passed with -f/-d, or configure [roots] in kbconvert.toml."
                    .to_string(),
            ),
            KbConvertError::WrongExtension { expected, .. } => Some(format!(
                "Single-file mode only accepts .{} files for this direction.",
                expected
            )),
            KbConvertError::ToolMissing { tool } => Some(format!(
                "Install {} and make sure it is on your PATH (see https://pandoc.org/installing.html).",
                tool
            )),
            KbConvertError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for KbConvertError {
    fn from(error: toml::de::Error) -> Self {
        KbConvertError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KbConvertError>;
