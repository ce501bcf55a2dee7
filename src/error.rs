//! Centralized error handling for md2wechat
//!
//! This module provides a unified error type that covers all error scenarios
//! in the crate: storage I/O, markdown rendering, tree inlining, themes and
//! clipboard access. Public export operations never surface these errors
//! directly; they log them and report a boolean outcome instead.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the crate.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to read the storage file
    StorageLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to write the storage file
    StorageSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Stored or imported data is not valid JSON of the expected shape
    StorageParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Export Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Resolved style records and the cloned tree disagree on element count
    NodeCountMismatch { resolved: usize, cloned: usize },

    /// Failed to access the system clipboard
    ClipboardAccess(String),

    /// The clipboard rejected the write
    ClipboardWrite(String),

    /// The host has no legacy copy-selection command
    CopyCommandUnsupported,

    /// A scratch container could not be found in the host document
    ScratchMissing(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Theme Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// No theme with the given id
    ThemeNotFound(String),

    /// Theme data failed validation
    InvalidTheme(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Application Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic application error with a message
    Application(String),
}

// Implement From traits for convenient error conversion
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::StorageParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<arboard::Error> for Error {
    fn from(err: arboard::Error) -> Self {
        Error::ClipboardWrite(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Storage Errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::StorageLoad { path, source } => {
                write!(f, "Failed to load storage from '{}': {}", path.display(), source)
            }
            Error::StorageSave { path, source } => {
                write!(f, "Failed to save storage to '{}': {}", path.display(), source)
            }
            Error::StorageParse { message, .. } => {
                write!(f, "Invalid stored data: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }

            // Export Errors
            Error::NodeCountMismatch { resolved, cloned } => write!(
                f,
                "Resolved {} style records but the clone has {} elements",
                resolved, cloned
            ),
            Error::ClipboardAccess(msg) => write!(f, "Clipboard access error: {}", msg),
            Error::ClipboardWrite(msg) => write!(f, "Clipboard write error: {}", msg),
            Error::CopyCommandUnsupported => {
                write!(f, "Copy command is not supported by the host")
            }
            Error::ScratchMissing(id) => write!(f, "Scratch container {} is not attached", id),

            // Theme Errors
            Error::ThemeNotFound(id) => write!(f, "Theme '{}' not found", id),
            Error::InvalidTheme(msg) => write!(f, "Invalid theme: {}", msg),

            // Application Errors
            Error::Application(msg) => write!(f, "{}", msg),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::StorageLoad { source, .. } => Some(source.as_ref()),
            Error::StorageSave { source, .. } => Some(source.as_ref()),
            Error::StorageParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
