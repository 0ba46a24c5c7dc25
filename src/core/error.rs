//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`DecodeError`] / [`EncodeError`] - Share-token codec failures
//! - [`ValidationError`] - Rejected file operations
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`ReplError`] - Sandbox bridge failures
//! - [`ExportError`] - Project archive generation failures
//!
//! None of these are fatal: the worst user-visible outcome is a stale
//! preview or an inline warning.

use std::fmt;

/// Malformed share token. Recovered by falling back to default project
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Token is not valid URL-safe base64.
    Base64,
    /// Token is not valid compressed data.
    Compression,
    /// Decompressed data is not a valid project state object.
    Json,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => write!(f, "share token is not valid URL-safe base64"),
            Self::Compression => write!(f, "share token is not valid compressed data"),
            Self::Json => write!(f, "share token does not contain a valid project state"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Project state that cannot be serialized into a share token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A real file uses the reserved options key as its path.
    ReservedPath(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedPath(path) => {
                write!(f, "file path \"{}\" collides with the reserved options key", path)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Invalid file operation. Surfaced inline; state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Target file does not exist.
    FileNotFound(String),
    /// Rename target is empty or identical to the source.
    InvalidRename { old: String, new: String },
    /// The playground depends on this file.
    Protected(String),
    /// Hidden files are managed by the playground.
    Hidden(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => {
                write!(f, "Could not find \"{}\", file not found", path)
            }
            Self::InvalidRename { old, new } => {
                write!(f, "Cannot rename \"{}\" to \"{}\"", old, new)
            }
            Self::Protected(path) => {
                write!(f, "Cannot modify {}, the playground requires it", path)
            }
            Self::Hidden(path) => write!(f, "Cannot modify hidden file {}", path),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Failed to create HTTP request
    RequestCreationFailed,
    /// Network request failed (timeout, CORS, etc.)
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    HttpError(u16),
    /// Failed to read response body
    ResponseReadFailed,
    /// Invalid response content (not text)
    InvalidContent,
    /// JSON parsing error
    JsonParseError(String),
    /// Request timed out
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError(status) => write!(f, "HTTP error: {}", status),
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::InvalidContent => write!(f, "Invalid response content"),
            Self::JsonParseError(msg) => write!(f, "JSON parse error: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Sandbox bridge failures.
#[derive(Debug, Clone)]
pub enum ReplError {
    /// The sandbox host object is not present on the page.
    HostMissing,
    /// A call into the sandbox host rejected.
    CallFailed(String),
    /// Loading a compiler module failed.
    CompilerLoadFailed(String),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostMissing => write!(f, "sandbox host is not available on this page"),
            Self::CallFailed(msg) => write!(f, "sandbox call failed: {}", msg),
            Self::CompilerLoadFailed(msg) => write!(f, "failed to load compiler: {}", msg),
        }
    }
}

impl std::error::Error for ReplError {}

/// Project archive generation failures.
#[derive(Debug, Clone)]
pub enum ExportError {
    /// Writing an archive entry failed.
    Archive(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive(msg) => write!(f, "failed to build project archive: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}
