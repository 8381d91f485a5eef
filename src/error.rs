//! Error types for release publishing.
//!
//! Every failure the tool can report is a [`ReleaseError`] variant. Each variant
//! maps to a distinct process exit code and a set of recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publishing operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all publishing operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Credentials could not be loaded
    #[error("Could not read credentials from \"{}\": {reason}", .path.display())]
    Credentials {
        /// Credentials file (or `<stdin>`)
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Local asset file is missing or unreadable
    #[error("Asset file \"{}\" cannot be uploaded: {reason}", .path.display())]
    LocalFile {
        /// Path given on the command line
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// The platform rejected the credentials (401/403)
    #[error("Authentication failed during {operation}. Check the username and access token.")]
    Auth {
        /// Gateway operation that was rejected
        operation: String,
    },

    /// Project, tag or release does not exist
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing object
        what: String,
    },

    /// Latest-tag mode on a project without tags
    #[error("The repository \"{project}\" has no tags yet.")]
    NoTags {
        /// Project in `owner/name` form
        project: String,
    },

    /// Release creation was rejected by the platform
    #[error("Could not create the release \"{tag}\": {reason}")]
    ReleaseCreation {
        /// Tag the release was created for
        tag: String,
        /// Reason for the error
        reason: String,
    },

    /// Any other non-success HTTP status
    #[error("GitHub API error during {operation}: HTTP {status}: {message}")]
    Api {
        /// Gateway operation that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Message reported by the platform
        message: String,
    },

    /// Response body could not be understood
    #[error("Invalid response during {operation}: {reason}")]
    InvalidResponse {
        /// Gateway operation that failed
        operation: String,
        /// Reason for the error
        reason: String,
    },

    /// Network failure or server-side (5xx) error
    #[error("Transport error during {operation}: {reason}")]
    Transport {
        /// Gateway operation that failed
        operation: String,
        /// Reason for the error
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Server name could not be normalized
    #[error("\"{server}\" is not a valid server name.")]
    InvalidServerName {
        /// Server as given on the command line
        server: String,
    },
}

impl ReleaseError {
    /// Process exit code for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Io(_) => 1,
            ReleaseError::Cli(_) => 2,
            ReleaseError::Credentials { .. } => 3,
            ReleaseError::LocalFile { .. } => 4,
            ReleaseError::Auth { .. } => 5,
            ReleaseError::NotFound { .. } => 6,
            ReleaseError::NoTags { .. } => 7,
            ReleaseError::ReleaseCreation { .. } => 8,
            ReleaseError::Api { .. } => 9,
            ReleaseError::InvalidResponse { .. } => 10,
            ReleaseError::Transport { .. } => 11,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Credentials { path, .. } => vec![
                format!(
                    "Write \"<username>\\n<access token>\" to \"{}\"",
                    path.display()
                ),
                "Or pass --user and provide the access token on stdin".to_string(),
            ],
            ReleaseError::Auth { .. } => vec![
                "Verify the access token is valid and has the \"repo\" scope".to_string(),
                "Check that the username matches the token owner".to_string(),
            ],
            ReleaseError::NotFound { .. } => vec![
                "Check the project is given as <owner>/<name>".to_string(),
                "Make sure the tag has been pushed: git push --tags".to_string(),
            ],
            ReleaseError::NoTags { .. } => vec![
                "Create and push a tag first: git tag v1.0 && git push --tags".to_string(),
            ],
            ReleaseError::LocalFile { .. } => vec![
                "Check the asset path exists and is a readable regular file".to_string(),
                "Assets uploaded before this one are kept; re-run after fixing the path"
                    .to_string(),
            ],
            ReleaseError::Transport { .. } => vec![
                "Check network connectivity and the --github-server value".to_string(),
                "Re-run the command; publishing is safe to repeat".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// True for the "does not exist" family, used where absence is acceptable
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReleaseError::NotFound { .. })
    }
}
