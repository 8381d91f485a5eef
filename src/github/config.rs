//! Connection settings for the GitHub REST API.

use super::models::{Credential, ProjectRef};
use crate::error::{CliError, ReleaseError, Result};
use url::Url;

/// Default GitHub server hostname
pub const DEFAULT_GITHUB_SERVER: &str = "github.com";

/// Environment variable overriding the computed API root
pub const API_ROOT_ENV: &str = "GITHUB_BINARY_UPLOAD_API_ROOT";

/// Configuration for one publishing session
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Normalized server hostname
    pub server: String,
    /// Target project
    pub project: ProjectRef,
    /// Credentials sent with every request
    pub credential: Credential,
    /// REST API root, e.g. `https://api.github.com`
    pub api_root: Url,
}

impl GitHubConfig {
    /// Build a config, honoring the API root override from the environment
    pub fn new(server: &str, project: ProjectRef, credential: Credential) -> Result<Self> {
        let server = normalize_server(server)?;
        let override_root = std::env::var(API_ROOT_ENV).ok();
        let api_root = api_root_for(&server, override_root.as_deref())?;

        Ok(Self {
            server,
            project,
            credential,
            api_root,
        })
    }
}

/// Strip an optional `scheme://` prefix and trailing slashes from a server name
pub fn normalize_server(server: &str) -> Result<String> {
    let host = match server.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            rest
        }
        Some(_) => {
            return Err(ReleaseError::Cli(CliError::InvalidServerName {
                server: server.to_string(),
            }));
        }
        None => server,
    };
    let host = host.trim_end_matches('/');

    if host.is_empty() || host.contains('/') || host.chars().any(char::is_whitespace) {
        return Err(ReleaseError::Cli(CliError::InvalidServerName {
            server: server.to_string(),
        }));
    }

    Ok(host.to_string())
}

/// Compute the API root for a server: `https://api.<server>` unless overridden
pub fn api_root_for(server: &str, override_root: Option<&str>) -> Result<Url> {
    let raw = match override_root.map(str::trim).filter(|root| !root.is_empty()) {
        Some(root) => root.trim_end_matches('/').to_string(),
        None => format!("https://api.{}", server),
    };

    Url::parse(&raw).map_err(|e| {
        ReleaseError::Cli(CliError::InvalidServerName {
            server: format!("{} ({})", raw, e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_server_strips_scheme_and_slash() {
        assert_eq!(normalize_server("github.com").unwrap(), "github.com");
        assert_eq!(normalize_server("https://github.com/").unwrap(), "github.com");
        assert_eq!(
            normalize_server("http://git.example.org").unwrap(),
            "git.example.org"
        );
    }

    #[test]
    fn test_normalize_server_rejects_garbage() {
        assert!(normalize_server("").is_err());
        assert!(normalize_server("https://").is_err());
        assert!(normalize_server("github.com/alice").is_err());
        assert!(normalize_server("1http://github.com").is_err());
    }

    #[test]
    fn test_api_root_default_and_override() {
        let root = api_root_for("github.com", None).unwrap();
        assert_eq!(root.as_str(), "https://api.github.com/");

        let root = api_root_for("ghe.corp", Some("https://ghe.corp/api/v3/")).unwrap();
        assert_eq!(root.as_str(), "https://ghe.corp/api/v3");

        let root = api_root_for("github.com", Some("  ")).unwrap();
        assert_eq!(root.host_str(), Some("api.github.com"));
    }
}
