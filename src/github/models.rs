//! Data model shared by the gateway and the publishing core.

use crate::error::{CliError, ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Release body used for every release this tool creates
pub const DEFAULT_RELEASE_BODY: &str = "";

/// GitHub project in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl ProjectRef {
    /// Create a project reference from its two parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for ProjectRef {
    type Err = ReleaseError;

    fn from_str(project: &str) -> Result<Self> {
        let invalid = || {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: format!(
                    "Invalid GitHub project format: '{}'. Expected: <owner>/<name>",
                    project
                ),
            })
        };

        let (owner, name) = project.split_once('/').ok_or_else(invalid)?;
        let valid_part = |part: &str| {
            !part.is_empty() && !part.contains('/') && !part.chars().any(char::is_whitespace)
        };
        if !valid_part(owner) || !valid_part(name) || name.ends_with(".git") {
            return Err(invalid());
        }

        Ok(Self::new(owner, name))
    }
}

/// Opaque release identifier assigned by the platform
pub type ReleaseId = u64;

/// Opaque asset identifier assigned by the platform
pub type AssetId = u64;

/// A tag as listed by the platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    /// Tag name, e.g. `v1.0`
    pub name: String,
}

impl Tag {
    /// Tag with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A release object attached to a tag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release ID
    pub id: ReleaseId,
    /// Tag the release belongs to
    pub tag_name: String,
    /// Display title
    #[serde(default)]
    pub name: Option<String>,
    /// Release notes
    #[serde(default)]
    pub body: Option<String>,
    /// Whether this is a draft
    #[serde(default)]
    pub draft: bool,
    /// Whether this is a prerelease
    #[serde(default)]
    pub prerelease: bool,
    /// Asset upload endpoint, template suffix already stripped by the gateway
    pub upload_url: String,
}

/// Asset attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    /// Asset ID
    pub id: AssetId,
    /// File name, the asset's identity within a release
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// MIME type reported by the platform
    #[serde(default)]
    pub content_type: String,
}

/// Request body for release creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    /// Tag to publish
    pub tag_name: String,
    /// Display title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
}

impl NewRelease {
    /// Published, non-prerelease release titled after its tag
    pub fn for_tag(tag: &Tag) -> Self {
        Self {
            tag_name: tag.name.clone(),
            name: tag.name.clone(),
            body: DEFAULT_RELEASE_BODY.to_string(),
            draft: false,
            prerelease: false,
        }
    }
}

/// Username and password or access token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Account name
    pub username: String,
    /// Password or personal access token
    pub secret: String,
}

impl Credential {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}
