//! Command line argument parsing and validation.

use crate::credentials::DEFAULT_CREDENTIALS_FILE;
use crate::error::{CliError, Result};
use crate::github::{DEFAULT_GITHUB_SERVER, ProjectRef, normalize_server};
use clap::Parser;
use std::path::PathBuf;

/// Publish releases from tags with attached files on GitHub
#[derive(Parser, Debug, Clone)]
#[command(
    name = "github-binary-upload",
    version,
    about = "Publish releases from tags with attached files on GitHub",
    long_about = "Publish a GitHub release for an existing tag and attach files to it.

An existing release of the tag is replaced, and assets with the same name
as a given file are replaced, so the command is safe to re-run from CI.

Usage:
  github-binary-upload alice/demo v1.0 dist/demo.zip dist/demo.whl
  github-binary-upload --latest alice/demo dist/demo.zip
  echo \"$TOKEN\" | github-binary-upload --user ci-bot alice/demo v1.0 dist/*"
)]
pub struct Args {
    /// GitHub server hostname
    #[arg(short = 'g', long, value_name = "HOST", default_value = DEFAULT_GITHUB_SERVER)]
    pub github_server: String,

    /// File containing username and password/access token on two separate lines
    #[arg(short = 'c', long, value_name = "PATH", default_value = DEFAULT_CREDENTIALS_FILE)]
    pub credentials_file: String,

    /// Get the latest tag from the GitHub API
    #[arg(short = 'l', long)]
    pub latest: bool,

    /// Only print which release would be published
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// User account for the GitHub API; the password is read from stdin
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub username: Option<String>,

    /// GitHub project in the format "<owner>/<project name>"
    #[arg(index = 1, value_name = "PROJECT")]
    pub project: Option<String>,

    /// Tag that will be published as a release, ignored if --latest is given
    #[arg(index = 2, value_name = "TAG")]
    pub tag: Option<String>,

    /// Files that will be attached to the release
    #[arg(index = 3, value_name = "ASSETS")]
    pub assets: Vec<PathBuf>,
}

/// Validated, normalized arguments for one publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Target project
    pub project: ProjectRef,
    /// Explicit tag, `None` in latest mode
    pub tag: Option<String>,
    /// Use the most recent tag
    pub latest: bool,
    /// Files to attach, in upload order
    pub assets: Vec<PathBuf>,
    /// Normalized server hostname
    pub github_server: String,
    /// Credentials file as given (before `~` expansion)
    pub credentials_file: String,
    /// Read the secret from stdin for this user
    pub username: Option<String>,
    /// Only plan
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments and turn them into a [`PublishRequest`]
    ///
    /// In latest mode the second positional argument is really the first
    /// asset, so it moves to the front of the asset list.
    pub fn into_request(self) -> Result<PublishRequest> {
        let github_server = normalize_server(&self.github_server)?;

        let project: ProjectRef = self
            .project
            .as_deref()
            .ok_or_else(|| CliError::MissingArgument {
                argument: "PROJECT".to_string(),
            })?
            .parse()?;

        let mut assets = self.assets;
        let tag = match (self.latest, self.tag) {
            (true, Some(first_asset)) => {
                assets.insert(0, PathBuf::from(first_asset));
                None
            }
            (true, None) => None,
            (false, Some(tag)) => Some(tag),
            (false, None) => {
                return Err(CliError::MissingArgument {
                    argument: "TAG".to_string(),
                }
                .into());
            }
        };

        Ok(PublishRequest {
            project,
            tag,
            latest: self.latest,
            assets,
            github_server,
            credentials_file: self.credentials_file,
            username: self.username,
            dry_run: self.dry_run,
        })
    }
}
