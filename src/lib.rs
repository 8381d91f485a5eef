//! # github-binary-upload
//!
//! Publish a GitHub release for an existing tag and attach local files to it.
//!
//! Runs are idempotent: a release already attached to the tag is deleted and
//! recreated, and an asset with the same file name as a new upload is
//! replaced. Re-running from CI never produces duplicate releases or assets.
//!
//! ## Usage
//!
//! ```bash
//! github-binary-upload alice/demo v1.0 dist/demo.zip   # publish v1.0
//! github-binary-upload --latest alice/demo dist/*      # publish the newest tag
//! github-binary-upload --dry-run alice/demo v1.0 a.zip # only show the plan
//! ```
//!
//! ## Library
//!
//! [`publish_release_from_tag`] runs the whole workflow against the GitHub API.
//! [`Publisher`] runs it against any [`ReleaseGateway`].

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod credentials;
pub mod error;
pub mod github;
pub mod publish;

pub use error::{CliError, ReleaseError, Result};
pub use github::{Credential, GitHubConfig, HttpGateway, ProjectRef, ReleaseGateway};
pub use publish::{PublishOptions, PublishOutcome, Publisher, publish_release_from_tag};
