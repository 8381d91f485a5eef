//! Tag resolution: explicit tag name or the project's latest tag.

use crate::error::{CliError, ReleaseError, Result};
use crate::github::{ProjectRef, ReleaseGateway, Tag};

/// Turns a tag argument or a "use latest" request into a concrete tag
pub struct TagResolver<'a, G> {
    gateway: &'a G,
    project: &'a ProjectRef,
}

impl<'a, G: ReleaseGateway> TagResolver<'a, G> {
    /// Create a resolver for one project
    pub fn new(gateway: &'a G, project: &'a ProjectRef) -> Self {
        Self { gateway, project }
    }

    /// Resolve the tag to publish
    ///
    /// With `use_latest` the first entry of the remote tag list wins and any
    /// explicit tag is ignored. An explicit tag is returned verbatim without
    /// a remote lookup; a missing tag shows up later as `NotFound` when the
    /// release is created.
    pub async fn resolve(&self, tag: Option<&str>, use_latest: bool) -> Result<Tag> {
        if use_latest {
            if let Some(ignored) = tag {
                log::debug!("Ignoring tag \"{}\" because the latest tag was requested", ignored);
            }
            return self.latest().await;
        }

        match tag {
            Some(name) if !name.is_empty() => Ok(Tag::new(name)),
            _ => Err(ReleaseError::Cli(CliError::MissingArgument {
                argument: "tag".to_string(),
            })),
        }
    }

    async fn latest(&self) -> Result<Tag> {
        log::info!(
            "Fetching the latest tag from the GitHub repository \"{}\"",
            self.project
        );
        let tag = self
            .gateway
            .list_tags()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ReleaseError::NoTags {
                project: self.project.to_string(),
            })?;

        log::info!(
            "Fetched the latest tag \"{}\" from the GitHub repository \"{}\"",
            tag.name,
            self.project
        );
        Ok(tag)
    }
}
