//! Release reconciliation: exactly one freshly created release per tag.

use crate::error::{ReleaseError, Result};
use crate::github::{NewRelease, ProjectRef, Release, ReleaseGateway, Tag};

/// Replaces whatever release a tag has with a new one
///
/// Releases are never patched. An existing release is deleted (taking its
/// assets with it) and a new one is created, so no stale title, body or
/// draft flag survives a rerun. Between the two calls the tag briefly has no
/// release; an external actor creating one in that window makes the creation
/// fail with `ReleaseCreation`.
pub struct ReleaseReconciler<'a, G> {
    gateway: &'a G,
    project: &'a ProjectRef,
}

impl<'a, G: ReleaseGateway> ReleaseReconciler<'a, G> {
    /// Create a reconciler for one project
    pub fn new(gateway: &'a G, project: &'a ProjectRef) -> Self {
        Self { gateway, project }
    }

    /// Look up the release currently attached to `tag`
    pub async fn existing_release(&self, tag: &Tag) -> Result<Option<Release>> {
        let existing = self.gateway.find_release_by_tag(&tag.name).await?;
        if let Some(release) = &existing {
            log::info!(
                "Fetched the existing release \"{}\" (id {}) in the GitHub repository \"{}\"",
                tag.name,
                release.id,
                self.project
            );
        }
        Ok(existing)
    }

    /// Make `tag` carry exactly one new, empty release
    pub async fn reconcile(&self, tag: &Tag) -> Result<Release> {
        if let Some(existing) = self.existing_release(tag).await? {
            self.delete(tag, &existing).await?;
        }

        let request = NewRelease::for_tag(tag);
        self.gateway
            .create_release(&request)
            .await
            .map_err(|e| match e {
                ReleaseError::Auth { .. }
                | ReleaseError::NotFound { .. }
                | ReleaseError::Transport { .. } => e,
                other => ReleaseError::ReleaseCreation {
                    tag: tag.name.clone(),
                    reason: other.to_string(),
                },
            })
    }

    /// Delete a release; a 404 counts as success once the tag is confirmed release-free
    async fn delete(&self, tag: &Tag, existing: &Release) -> Result<()> {
        match self.gateway.delete_release(existing.id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                if self.gateway.find_release_by_tag(&tag.name).await?.is_some() {
                    return Err(e);
                }
                log::warn!(
                    "The release {} of \"{}\" was already gone when deleting it",
                    existing.id,
                    tag.name
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
