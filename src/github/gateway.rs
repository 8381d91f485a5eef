//! Remote operations the publishing core needs from the hosting platform.

use super::models::{Asset, AssetId, NewRelease, Release, ReleaseId, Tag};
use crate::error::Result;
use std::path::Path;

/// Primitive tag, release and asset operations against one project
///
/// Every call is a single remote request. Implementations never retry;
/// failures surface as `Auth`, `NotFound`, `Transport` or `Api` errors.
#[allow(async_fn_in_trait)]
pub trait ReleaseGateway {
    /// Fetch a tag by name
    async fn get_tag(&self, name: &str) -> Result<Tag>;

    /// List tags, most recent first
    async fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Find the release attached to a tag, `None` if there is none
    async fn find_release_by_tag(&self, tag_name: &str) -> Result<Option<Release>>;

    /// Create a release
    async fn create_release(&self, request: &NewRelease) -> Result<Release>;

    /// Delete a release (its assets go with it)
    async fn delete_release(&self, release_id: ReleaseId) -> Result<()>;

    /// List assets attached to a release
    async fn list_assets(&self, release_id: ReleaseId) -> Result<Vec<Asset>>;

    /// Delete an asset
    async fn delete_asset(&self, asset_id: AssetId) -> Result<()>;

    /// Upload a local file as a release asset named `asset_name`
    async fn upload_asset(
        &self,
        release: &Release,
        local_path: &Path,
        asset_name: &str,
        content_type: &str,
    ) -> Result<Asset>;
}
