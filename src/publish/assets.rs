//! Asset synchronization: upload local files, replacing same-named assets.

use crate::error::{ReleaseError, Result};
use crate::github::{Asset, ProjectRef, Release, ReleaseGateway, content_type};
use std::path::{Path, PathBuf};

/// A local file checked and ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAsset {
    /// Path as given by the caller
    pub path: PathBuf,
    /// Asset name on the release (the file's base name)
    pub name: String,
    /// Detected MIME type
    pub content_type: &'static str,
    /// Size in bytes
    pub size: u64,
}

impl LocalAsset {
    /// Check that `path` is a readable regular file and derive its asset name
    pub async fn inspect(path: &Path) -> Result<Self> {
        let local_error = |reason: String| ReleaseError::LocalFile {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| local_error(format!("the file does not exist ({})", e)))?;
        if !metadata.is_file() {
            return Err(local_error("not a regular file".to_string()));
        }
        tokio::fs::File::open(path)
            .await
            .map_err(|e| local_error(format!("the file is not readable ({})", e)))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| local_error("the file name is not valid UTF-8".to_string()))?
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            content_type: content_type::for_path(path),
            size: metadata.len(),
        })
    }
}

/// Uploads assets one at a time in input order
pub struct AssetSynchronizer<'a, G> {
    gateway: &'a G,
    project: &'a ProjectRef,
}

impl<'a, G: ReleaseGateway> AssetSynchronizer<'a, G> {
    /// Create a synchronizer for one project
    pub fn new(gateway: &'a G, project: &'a ProjectRef) -> Self {
        Self { gateway, project }
    }

    /// Upload every file to `release`, deleting same-named assets first
    ///
    /// Stops at the first failure. Assets uploaded before the failure stay
    /// on the release.
    pub async fn sync(&self, release: &Release, files: &[PathBuf]) -> Result<Vec<Asset>> {
        let mut uploaded = Vec::with_capacity(files.len());

        for path in files {
            match self.sync_one(release, path).await {
                Ok(asset) => uploaded.push(asset),
                Err(e) => {
                    log::error!(
                        "Stopped after uploading {} of {} asset(s) to release \"{}\"",
                        uploaded.len(),
                        files.len(),
                        release.tag_name
                    );
                    return Err(e);
                }
            }
        }

        Ok(uploaded)
    }

    async fn sync_one(&self, release: &Release, path: &Path) -> Result<Asset> {
        let local = LocalAsset::inspect(path).await?;

        let existing = self.gateway.list_assets(release.id).await?;
        for asset in existing.iter().filter(|asset| asset.name == local.name) {
            self.gateway.delete_asset(asset.id).await?;
            log::info!(
                "Deleted the asset \"{}\" attached to release \"{}\" of \"{}\"",
                asset.name,
                release.tag_name,
                self.project
            );
        }

        self.gateway
            .upload_asset(release, &local.path, &local.name, local.content_type)
            .await
    }
}
