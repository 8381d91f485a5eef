//! In-memory gateway used by the publishing tests.

use crate::error::{ReleaseError, Result};
use crate::github::{Asset, AssetId, NewRelease, Release, ReleaseGateway, ReleaseId, Tag};
use std::cell::RefCell;
use std::path::Path;

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetTag(String),
    ListTags,
    FindReleaseByTag(String),
    CreateRelease(String),
    DeleteRelease(ReleaseId),
    ListAssets(ReleaseId),
    DeleteAsset(AssetId),
    UploadAsset(String),
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Call::CreateRelease(_)
                | Call::DeleteRelease(_)
                | Call::DeleteAsset(_)
                | Call::UploadAsset(_)
        )
    }
}

#[derive(Debug, Default)]
struct State {
    tags: Vec<Tag>,
    releases: Vec<(Release, Vec<Asset>)>,
    next_id: u64,
    calls: Vec<Call>,
}

/// Fake platform holding tags, releases and their assets
#[derive(Debug, Default)]
pub struct FakeGateway {
    state: RefCell<State>,
    /// Uploads of this asset name fail with a transport error
    fail_upload_of: Option<String>,
    /// Release deletion reports 404 after removing the release
    delete_release_reports_not_found: bool,
    /// Release deletion reports 404 and leaves the release in place
    delete_release_is_stuck: bool,
}

impl FakeGateway {
    pub fn with_tags(tags: &[&str]) -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.state.borrow_mut();
            state.tags = tags.iter().map(|name| Tag::new(*name)).collect();
            state.next_id = 100;
        }
        gateway
    }

    pub fn failing_upload_of(mut self, asset_name: &str) -> Self {
        self.fail_upload_of = Some(asset_name.to_string());
        self
    }

    pub fn with_racing_release_delete(mut self) -> Self {
        self.delete_release_reports_not_found = true;
        self
    }

    pub fn with_stuck_release_delete(mut self) -> Self {
        self.delete_release_is_stuck = true;
        self
    }

    /// Seed an existing release with assets of the given names
    pub fn add_release(&self, tag: &str, asset_names: &[&str]) -> ReleaseId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let assets: Vec<Asset> = asset_names
            .iter()
            .map(|name| Asset {
                id: state.next_id(),
                name: name.to_string(),
                size: 1,
                content_type: "application/octet-stream".to_string(),
            })
            .collect();
        state.releases.push((
            Release {
                id,
                tag_name: tag.to_string(),
                name: Some(format!("old {}", tag)),
                body: Some("stale notes".to_string()),
                draft: true,
                prerelease: true,
                upload_url: format!("https://uploads.example.test/releases/{}/assets", id),
            },
            assets,
        ));
        id
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutating).collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    pub fn release_for(&self, tag: &str) -> Option<Release> {
        self.state
            .borrow()
            .releases
            .iter()
            .find(|(release, _)| release.tag_name == tag)
            .map(|(release, _)| release.clone())
    }

    pub fn asset_names(&self, release_id: ReleaseId) -> Vec<String> {
        self.state
            .borrow()
            .releases
            .iter()
            .find(|(release, _)| release.id == release_id)
            .map(|(_, assets)| assets.iter().map(|a| a.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn assets(&self, release_id: ReleaseId) -> Vec<Asset> {
        self.state
            .borrow()
            .releases
            .iter()
            .find(|(release, _)| release.id == release_id)
            .map(|(_, assets)| assets.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn not_found(what: impl Into<String>) -> ReleaseError {
    ReleaseError::NotFound { what: what.into() }
}

impl ReleaseGateway for FakeGateway {
    async fn get_tag(&self, name: &str) -> Result<Tag> {
        self.record(Call::GetTag(name.to_string()));
        let state = self.state.borrow();
        state
            .tags
            .iter()
            .find(|tag| tag.name == name)
            .cloned()
            .ok_or_else(|| not_found(format!("tag {}", name)))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.record(Call::ListTags);
        Ok(self.state.borrow().tags.clone())
    }

    async fn find_release_by_tag(&self, tag_name: &str) -> Result<Option<Release>> {
        self.record(Call::FindReleaseByTag(tag_name.to_string()));
        Ok(self.release_for(tag_name))
    }

    async fn create_release(&self, request: &NewRelease) -> Result<Release> {
        self.record(Call::CreateRelease(request.tag_name.clone()));
        let mut state = self.state.borrow_mut();
        if !state.tags.iter().any(|tag| tag.name == request.tag_name) {
            return Err(not_found(format!("tag {}", request.tag_name)));
        }
        if state
            .releases
            .iter()
            .any(|(release, _)| release.tag_name == request.tag_name)
        {
            return Err(ReleaseError::Api {
                operation: "create release".to_string(),
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }

        let id = state.next_id();
        let release = Release {
            id,
            tag_name: request.tag_name.clone(),
            name: Some(request.name.clone()),
            body: Some(request.body.clone()),
            draft: request.draft,
            prerelease: request.prerelease,
            upload_url: format!("https://uploads.example.test/releases/{}/assets", id),
        };
        state.releases.push((release.clone(), Vec::new()));
        Ok(release)
    }

    async fn delete_release(&self, release_id: ReleaseId) -> Result<()> {
        self.record(Call::DeleteRelease(release_id));
        if self.delete_release_is_stuck {
            return Err(not_found(format!("release {}", release_id)));
        }
        let mut state = self.state.borrow_mut();
        let before = state.releases.len();
        state.releases.retain(|(release, _)| release.id != release_id);
        if state.releases.len() == before || self.delete_release_reports_not_found {
            return Err(not_found(format!("release {}", release_id)));
        }
        Ok(())
    }

    async fn list_assets(&self, release_id: ReleaseId) -> Result<Vec<Asset>> {
        self.record(Call::ListAssets(release_id));
        Ok(self.assets(release_id))
    }

    async fn delete_asset(&self, asset_id: AssetId) -> Result<()> {
        self.record(Call::DeleteAsset(asset_id));
        let mut state = self.state.borrow_mut();
        for (_, assets) in state.releases.iter_mut() {
            if let Some(position) = assets.iter().position(|a| a.id == asset_id) {
                assets.remove(position);
                return Ok(());
            }
        }
        Err(not_found(format!("asset {}", asset_id)))
    }

    async fn upload_asset(
        &self,
        release: &Release,
        local_path: &Path,
        asset_name: &str,
        content_type: &str,
    ) -> Result<Asset> {
        self.record(Call::UploadAsset(asset_name.to_string()));
        if self.fail_upload_of.as_deref() == Some(asset_name) {
            return Err(ReleaseError::Transport {
                operation: format!("upload asset \"{}\"", asset_name),
                reason: "connection reset".to_string(),
            });
        }

        let size = std::fs::metadata(local_path)?.len();
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let assets = state
            .releases
            .iter_mut()
            .find(|(r, _)| r.id == release.id)
            .map(|(_, assets)| assets)
            .ok_or_else(|| not_found(format!("release {}", release.id)))?;
        if assets.iter().any(|a| a.name == asset_name) {
            return Err(ReleaseError::Api {
                operation: "upload asset".to_string(),
                status: 422,
                message: "already_exists".to_string(),
            });
        }

        let asset = Asset {
            id,
            name: asset_name.to_string(),
            size,
            content_type: content_type.to_string(),
        };
        assets.push(asset.clone());
        Ok(asset)
    }
}
