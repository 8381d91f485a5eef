//! Publishing workflow: resolve the tag, replace the release, upload assets.
//!
//! [`Publisher`] drives the three steps against any [`ReleaseGateway`];
//! [`publish_release_from_tag`] wires it to the real GitHub API.

mod assets;
mod plan;
mod reconciler;
mod resolver;
#[cfg(test)]
pub(crate) mod testing;

pub use assets::{AssetSynchronizer, LocalAsset};
pub use plan::{PlannedAction, PublishPlan};
pub use reconciler::ReleaseReconciler;
pub use resolver::TagResolver;

use crate::error::Result;
use crate::github::{
    Asset, Credential, DEFAULT_GITHUB_SERVER, GitHubConfig, HttpGateway, ProjectRef, Release,
    ReleaseGateway, Tag,
};
use std::collections::HashSet;
use std::path::PathBuf;

/// Inputs of one publish run
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Target project
    pub project: ProjectRef,
    /// Tag to publish, ignored when `latest` is set
    pub tag: Option<String>,
    /// Publish the most recent tag
    pub latest: bool,
    /// Local files to attach, in upload order
    pub assets: Vec<PathBuf>,
    /// GitHub server hostname
    pub github_server: String,
    /// Credentials for the API
    pub credential: Credential,
    /// Only describe what would be done
    pub dry_run: bool,
}

impl PublishOptions {
    /// Options for publishing `tag` of `project` on github.com
    pub fn new(project: ProjectRef, tag: Option<String>, credential: Credential) -> Self {
        Self {
            project,
            tag,
            latest: false,
            assets: Vec::new(),
            github_server: DEFAULT_GITHUB_SERVER.to_string(),
            credential,
            dry_run: false,
        }
    }
}

/// Result of a publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The release was created and the assets uploaded
    Published {
        /// Resolved tag
        tag: Tag,
        /// The new release
        release: Release,
        /// Uploaded assets in input order
        assets: Vec<Asset>,
    },
    /// Dry run: nothing was changed
    Planned(PublishPlan),
}

/// Runs resolve → reconcile → sync for one project
pub struct Publisher<'a, G> {
    gateway: &'a G,
    project: &'a ProjectRef,
}

impl<'a, G: ReleaseGateway> Publisher<'a, G> {
    /// Create a publisher for one project
    pub fn new(gateway: &'a G, project: &'a ProjectRef) -> Self {
        Self { gateway, project }
    }

    /// Publish, or only plan when `dry_run` is set
    pub async fn run(
        &self,
        tag: Option<&str>,
        latest: bool,
        assets: &[PathBuf],
        dry_run: bool,
    ) -> Result<PublishOutcome> {
        if dry_run {
            return self.plan(tag, latest, assets).await.map(PublishOutcome::Planned);
        }

        let tag = TagResolver::new(self.gateway, self.project)
            .resolve(tag, latest)
            .await?;
        let release = ReleaseReconciler::new(self.gateway, self.project)
            .reconcile(&tag)
            .await?;
        let assets = AssetSynchronizer::new(self.gateway, self.project)
            .sync(&release, assets)
            .await?;

        Ok(PublishOutcome::Published {
            tag,
            release,
            assets,
        })
    }

    /// Make the same read-only decisions as [`Publisher::run`] without mutating anything
    ///
    /// The new release starts empty, so an asset deletion is only planned when
    /// two inputs share a file name and the later one replaces the earlier upload.
    pub async fn plan(
        &self,
        tag: Option<&str>,
        latest: bool,
        assets: &[PathBuf],
    ) -> Result<PublishPlan> {
        let tag = TagResolver::new(self.gateway, self.project)
            .resolve(tag, latest)
            .await?;

        let mut actions = Vec::with_capacity(assets.len() + 2);
        if let Some(existing) = ReleaseReconciler::new(self.gateway, self.project)
            .existing_release(&tag)
            .await?
        {
            actions.push(PlannedAction::DeleteRelease {
                tag: tag.name.clone(),
                id: existing.id,
            });
        }
        actions.push(PlannedAction::CreateRelease {
            tag: tag.name.clone(),
        });

        let mut planned_names = HashSet::new();
        for path in assets {
            let local = LocalAsset::inspect(path).await?;
            if !planned_names.insert(local.name.clone()) {
                actions.push(PlannedAction::DeleteAsset {
                    name: local.name.clone(),
                });
            }
            actions.push(PlannedAction::UploadAsset {
                name: local.name,
                path: local.path,
                content_type: local.content_type,
                size: local.size,
            });
        }

        for action in &actions {
            log::debug!("{}", action);
        }

        Ok(PublishPlan {
            project: self.project.clone(),
            tag,
            actions,
        })
    }
}

/// Publish a release for a tag of a GitHub project and attach assets
pub async fn publish_release_from_tag(options: &PublishOptions) -> Result<PublishOutcome> {
    let config = GitHubConfig::new(
        &options.github_server,
        options.project.clone(),
        options.credential.clone(),
    )?;
    let gateway = HttpGateway::new(config)?;

    Publisher::new(&gateway, &options.project)
        .run(
            options.tag.as_deref(),
            options.latest,
            &options.assets,
            options.dry_run,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, FakeGateway};
    use super::*;
    use crate::error::ReleaseError;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> ProjectRef {
        ProjectRef::new("alice", "demo")
    }

    fn asset_files(dir: &TempDir, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, name.as_bytes()).unwrap();
                path
            })
            .collect()
    }

    #[tokio::test]
    async fn test_fresh_tag_publishes_assets_in_order() {
        let dir = TempDir::new().unwrap();
        let files = asset_files(&dir, &["a.zip", "b.whl"]);
        let gateway = FakeGateway::with_tags(&["v1.0"]);
        let project = project();

        let outcome = Publisher::new(&gateway, &project)
            .run(Some("v1.0"), false, &files, false)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            PublishOutcome::Published { ref assets, .. } if assets.len() == 2
        ));
        assert_eq!(gateway.count(|c| matches!(c, Call::DeleteRelease(_))), 0);
        assert_eq!(gateway.count(|c| matches!(c, Call::DeleteAsset(_))), 0);
        assert_eq!(
            gateway.mutating_calls(),
            vec![
                Call::CreateRelease("v1.0".to_string()),
                Call::UploadAsset("a.zip".to_string()),
                Call::UploadAsset("b.whl".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_rerun_replaces_release_and_never_deletes_assets() {
        let dir = TempDir::new().unwrap();
        let files = asset_files(&dir, &["a.zip"]);
        let gateway = FakeGateway::with_tags(&["v1.0"]);
        let old_id = gateway.add_release("v1.0", &["a.zip"]);
        let project = project();

        let outcome = Publisher::new(&gateway, &project)
            .run(Some("v1.0"), false, &files, false)
            .await
            .unwrap();

        let PublishOutcome::Published { release, .. } = outcome else {
            panic!("expected a published outcome");
        };
        assert_ne!(release.id, old_id);
        assert_eq!(gateway.asset_names(release.id), vec!["a.zip".to_string()]);
        assert_eq!(
            gateway.mutating_calls(),
            vec![
                Call::DeleteRelease(old_id),
                Call::CreateRelease("v1.0".to_string()),
                Call::UploadAsset("a.zip".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_latest_flag_ignores_explicit_tag() {
        let gateway = FakeGateway::with_tags(&["v2.0", "v1.0"]);
        let project = project();

        let outcome = Publisher::new(&gateway, &project)
            .run(Some("v1.0"), true, &[], false)
            .await
            .unwrap();

        let PublishOutcome::Published { tag, .. } = outcome else {
            panic!("expected a published outcome");
        };
        assert_eq!(tag.name, "v2.0");
        assert_eq!(gateway.count(|c| *c == Call::CreateRelease("v1.0".to_string())), 0);
    }

    #[tokio::test]
    async fn test_dry_run_issues_no_mutating_calls() {
        let dir = TempDir::new().unwrap();
        let files = asset_files(&dir, &["a.zip", "b.whl"]);
        let gateway = FakeGateway::with_tags(&["v1.0"]);
        let old_id = gateway.add_release("v1.0", &["a.zip"]);
        let project = project();

        let outcome = Publisher::new(&gateway, &project)
            .run(Some("v1.0"), false, &files, true)
            .await
            .unwrap();

        let PublishOutcome::Planned(plan) = outcome else {
            panic!("expected a planned outcome");
        };
        assert!(gateway.mutating_calls().is_empty());
        assert_eq!(
            plan.actions[0],
            PlannedAction::DeleteRelease {
                tag: "v1.0".to_string(),
                id: old_id
            }
        );
        assert_eq!(plan.actions.len(), 4);
        assert_eq!(gateway.release_for("v1.0").map(|r| r.id), Some(old_id));
    }

    #[tokio::test]
    async fn test_dry_run_decision_matches_real_run() {
        for seeded in [false, true] {
            let planning = FakeGateway::with_tags(&["v1.0"]);
            let publishing = FakeGateway::with_tags(&["v1.0"]);
            if seeded {
                planning.add_release("v1.0", &[]);
                publishing.add_release("v1.0", &[]);
            }
            let project = project();

            let plan = Publisher::new(&planning, &project)
                .plan(Some("v1.0"), false, &[])
                .await
                .unwrap();
            Publisher::new(&publishing, &project)
                .run(Some("v1.0"), false, &[], false)
                .await
                .unwrap();

            let deleted = publishing.count(|c| matches!(c, Call::DeleteRelease(_))) > 0;
            assert_eq!(plan.replaces_existing_release(), deleted);
            assert_eq!(plan.replaces_existing_release(), seeded);
        }
    }

    #[tokio::test]
    async fn test_dry_run_plans_replacement_of_repeated_file_names() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let files = vec![
            asset_files(&first, &["a.zip"]).remove(0),
            asset_files(&second, &["a.zip"]).remove(0),
        ];
        let planning = FakeGateway::with_tags(&["v1.0"]);
        let publishing = FakeGateway::with_tags(&["v1.0"]);
        let project = project();

        let plan = Publisher::new(&planning, &project)
            .plan(Some("v1.0"), false, &files)
            .await
            .unwrap();
        Publisher::new(&publishing, &project)
            .run(Some("v1.0"), false, &files, false)
            .await
            .unwrap();

        assert_eq!(plan.actions.len(), publishing.mutating_calls().len());
        assert_eq!(
            plan.actions[2],
            PlannedAction::DeleteAsset {
                name: "a.zip".to_string()
            }
        );
        let planned_deletes = plan
            .actions
            .iter()
            .filter(|a| matches!(a, PlannedAction::DeleteAsset { .. }))
            .count();
        assert_eq!(
            planned_deletes,
            publishing.count(|c| matches!(c, Call::DeleteAsset(_)))
        );
        assert!(planning.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_reports_missing_local_file() {
        let dir = TempDir::new().unwrap();
        let gateway = FakeGateway::with_tags(&["v1.0"]);
        let project = project();

        let err = Publisher::new(&gateway, &project)
            .plan(Some("v1.0"), false, &[dir.path().join("nope.zip")])
            .await
            .unwrap_err();

        assert!(matches!(err, ReleaseError::LocalFile { .. }));
        assert!(gateway.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_on_tagless_project_fails_with_no_tags() {
        let gateway = FakeGateway::with_tags(&[]);
        let project = project();

        let err = Publisher::new(&gateway, &project)
            .run(None, true, &[], true)
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::NoTags { .. }));
    }
}
