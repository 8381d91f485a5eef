//! Dry-run description of a publish.

use crate::github::{ProjectRef, ReleaseId, Tag};
use std::fmt;
use std::path::PathBuf;

/// A mutating step a real run would perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Delete the release currently attached to the tag
    DeleteRelease {
        /// Tag name
        tag: String,
        /// Release that would be deleted
        id: ReleaseId,
    },
    /// Create the release
    CreateRelease {
        /// Tag name
        tag: String,
    },
    /// Delete an asset uploaded earlier in the same run under the same name
    DeleteAsset {
        /// Asset name on the release
        name: String,
    },
    /// Upload one local file
    UploadAsset {
        /// Asset name on the release
        name: String,
        /// Local path
        path: PathBuf,
        /// MIME type that would be sent
        content_type: &'static str,
        /// Size in bytes
        size: u64,
    },
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannedAction::DeleteRelease { tag, id } => {
                write!(f, "Would delete the existing release \"{}\" (id {})", tag, id)
            }
            PlannedAction::CreateRelease { tag } => {
                write!(f, "Would create the release \"{}\"", tag)
            }
            PlannedAction::DeleteAsset { name } => {
                write!(f, "Would delete the asset \"{}\" uploaded before it", name)
            }
            PlannedAction::UploadAsset {
                name,
                path,
                content_type,
                size,
            } => write!(
                f,
                "Would upload the asset \"{}\" from {} ({}, {} bytes)",
                name,
                path.display(),
                content_type,
                size
            ),
        }
    }
}

/// Everything a real run would change, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    /// Target project
    pub project: ProjectRef,
    /// Resolved tag
    pub tag: Tag,
    /// Mutations in execution order
    pub actions: Vec<PlannedAction>,
}

impl PublishPlan {
    /// Whether the tag already carries a release that would be replaced
    pub fn replaces_existing_release(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, PlannedAction::DeleteRelease { .. }))
    }
}

impl fmt::Display for PublishPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dry run for the release \"{}\" of the GitHub repository \"{}\":",
            self.tag.name, self.project
        )?;
        for action in &self.actions {
            writeln!(f, "  {}", action)?;
        }
        Ok(())
    }
}
