//! GitHub REST API access for tags, releases and release assets

mod client;
mod config;
pub mod content_type;
mod gateway;
mod models;

pub use client::HttpGateway;
pub use config::{API_ROOT_ENV, DEFAULT_GITHUB_SERVER, GitHubConfig, api_root_for, normalize_server};
pub use gateway::ReleaseGateway;
pub use models::{
    Asset, AssetId, Credential, DEFAULT_RELEASE_BODY, NewRelease, ProjectRef, Release, ReleaseId,
    Tag,
};
