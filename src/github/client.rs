//! reqwest-backed implementation of [`ReleaseGateway`].

use super::config::GitHubConfig;
use super::gateway::ReleaseGateway;
use super::models::{Asset, AssetId, NewRelease, Release, ReleaseId, Tag};
use crate::error::{ReleaseError, Result};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio_util::io::ReaderStream;
use url::Url;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
/// Largest page size the assets endpoint accepts
const ASSETS_PER_PAGE: usize = 100;

/// Error payload returned by the GitHub API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Git reference payload (`/git/ref/tags/{tag}`)
#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    reference: String,
}

/// Authenticated HTTP gateway for one project
pub struct HttpGateway {
    /// HTTP session, shared by all calls of a run
    client: reqwest::Client,
    /// Configuration
    config: GitHubConfig,
}

impl HttpGateway {
    /// Create a gateway for the configured server and project
    pub fn new(config: GitHubConfig) -> Result<Self> {
        Self::with_builder(config, reqwest::Client::builder())
    }

    fn with_builder(config: GitHubConfig, builder: reqwest::ClientBuilder) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let client = builder
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ReleaseError::Transport {
                operation: "http_client_init".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// `<api_root>/repos/<owner>/<name>/<segments...>`, each segment percent-encoded
    fn repo_url(&self, segments: &[&str]) -> Url {
        repo_url(&self.config, segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        self.client.request(method, url).basic_auth(
            &self.config.credential.username,
            Some(&self.config.credential.secret),
        )
    }

    /// Send a request and turn non-success statuses into typed errors
    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| ReleaseError::Transport {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(operation, status, &body))
    }

    async fn json<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
        let body = response.text().await.map_err(|e| ReleaseError::Transport {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&body).map_err(|e| ReleaseError::InvalidResponse {
            operation: operation.to_string(),
            reason: format!("Got an invalid json object: {}", e),
        })
    }

    async fn release_from(operation: &str, response: Response) -> Result<Release> {
        let mut release: Release = Self::json(operation, response).await?;
        release.upload_url = strip_upload_url(operation, &release.upload_url)?.to_string();
        Ok(release)
    }
}

impl ReleaseGateway for HttpGateway {
    async fn get_tag(&self, name: &str) -> Result<Tag> {
        let operation = format!("fetch tag \"{}\" of {}", name, self.config.project);
        let url = self.repo_url(&["git", "ref", "tags", name]);
        let response = self.send(&operation, self.request(Method::GET, url)).await?;
        let git_ref: GitRef = Self::json(&operation, response).await?;

        let tag_name = git_ref
            .reference
            .strip_prefix("refs/tags/")
            .unwrap_or(name)
            .to_string();
        Ok(Tag::new(tag_name))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let operation = format!("list tags of {}", self.config.project);
        let url = self.repo_url(&["tags"]);
        let response = self.send(&operation, self.request(Method::GET, url)).await?;
        Self::json(&operation, response).await
    }

    async fn find_release_by_tag(&self, tag_name: &str) -> Result<Option<Release>> {
        let operation = format!("fetch release \"{}\" of {}", tag_name, self.config.project);
        let url = self.repo_url(&["releases", "tags", tag_name]);
        match self.send(&operation, self.request(Method::GET, url)).await {
            Ok(response) => Ok(Some(Self::release_from(&operation, response).await?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_release(&self, request: &NewRelease) -> Result<Release> {
        let operation = format!(
            "create release \"{}\" in {}",
            request.tag_name, self.config.project
        );
        let url = self.repo_url(&["releases"]);
        let response = self
            .send(&operation, self.request(Method::POST, url).json(request))
            .await?;
        let release = Self::release_from(&operation, response).await?;
        log::info!(
            "Created the release \"{}\" (id {}) in the GitHub repository \"{}\"",
            release.tag_name,
            release.id,
            self.config.project
        );
        Ok(release)
    }

    async fn delete_release(&self, release_id: ReleaseId) -> Result<()> {
        let operation = format!("delete release {} of {}", release_id, self.config.project);
        let url = self.repo_url(&["releases", &release_id.to_string()]);
        self.send(&operation, self.request(Method::DELETE, url))
            .await?;
        log::info!(
            "Deleted the release {} of the GitHub repository \"{}\"",
            release_id,
            self.config.project
        );
        Ok(())
    }

    async fn list_assets(&self, release_id: ReleaseId) -> Result<Vec<Asset>> {
        let operation = format!(
            "list assets of release {} in {}",
            release_id, self.config.project
        );
        let mut assets = Vec::new();
        let mut page = 1;
        loop {
            let mut url = self.repo_url(&["releases", &release_id.to_string(), "assets"]);
            url.query_pairs_mut()
                .append_pair("per_page", &ASSETS_PER_PAGE.to_string())
                .append_pair("page", &page.to_string());
            let response = self.send(&operation, self.request(Method::GET, url)).await?;
            let batch: Vec<Asset> = Self::json(&operation, response).await?;

            let last_page = batch.len() < ASSETS_PER_PAGE;
            assets.extend(batch);
            if last_page {
                return Ok(assets);
            }
            page += 1;
        }
    }

    async fn delete_asset(&self, asset_id: AssetId) -> Result<()> {
        let operation = format!("delete asset {} of {}", asset_id, self.config.project);
        let url = self.repo_url(&["releases", "assets", &asset_id.to_string()]);
        self.send(&operation, self.request(Method::DELETE, url))
            .await?;
        Ok(())
    }

    async fn upload_asset(
        &self,
        release: &Release,
        local_path: &Path,
        asset_name: &str,
        content_type: &str,
    ) -> Result<Asset> {
        let operation = format!("upload asset \"{}\"", asset_name);
        let local_error = |e: std::io::Error| ReleaseError::LocalFile {
            path: local_path.to_path_buf(),
            reason: e.to_string(),
        };

        let file = tokio::fs::File::open(local_path).await.map_err(local_error)?;
        let size = file.metadata().await.map_err(local_error)?.len();

        let mut url = Url::parse(&release.upload_url).map_err(|e| {
            ReleaseError::InvalidResponse {
                operation: operation.clone(),
                reason: format!("The upload url \"{}\" is invalid: {}", release.upload_url, e),
            }
        })?;
        url.query_pairs_mut().append_pair("name", asset_name);

        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let request = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, size)
            .body(body);

        let response = self.send(&operation, request).await?;
        let asset: Asset = Self::json(&operation, response).await?;
        log::info!(
            "Uploaded the asset \"{}\" attached to release \"{}\" of the GitHub repository \"{}\"",
            asset.name,
            release.tag_name,
            self.config.project
        );
        Ok(asset)
    }
}

fn repo_url(config: &GitHubConfig, segments: &[&str]) -> Url {
    let mut url = config.api_root.clone();
    // An API root always has a base and so always has path segments
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .push("repos")
            .push(&config.project.owner)
            .push(&config.project.name)
            .extend(segments);
    }
    url
}

/// Map a non-success HTTP status to the matching error kind
fn status_error(operation: &str, status: StatusCode, body: &str) -> ReleaseError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ReleaseError::Auth {
            operation: operation.to_string(),
        },
        StatusCode::NOT_FOUND => ReleaseError::NotFound {
            what: operation.to_string(),
        },
        s if s.is_server_error() => ReleaseError::Transport {
            operation: operation.to_string(),
            reason: format!("HTTP {}: {}", s.as_u16(), message),
        },
        s => ReleaseError::Api {
            operation: operation.to_string(),
            status: s.as_u16(),
            message,
        },
    }
}

/// Drop the RFC 6570 `{?name,label}` suffix from an upload URL template
fn strip_upload_url<'a>(operation: &str, upload_url: &'a str) -> Result<&'a str> {
    let base = upload_url
        .split_once('{')
        .map_or(upload_url, |(base, _)| base);

    if base.is_empty() || Url::parse(base).is_err() {
        return Err(ReleaseError::InvalidResponse {
            operation: operation.to_string(),
            reason: format!(
                "The upload url \"{}\" is not in the expected format.",
                upload_url
            ),
        });
    }
    Ok(base)
}
