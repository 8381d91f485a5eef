//! Command execution: credentials, publishing and result reporting.

use crate::cli::{Args, OutputManager, PublishRequest};
use crate::credentials::{expand_home, prompt_secret, read_credentials_file};
use crate::error::Result;
use crate::github::Credential;
use crate::publish::{PublishOptions, PublishOutcome, publish_release_from_tag};

/// Execute a publish run for parsed arguments, returning the exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new();
    let request = args.into_request()?;
    let credential = load_credential(&request)?;

    if request.dry_run {
        output.info("Dry run: no release or asset will be changed")?;
    }

    let options = PublishOptions {
        project: request.project,
        tag: request.tag,
        latest: request.latest,
        assets: request.assets,
        github_server: request.github_server,
        credential,
        dry_run: request.dry_run,
    };
    let outcome = publish_release_from_tag(&options).await?;
    report(&output, &options, &outcome)?;

    Ok(0)
}

fn load_credential(request: &PublishRequest) -> Result<Credential> {
    match &request.username {
        Some(username) => prompt_secret(username),
        None => read_credentials_file(&expand_home(&request.credentials_file)),
    }
}

fn report(
    output: &OutputManager,
    options: &PublishOptions,
    outcome: &PublishOutcome,
) -> std::io::Result<()> {
    match outcome {
        PublishOutcome::Published {
            tag,
            release,
            assets,
        } => {
            output.success(&format!(
                "Published the release \"{}\" (id {}) of the GitHub repository \"{}\"",
                tag.name, release.id, options.project
            ))?;
            for asset in assets {
                output.indent(&format!("✓ Uploaded: {} ({} bytes)", asset.name, asset.size))?;
            }
            if assets.is_empty() {
                output.indent("No assets attached")?;
            }
        }
        PublishOutcome::Planned(plan) => {
            for line in plan.to_string().lines() {
                output.println(line)?;
            }
        }
    }
    Ok(())
}
