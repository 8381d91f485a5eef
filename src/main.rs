//! github-binary-upload - publish GitHub releases from tags with attached files.

use github_binary_upload::cli;
use github_binary_upload::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,github_binary_upload=info"),
    )
    .init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new();
            output.error(&e.to_string());

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.error("Recovery suggestions:");
                for suggestion in suggestions {
                    output.error(&format!("  • {}", suggestion));
                }
            }

            process::exit(e.exit_code());
        }
    }
}
