//! Credential loading from the credentials file or stdin.

use crate::error::{ReleaseError, Result};
use crate::github::Credential;
use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};

/// Default credentials file, relative to the home directory
pub const DEFAULT_CREDENTIALS_FILE: &str = "~/.github-binary-uploadrc";

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Read `<username>\n<secret>` from a credentials file
pub fn read_credentials_file(path: &Path) -> Result<Credential> {
    let content = std::fs::read_to_string(path).map_err(|e| ReleaseError::Credentials {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_credentials(path, &content)
}

fn parse_credentials(path: &Path, content: &str) -> Result<Credential> {
    let mut lines = content.lines().map(str::trim);
    let username = lines.next().unwrap_or_default();
    let secret = lines.next().unwrap_or_default();

    if username.is_empty() || secret.is_empty() {
        return Err(ReleaseError::Credentials {
            path: path.to_path_buf(),
            reason: "expected the username on the first line and the access token on the second"
                .to_string(),
        });
    }

    Ok(Credential::new(username, secret))
}

/// Read the secret for `username` from stdin
///
/// On a terminal the user is prompted without echo; otherwise one line is
/// read, so tokens can be piped in from CI secrets.
pub fn prompt_secret(username: &str) -> Result<Credential> {
    let stdin_error = |reason: String| ReleaseError::Credentials {
        path: PathBuf::from("<stdin>"),
        reason,
    };

    let secret = if std::io::stdin().is_terminal() {
        rpassword::prompt_password(format!("Password or access token for {}: ", username))
            .map_err(|e| stdin_error(e.to_string()))?
    } else {
        read_secret_line(std::io::stdin().lock()).map_err(|e| stdin_error(e.to_string()))?
    };

    if secret.is_empty() {
        return Err(stdin_error("no password or access token given".to_string()));
    }
    Ok(Credential::new(username, secret))
}

fn read_secret_line(mut reader: impl BufRead) -> std::io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
