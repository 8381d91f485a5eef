//! MIME type detection for release assets.

use std::path::Path;

/// Content type used when the extension is unknown
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Detect the MIME type for an asset from its file name
///
/// Compound archive suffixes (`.tar.gz`, `.tar.xz`, ...) are matched before
/// the plain extension. Matching is case-insensitive except for `AppImage`,
/// which is only recognized in its canonical spelling.
pub fn for_path(path: &Path) -> &'static str {
    let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return FALLBACK_CONTENT_TYPE,
    };
    let lower = file_name.to_ascii_lowercase();

    if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
        return "application/gzip";
    }
    if lower.ends_with(".tar.xz") || lower.ends_with(".txz") {
        return "application/x-xz";
    }
    if lower.ends_with(".tar.bz2") || lower.ends_with(".tbz2") {
        return "application/x-bzip2";
    }
    if lower.ends_with(".tar.zst") {
        return "application/zstd";
    }

    if path.extension().and_then(|e| e.to_str()) == Some("AppImage") {
        return "application/x-executable";
    }

    match lower.rsplit_once('.').map(|(_, ext)| ext) {
        Some("zip") | Some("whl") | Some("jar") | Some("nupkg") => "application/zip",
        Some("gz") => "application/gzip",
        Some("xz") => "application/x-xz",
        Some("bz2") => "application/x-bzip2",
        Some("zst") => "application/zstd",
        Some("7z") => "application/x-7z-compressed",
        Some("tar") => "application/x-tar",
        Some("deb") => "application/vnd.debian.binary-package",
        Some("rpm") => "application/x-rpm",
        Some("exe") | Some("msi") | Some("dll") => "application/x-msdownload",
        Some("dmg") => "application/x-apple-diskimage",
        Some("pkg") => "application/octet-stream",
        Some("apk") => "application/vnd.android.package-archive",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("html") | Some("htm") => "text/html",
        Some("txt") | Some("sha256") | Some("sha512") | Some("md5") | Some("asc") | Some("sig") => {
            "text/plain"
        }
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("yaml") | Some("yml") => "application/yaml",
        Some("toml") => "application/toml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
