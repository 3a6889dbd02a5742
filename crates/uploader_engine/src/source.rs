use std::fs;
use std::io;
use std::path::Path;

use mime::Mime;
use thiserror::Error;
use uploader_core::FileRef;

#[derive(Debug, Error)]
pub enum FileSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("not a regular file: {0}")]
    NotAFile(String),
}

/// Reads `path` into a [`FileRef`] the way a file picker would hand it over.
pub fn load_file(path: &Path) -> Result<FileRef, FileSourceError> {
    let io_err = |source| FileSourceError::Io {
        path: path.display().to_string(),
        source,
    };

    let meta = fs::metadata(path).map_err(io_err)?;
    if !meta.is_file() {
        return Err(FileSourceError::NotAFile(path.display().to_string()));
    }
    let bytes = fs::read(path).map_err(io_err)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(FileRef::new(name, guess_mime(path).to_string(), bytes))
}

/// MIME type from the file extension; unknown extensions are `application/octet-stream`.
pub fn guess_mime(path: &Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let essence = match ext.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov" | "qt") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("ogv") => "video/ogg",
        Some("mpeg" | "mpg") => "video/mpeg",
        Some("3gp") => "video/3gpp",
        Some("wmv") => "video/x-ms-wmv",
        Some("flv") => "video/x-flv",
        _ => return mime::APPLICATION_OCTET_STREAM,
    };
    essence.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

/// The picker's `video/*` filter. Advisory only; uploads never check it.
pub fn is_video_mime(mime_type: &str) -> bool {
    mime_type
        .parse::<Mime>()
        .map(|mime| mime.type_() == mime::VIDEO)
        .unwrap_or(false)
}
