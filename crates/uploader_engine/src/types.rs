use thiserror::Error;
use uploader_core::FileId;

/// Opaque JSON the server returned on success, or why the upload failed.
pub type UploadResult = Result<serde_json::Value, UploadError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Server answered with a non-2xx status. `message` is shown to the user as-is.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The request never produced a response (DNS, refused connection, timeout, ...).
    #[error("Upload failed: {cause}")]
    Transport { cause: String },
}

impl UploadError {
    pub(crate) fn transport(cause: impl Into<String>) -> Self {
        Self::Transport {
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::Http { status, .. } => Some(*status),
            UploadError::Transport { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted { id: FileId, result: UploadResult },
}
