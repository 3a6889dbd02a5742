//! Uploader engine: file loading, HTTP submission and the background upload worker.
mod engine;
mod orchestrator;
mod source;
mod types;
mod upload;

pub use engine::EngineHandle;
pub use orchestrator::{BusyFlag, BusyGuard, Notifier, UploadOrchestrator};
pub use source::{guess_mime, is_video_mime, load_file, FileSourceError};
pub use types::{EngineEvent, UploadError, UploadResult};
pub use upload::{
    failure_message, ReqwestUploader, UploadSettings, Uploader, DEFAULT_ENDPOINT,
    DEFAULT_FIELD_NAME,
};
