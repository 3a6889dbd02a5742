//! Uploader core: staging queue and pure upload state machine.
mod effect;
mod msg;
mod queue;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, NotifyLevel};
pub use msg::Msg;
pub use queue::{FileId, FileRef, StagedFile, StagingQueue};
pub use state::{AppState, UploadOutcome};
pub use update::update;
pub use view_model::{format_size_mb, AppViewModel, FileRowView};
