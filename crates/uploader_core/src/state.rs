use crate::view_model::{AppViewModel, FileRowView};
use crate::{FileId, FileRef, StagedFile, StagingQueue};

/// Result of the last submission, reduced to what the UI shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Server accepted the file; `payload` is its response body rendered for display.
    Succeeded { payload: String },
    Failed { message: String },
}

impl UploadOutcome {
    pub fn notification(&self) -> String {
        match self {
            UploadOutcome::Succeeded { .. } => "Upload succeeded".to_string(),
            UploadOutcome::Failed { message } => message.clone(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Succeeded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    queue: StagingQueue,
    in_flight: Option<FileId>,
    last_outcome: Option<UploadOutcome>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            busy: self.is_busy(),
            can_upload: !self.is_busy() && !self.queue.is_empty(),
            files: self
                .queue
                .list()
                .iter()
                .map(|entry| FileRowView {
                    id: entry.id,
                    name: entry.file.name().to_string(),
                    mime_type: entry.file.mime_type().to_string(),
                    size_bytes: entry.file.size(),
                    uploading: self.in_flight == Some(entry.id),
                })
                .collect(),
            last_outcome: self.last_outcome.clone(),
            dirty: self.dirty,
        }
    }

    pub fn queue(&self) -> &StagingQueue {
        &self.queue
    }

    /// True from the moment an upload is started until it settles.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<FileId> {
        self.in_flight
    }

    pub fn last_outcome(&self) -> Option<&UploadOutcome> {
        self.last_outcome.as_ref()
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn stage_files(&mut self, files: Vec<FileRef>) -> Vec<FileId> {
        let ids = self.queue.add_files(files);
        if !ids.is_empty() {
            self.mark_dirty();
        }
        ids
    }

    pub(crate) fn remove_file(&mut self, id: FileId) -> bool {
        let removed = self.queue.remove_file(id);
        if removed {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn clear_queue(&mut self) {
        if !self.queue.is_empty() {
            self.queue.clear();
            self.mark_dirty();
        }
    }

    /// Idle -> Uploading. Picks the first entry; `None` when busy or empty.
    pub(crate) fn begin_upload(&mut self) -> Option<StagedFile> {
        if self.is_busy() {
            return None;
        }
        let first = self.queue.first()?.clone();
        self.in_flight = Some(first.id);
        self.mark_dirty();
        Some(first)
    }

    /// Uploading -> Idle. Ignores settlements for an upload that is not in flight.
    pub(crate) fn settle_upload(&mut self, id: FileId, outcome: UploadOutcome) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        self.in_flight = None;
        self.last_outcome = Some(outcome);
        self.mark_dirty();
        true
    }
}
