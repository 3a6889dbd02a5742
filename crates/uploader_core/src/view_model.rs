use crate::{FileId, UploadOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub busy: bool,
    pub can_upload: bool,
    pub files: Vec<FileRowView>,
    pub last_outcome: Option<UploadOutcome>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn upload_label(&self) -> &'static str {
        if self.busy {
            "Uploading..."
        } else {
            "Next"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub id: FileId,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub uploading: bool,
}

impl FileRowView {
    pub fn size_label(&self) -> String {
        format_size_mb(self.size_bytes)
    }
}

/// Size in mebibytes with one decimal, e.g. `"12.5 MB"`.
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}
