#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Picker returned one or more files.
    FilesSelected(Vec<crate::FileRef>),
    /// User clicked the remove button on a staged file.
    RemoveClicked { id: crate::FileId },
    /// User asked to empty the staging queue.
    ClearClicked,
    /// User clicked Upload.
    UploadClicked,
    /// Engine finished the network round-trip for a file.
    UploadSettled {
        id: crate::FileId,
        outcome: crate::UploadOutcome,
    },
}
