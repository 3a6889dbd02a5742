#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit this entry to the upload endpoint.
    Upload { file: crate::StagedFile },
    /// Show a blocking notification to the user.
    Notify { level: NotifyLevel, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}
