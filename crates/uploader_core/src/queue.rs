use bytes::Bytes;

pub type FileId = u64;

/// Raw file handed over by the picker: bytes plus the metadata sent with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    name: String,
    mime_type: String,
    bytes: Bytes,
}

impl FileRef {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub id: FileId,
    pub file: FileRef,
}

/// Ordered list of files waiting to be uploaded.
///
/// Ids come from a counter owned by the queue and are never reused, so an id
/// stays valid until its entry is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingQueue {
    entries: Vec<StagedFile>,
    next_id: FileId,
}

impl Default for StagingQueue {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl StagingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry per file and returns the ids assigned, in order.
    ///
    /// No deduplication: staging the same file twice yields two entries.
    pub fn add_files(&mut self, selected: impl IntoIterator<Item = FileRef>) -> Vec<FileId> {
        selected
            .into_iter()
            .map(|file| {
                let id = self.next_id;
                self.next_id += 1;
                self.entries.push(StagedFile { id, file });
                id
            })
            .collect()
    }

    /// Removes the entry with `id`. Returns false (and changes nothing) when absent.
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> &[StagedFile] {
        &self.entries
    }

    /// The entry a submission sends; later entries are never transmitted.
    pub fn first(&self) -> Option<&StagedFile> {
        self.entries.first()
    }

    pub fn get(&self, id: FileId) -> Option<&StagedFile> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
