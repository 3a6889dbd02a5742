use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use upload_logging::{upload_debug, upload_error, upload_info, upload_warn};
use uploader_core::{NotifyLevel, StagedFile, StagingQueue};

use crate::{UploadResult, Uploader};

/// Shared "an upload is in flight" flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag if it is clear. The flag is cleared again when the guard drops.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(self.0.clone()))
    }
}

#[must_use = "the busy flag is released as soon as the guard is dropped"]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// User-facing notification channel (dialog, toast, terminal line).
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotifyLevel, message: &str);
}

/// Sends the first staged file and turns every outcome into a notification.
///
/// Nothing escapes as an error: the caller receives the result for display
/// only, and the queue is never modified.
pub struct UploadOrchestrator {
    uploader: Arc<dyn Uploader>,
    notifier: Option<Arc<dyn Notifier>>,
    busy: BusyFlag,
}

impl UploadOrchestrator {
    pub fn new(uploader: Arc<dyn Uploader>) -> Self {
        Self {
            uploader,
            notifier: None,
            busy: BusyFlag::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Uploads the first entry of `queue`.
    ///
    /// Returns `None` without touching the network when the queue is empty or
    /// another submission is still in flight.
    pub async fn submit(&self, queue: &StagingQueue) -> Option<UploadResult> {
        let Some(entry) = queue.first() else {
            upload_debug!("Submit skipped: staging queue is empty");
            return None;
        };
        if queue.len() > 1 {
            upload_debug!(
                "Submitting file {} only; {} other staged file(s) are not sent",
                entry.id,
                queue.len() - 1
            );
        }
        self.submit_file(entry).await
    }

    pub async fn submit_file(&self, entry: &StagedFile) -> Option<UploadResult> {
        let Some(_guard) = self.busy.try_acquire() else {
            upload_warn!("Submit of file {} rejected: upload already in progress", entry.id);
            return None;
        };

        upload_info!(
            "Uploading file {} name={} bytes={} mime={}",
            entry.id,
            entry.file.name(),
            entry.file.size(),
            entry.file.mime_type()
        );
        let result = self.uploader.upload(&entry.file).await;

        match &result {
            Ok(payload) => {
                upload_info!("Upload of file {} succeeded: {}", entry.id, payload);
                self.notify(NotifyLevel::Info, "Upload succeeded");
            }
            Err(err) => {
                upload_error!("Upload of file {} failed: {:?}", entry.id, err);
                self.notify(NotifyLevel::Error, &err.to_string());
            }
        }
        Some(result)
    }

    fn notify(&self, level: NotifyLevel, message: &str) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(level, message);
        }
    }
}
