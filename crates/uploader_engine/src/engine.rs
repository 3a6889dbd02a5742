use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use upload_logging::{upload_debug, upload_error};
use uploader_core::StagedFile;

use crate::orchestrator::UploadOrchestrator;
use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::{EngineEvent, UploadError, UploadResult};

enum EngineCommand {
    Upload { file: StagedFile },
}

/// Runs uploads on a worker thread, one at a time, and reports results as events.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Self {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)))
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => Some(runtime),
                Err(err) => {
                    upload_error!("Failed to start upload runtime: {}", err);
                    None
                }
            };
            let orchestrator = Arc::new(UploadOrchestrator::new(uploader));

            while let Ok(command) = cmd_rx.recv() {
                let EngineCommand::Upload { file } = command;
                let id = file.id;
                let result = match &runtime {
                    Some(runtime) => {
                        let orchestrator = orchestrator.clone();
                        let task =
                            runtime.spawn(async move { run_upload(&orchestrator, &file).await });
                        // A panicking uploader still settles the upload.
                        runtime.block_on(task).unwrap_or_else(|err| {
                            upload_error!("Upload task for file {} aborted: {}", id, err);
                            Err(UploadError::transport(format!("upload task aborted: {err}")))
                        })
                    }
                    None => Err(UploadError::transport("upload runtime unavailable")),
                };
                if event_tx
                    .send(EngineEvent::UploadCompleted { id, result })
                    .is_err()
                {
                    break;
                }
            }
            upload_debug!("Upload engine thread exiting");
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Queues `file` for upload. Returns false when the worker is gone, in
    /// which case no completion event will follow.
    #[must_use]
    pub fn upload(&self, file: StagedFile) -> bool {
        self.cmd_tx.send(EngineCommand::Upload { file }).is_ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn run_upload(orchestrator: &UploadOrchestrator, file: &StagedFile) -> UploadResult {
    // Commands are handled sequentially, so the orchestrator is never busy here.
    orchestrator
        .submit_file(file)
        .await
        .unwrap_or_else(|| Err(UploadError::transport("upload already in progress")))
}
