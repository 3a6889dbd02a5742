use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use upload_logging::{upload_debug, upload_error, upload_info};
use uploader_core::{Effect, FileId, Msg, NotifyLevel, UploadOutcome};
use uploader_engine::{EngineEvent, EngineHandle, Notifier, UploadResult};

use crate::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
    notifier: Arc<dyn Notifier>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        notifier: Arc<dyn Notifier>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let runner = Self {
            engine,
            notifier,
            event_tx,
        };
        runner.spawn_event_loop(runner.event_tx.clone());
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload { file } => {
                    upload_info!(
                        "Upload id={} name={} bytes={}",
                        file.id,
                        file.file.name(),
                        file.file.size()
                    );
                    let id = file.id;
                    if !self.engine.upload(file) {
                        upload_error!("Upload worker is gone; settling file {} as failed", id);
                        let _ = self.event_tx.send(AppEvent::Msg(worker_gone(id)));
                    }
                }
                Effect::Notify { level, message } => {
                    self.notifier.notify(level, &message);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let EngineEvent::UploadCompleted { id, result } = event;
                let msg = Msg::UploadSettled {
                    id,
                    outcome: map_result(id, result),
                };
                if event_tx.send(AppEvent::Msg(msg)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Settlement for an upload the worker never received, so busy is released.
pub(crate) fn worker_gone(id: FileId) -> Msg {
    Msg::UploadSettled {
        id,
        outcome: UploadOutcome::Failed {
            message: "Upload failed: upload worker is not running".to_string(),
        },
    }
}

fn map_result(id: FileId, result: UploadResult) -> UploadOutcome {
    match result {
        Ok(payload) => {
            upload_debug!("Upload {} settled ok: {}", id, payload);
            UploadOutcome::Succeeded {
                payload: payload.to_string(),
            }
        }
        Err(err) => {
            upload_debug!("Upload {} settled with error: {}", id, err);
            UploadOutcome::Failed {
                message: err.to_string(),
            }
        }
    }
}

/// Prints notifications on the terminal, errors on stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => println!("[ok] {message}"),
            NotifyLevel::Error => eprintln!("[error] {message}"),
        }
    }
}
