use crate::{AppState, Effect, Msg, NotifyLevel};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            state.stage_files(files);
            Vec::new()
        }
        Msg::RemoveClicked { id } => {
            state.remove_file(id);
            Vec::new()
        }
        Msg::ClearClicked => {
            // Ignored while an upload is in flight.
            if !state.is_busy() {
                state.clear_queue();
            }
            Vec::new()
        }
        Msg::UploadClicked => match state.begin_upload() {
            Some(file) => vec![Effect::Upload { file }],
            None => Vec::new(),
        },
        Msg::UploadSettled { id, outcome } => {
            let level = if outcome.is_success() {
                NotifyLevel::Info
            } else {
                NotifyLevel::Error
            };
            let message = outcome.notification();
            // The staged entry stays in the queue after both success and failure.
            if state.settle_upload(id, outcome) {
                vec![Effect::Notify { level, message }]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
