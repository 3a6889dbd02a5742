use std::sync::Once;

use pretty_assertions::assert_eq;
use uploader_core::{update, AppState, Effect, FileRef, Msg, NotifyLevel, UploadOutcome};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(upload_logging::initialize_for_tests);
}

fn video(name: &str, body: &'static [u8]) -> FileRef {
    FileRef::new(name, "video/mp4", body)
}

fn staged(files: Vec<FileRef>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::FilesSelected(files));
    assert!(effects.is_empty());
    state
}

fn failed(message: &str) -> UploadOutcome {
    UploadOutcome::Failed {
        message: message.to_string(),
    }
}

#[test]
fn files_selected_stages_and_marks_dirty() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::FilesSelected(vec![video("a.mp4", b"A")]));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.files.len(), 1);
    assert_eq!(view.files[0].id, 1);
    assert_eq!(view.files[0].name, "a.mp4");
    assert!(view.can_upload);
    assert!(!view.busy);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn upload_on_empty_queue_is_silent_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::UploadClicked);

    assert!(effects.is_empty());
    assert_eq!(next, state);
    assert!(!next.is_busy());
}

#[test]
fn upload_sends_only_first_entry_and_sets_busy() {
    init_logging();
    let state = staged(vec![video("a.mp4", b"A"), video("b.mp4", b"B")]);
    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(state.is_busy());
    assert_eq!(state.in_flight(), Some(1));
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::Upload { file } => {
            assert_eq!(file.id, 1);
            assert_eq!(file.file.bytes().as_ref(), b"A");
        }
        other => panic!("unexpected effect {other:?}"),
    }
    let view = state.view();
    assert_eq!(view.upload_label(), "Uploading...");
    assert!(!view.can_upload);
    assert!(view.files[0].uploading);
    assert!(!view.files[1].uploading);
}

#[test]
fn second_upload_click_while_busy_is_rejected() {
    init_logging();
    let state = staged(vec![video("a.mp4", b"A")]);
    let (state, _effects) = update(state, Msg::UploadClicked);
    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(effects.is_empty());
    assert!(state.is_busy());
}

#[test]
fn successful_settlement_keeps_queue_and_notifies() {
    init_logging();
    let state = staged(vec![video("a.mp4", b"A")]);
    let before = state.queue().clone();
    let (state, _effects) = update(state, Msg::UploadClicked);
    let (state, effects) = update(
        state,
        Msg::UploadSettled {
            id: 1,
            outcome: UploadOutcome::Succeeded {
                payload: r#"{"status":"ok"}"#.to_string(),
            },
        },
    );

    assert!(!state.is_busy());
    assert_eq!(state.queue(), &before);
    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NotifyLevel::Info,
            message: "Upload succeeded".to_string(),
        }]
    );
    assert!(state.last_outcome().unwrap().is_success());
    assert_eq!(state.view().upload_label(), "Next");
}

#[test]
fn failed_settlement_keeps_entry_and_reports_message() {
    init_logging();
    let state = staged(vec![video("a.mp4", b"A")]);
    let (state, _effects) = update(state, Msg::UploadClicked);
    let (state, effects) = update(
        state,
        Msg::UploadSettled {
            id: 1,
            outcome: failed("disk full"),
        },
    );

    assert!(!state.is_busy());
    assert_eq!(state.queue().len(), 1);
    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NotifyLevel::Error,
            message: "disk full".to_string(),
        }]
    );

    // The same entry can be submitted again by hand.
    let (_state, effects) = update(state, Msg::UploadClicked);
    assert!(matches!(&effects[..], [Effect::Upload { file }] if file.id == 1));
}

#[test]
fn stale_settlement_is_ignored() {
    init_logging();
    let state = staged(vec![video("a.mp4", b"A")]);
    let (state, effects) = update(
        state,
        Msg::UploadSettled {
            id: 1,
            outcome: failed("late"),
        },
    );

    assert!(effects.is_empty());
    assert!(state.last_outcome().is_none());
}

#[test]
fn remove_clicked_drops_entry_and_unknown_id_is_noop() {
    init_logging();
    let state = staged(vec![video("a.mp4", b"A"), video("b.mp4", b"B")]);
    let (mut state, _effects) = update(state, Msg::RemoveClicked { id: 1 });
    assert!(state.consume_dirty());
    let ids: Vec<u64> = state.view().files.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![2]);

    let (mut state, effects) = update(state, Msg::RemoveClicked { id: 42 });
    assert!(effects.is_empty());
    assert_eq!(state.queue().len(), 1);
    assert!(!state.consume_dirty());
}

#[test]
fn clear_is_explicit_and_ignored_while_busy() {
    init_logging();
    let state = staged(vec![video("a.mp4", b"A")]);
    let (state, _effects) = update(state, Msg::UploadClicked);
    let (state, _effects) = update(state, Msg::ClearClicked);
    assert_eq!(state.queue().len(), 1);

    let (state, _effects) = update(
        state,
        Msg::UploadSettled {
            id: 1,
            outcome: UploadOutcome::Succeeded {
                payload: "null".to_string(),
            },
        },
    );
    let (state, _effects) = update(state, Msg::ClearClicked);
    assert!(state.queue().is_empty());
    assert!(!state.view().can_upload);
}

#[test]
fn size_label_uses_one_decimal_megabytes() {
    assert_eq!(uploader_core::format_size_mb(0), "0.0 MB");
    assert_eq!(uploader_core::format_size_mb(1024 * 1024), "1.0 MB");
    assert_eq!(uploader_core::format_size_mb(1572864), "1.5 MB");
}
