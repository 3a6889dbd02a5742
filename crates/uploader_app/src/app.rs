use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use upload_logging::{upload_info, upload_warn};
use uploader_core::{update, AppState, Msg};
use uploader_engine::{is_video_mime, load_file, EngineHandle};

use crate::commands::{parse_command, Command, HELP};
use crate::config::AppConfig;
use crate::effects::{EffectRunner, TerminalNotifier};
use crate::render;

/// Everything the main loop reacts to, from stdin and from the engine.
#[derive(Debug)]
pub enum AppEvent {
    Input(String),
    InputClosed,
    Msg(Msg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let engine = EngineHandle::new(config.upload_settings());
    let effects = EffectRunner::new(engine, Arc::new(TerminalNotifier), event_tx.clone());
    spawn_input_reader(event_tx);

    let mut app = App::new(effects, io::stdout());
    writeln!(app.out, "Uploading to {}", config.endpoint)?;
    writeln!(app.out, "{HELP}")?;

    while let Ok(event) = event_rx.recv() {
        if app.handle_event(event)? == Flow::Exit {
            break;
        }
    }
    upload_info!("Exiting");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

pub struct App<W: Write> {
    state: AppState,
    effects: EffectRunner,
    out: W,
    quitting: bool,
}

impl<W: Write> App<W> {
    pub fn new(effects: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
            quitting: false,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> io::Result<Flow> {
        match event {
            AppEvent::Input(line) => match parse_command(&line) {
                Ok(Some(command)) => self.handle_command(command)?,
                Ok(None) => {}
                Err(err) => writeln!(self.out, "{err}")?,
            },
            AppEvent::InputClosed => self.request_quit()?,
            AppEvent::Msg(msg) => self.dispatch_msg(msg)?,
        }

        // No cancellation: a quit request waits for the running upload to settle.
        if self.quitting && !self.state.is_busy() {
            Ok(Flow::Exit)
        } else {
            Ok(Flow::Continue)
        }
    }

    fn handle_command(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Add(path) => match load_file(&path) {
                Ok(file) => {
                    if !is_video_mime(file.mime_type()) {
                        writeln!(
                            self.out,
                            "Note: {} does not look like a video ({}); staging anyway",
                            file.name(),
                            file.mime_type()
                        )?;
                    }
                    self.dispatch_msg(Msg::FilesSelected(vec![file]))?;
                }
                Err(err) => {
                    upload_warn!("Could not stage {:?}: {}", path, err);
                    writeln!(self.out, "{err}")?;
                }
            },
            Command::Remove(id) => {
                if self.state.queue().get(id).is_none() {
                    writeln!(self.out, "No staged file #{id}")?;
                }
                self.dispatch_msg(Msg::RemoveClicked { id })?;
            }
            Command::List => render::render(&mut self.out, &self.state.view())?,
            Command::Upload => {
                if self.state.is_busy() {
                    writeln!(self.out, "An upload is already running")?;
                } else if self.state.queue().is_empty() {
                    writeln!(self.out, "Nothing staged")?;
                } else {
                    self.dispatch_msg(Msg::UploadClicked)?;
                }
            }
            Command::Clear => {
                if self.state.is_busy() {
                    writeln!(self.out, "Cannot clear while an upload is running")?;
                }
                self.dispatch_msg(Msg::ClearClicked)?;
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => self.request_quit()?,
        }
        Ok(())
    }

    fn request_quit(&mut self) -> io::Result<()> {
        if self.state.is_busy() && !self.quitting {
            writeln!(self.out, "Waiting for the running upload to finish...")?;
        }
        self.quitting = true;
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);

        if was_dirty {
            render::render(&mut self.out, &self.state.view())?;
        }
        Ok(())
    }
}
