use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use deck_logging::{deck_debug, deck_info, deck_warn};
use mapdeck_core::{Effect, Msg};
use mapdeck_engine::{Backend, EngineCommand, EngineEvent, EngineEvents, EngineHandle};

use super::ui::input::Input;

/// Hands effects to the engine and feeds its events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(backend: Arc<dyn Backend>, inbox: mpsc::Sender<Input>) -> io::Result<Self> {
        let (engine, events) = EngineHandle::new(backend)?;
        spawn_event_loop(events, inbox)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match &effect {
                Effect::StartJob { session, kind } => {
                    deck_info!("starting {} session={session}", kind.endpoint());
                }
                Effect::SaveSettings(settings) => {
                    deck_info!(
                        "saving settings url_len={} output_dir={:?}",
                        settings.target_url.len(),
                        settings.output_dir
                    );
                }
                other => deck_debug!("effect {other:?}"),
            }
            self.engine.submit(map_effect(effect));
        }
    }
}

fn spawn_event_loop(events: EngineEvents, inbox: mpsc::Sender<Input>) -> io::Result<()> {
    thread::Builder::new()
        .name("mapdeck-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if let EngineEvent::JobFinished {
                    session,
                    result: Err(err),
                } = &event
                {
                    deck_warn!("session {session} failed: {err}");
                }
                if inbox.send(Input::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

fn map_effect(effect: Effect) -> EngineCommand {
    match effect {
        Effect::LoadSettings => EngineCommand::LoadSettings,
        Effect::SaveSettings(settings) => EngineCommand::SaveSettings(settings),
        Effect::FetchStats => EngineCommand::FetchStats,
        Effect::FetchMap => EngineCommand::FetchMap,
        Effect::PickFolder => EngineCommand::PickFolder,
        Effect::StartJob { session, kind } => EngineCommand::RunJob { session, kind },
        Effect::ClearSettingsStatusAfter { token, delay } => {
            EngineCommand::StartTimer { token, delay }
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SettingsLoaded(result) => Msg::SettingsLoaded(result),
        EngineEvent::SettingsSaved(result) => Msg::SettingsSaved(result),
        EngineEvent::StatsLoaded(result) => Msg::StatsLoaded(result),
        EngineEvent::MapLoaded(result) => Msg::MapLoaded(result),
        EngineEvent::FolderPicked(result) => Msg::FolderPicked(result),
        EngineEvent::JobOpened { session } => Msg::JobStreamOpened { session },
        EngineEvent::JobOutput { session, text } => Msg::JobOutput { session, text },
        EngineEvent::JobFinished { session, result } => Msg::JobFinished { session, result },
        EngineEvent::TimerFired { token } => Msg::SettingsStatusExpired { token },
    }
}
