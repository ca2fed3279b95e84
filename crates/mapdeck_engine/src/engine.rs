use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use deck_logging::deck_debug;
use mapdeck_core::SessionId;

use crate::backend::{Backend, JobSink};
use crate::{EngineCommand, EngineEvent};

/// Runs backend calls on a private tokio runtime.
///
/// Every command completes with exactly one event, except `RunJob` which
/// emits `JobOpened`, any number of `JobOutput`s and then `JobFinished`.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of the engine's event channel.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks until an event arrives; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>) -> io::Result<(Self, EngineEvents)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("mapdeck-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("mapdeck-dispatch".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), command, event_tx).await;
                    });
                }
                deck_debug!("engine command channel closed");
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

struct ChannelJobSink {
    session: SessionId,
    tx: mpsc::Sender<EngineEvent>,
}

impl JobSink for ChannelJobSink {
    fn opened(&self) {
        let _ = self.tx.send(EngineEvent::JobOpened {
            session: self.session,
        });
    }

    fn output(&self, text: String) {
        let _ = self.tx.send(EngineEvent::JobOutput {
            session: self.session,
            text,
        });
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::LoadSettings => EngineEvent::SettingsLoaded(backend.load_settings().await),
        EngineCommand::SaveSettings(settings) => {
            let result = backend.save_settings(&settings).await;
            EngineEvent::SettingsSaved(result.map(|()| settings))
        }
        EngineCommand::FetchStats => EngineEvent::StatsLoaded(backend.fetch_stats().await),
        EngineCommand::FetchMap => EngineEvent::MapLoaded(backend.fetch_map().await),
        EngineCommand::PickFolder => EngineEvent::FolderPicked(backend.pick_folder().await),
        EngineCommand::RunJob { session, kind } => {
            let sink = ChannelJobSink {
                session,
                tx: event_tx.clone(),
            };
            let result = backend.run_job(kind, &sink).await;
            EngineEvent::JobFinished { session, result }
        }
        EngineCommand::StartTimer { token, delay } => {
            tokio::time::sleep(delay).await;
            EngineEvent::TimerFired { token }
        }
    };
    let _ = event_tx.send(event);
}
