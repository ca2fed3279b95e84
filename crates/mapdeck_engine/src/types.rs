use std::time::Duration;

use mapdeck_core::{CourseMap, FetchError, JobKind, SessionId, Settings, Stats};

/// Work the engine performs on behalf of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    LoadSettings,
    SaveSettings(Settings),
    FetchStats,
    FetchMap,
    PickFolder,
    RunJob { session: SessionId, kind: JobKind },
    /// Emits [`EngineEvent::TimerFired`] after `delay`.
    StartTimer { token: u64, delay: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SettingsLoaded(Result<Settings, FetchError>),
    /// Carries the values that were saved.
    SettingsSaved(Result<Settings, FetchError>),
    StatsLoaded(Result<Stats, FetchError>),
    MapLoaded(Result<Option<CourseMap>, FetchError>),
    FolderPicked(Result<Option<String>, FetchError>),
    JobOpened {
        session: SessionId,
    },
    JobOutput {
        session: SessionId,
        text: String,
    },
    /// Always the last event of a session.
    JobFinished {
        session: SessionId,
        result: Result<(), FetchError>,
    },
    TimerFired {
        token: u64,
    },
}
