use std::time::Duration;

use crate::{JobKind, SessionId, Settings};

/// How long the "Saved" confirmation stays visible.
pub const SETTINGS_STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadSettings,
    SaveSettings(Settings),
    FetchStats,
    FetchMap,
    PickFolder,
    StartJob { session: SessionId, kind: JobKind },
    ClearSettingsStatusAfter { token: u64, delay: Duration },
}
