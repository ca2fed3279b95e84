use crate::{CourseMap, FetchError, JobKind, SessionId, Settings, Stats, TreePath};

/// Console pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Courses,
    Settings,
}

/// Everything that can happen to the console: operator commands first,
/// backend results after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Console opened; kicks off the settings load.
    Started,
    /// Operator switched page.
    PageSelected(Page),
    /// Operator asked to see the discovered map.
    ViewMapClicked,
    /// Operator asked to re-fetch stats and map.
    RefreshClicked,
    /// Operator edited the target URL field.
    TargetUrlEdited(String),
    /// Operator edited the output directory field.
    OutputDirEdited(String),
    SaveSettingsClicked,
    PickFolderClicked,
    /// Operator started the mapper or the downloader.
    StartJobClicked(JobKind),
    /// Operator typed in the course search box.
    TreeFilterChanged(String),
    /// Operator expanded or collapsed a tree entry.
    TreeToggled(TreePath),

    SettingsLoaded(Result<Settings, FetchError>),
    /// Server answer to a save, carrying the values that were sent.
    SettingsSaved(Result<Settings, FetchError>),
    /// Timer for the transient "Saved" status fired.
    SettingsStatusExpired { token: u64 },
    /// `Ok(None)` means the operator cancelled the picker.
    FolderPicked(Result<Option<String>, FetchError>),
    StatsLoaded(Result<Stats, FetchError>),
    /// `Ok(None)` means the backend has no map yet.
    MapLoaded(Result<Option<CourseMap>, FetchError>),
    /// Job response accepted; output will follow.
    JobStreamOpened { session: SessionId },
    /// Decoded job output, in stream order.
    JobOutput { session: SessionId, text: String },
    /// End of the job stream, clean or not.
    JobFinished {
        session: SessionId,
        result: Result<(), FetchError>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}
