use crate::{GlobalStatus, JobKind, JobOutcome, Page, SessionId, Settings, Stats, TreePath};

/// Shown in place of the tree when there are no courses to render.
pub const EMPTY_TREE_PLACEHOLDER: &str = "No data. Map the course first.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub page: Page,
    pub global_status: GlobalStatus,
    pub stats: Stats,
    pub stats_refreshing: bool,
    pub scrape: JobPanelView,
    pub download: JobPanelView,
    pub settings: Settings,
    pub settings_draft: Settings,
    pub settings_status: Option<String>,
    pub tree_query: String,
    pub tree_lines: Vec<TreeLineView>,
    pub tree_hidden_sections: usize,
    pub tree_placeholder: Option<&'static str>,
    pub last_outcome: Option<JobOutcome>,
}

impl AppViewModel {
    pub fn panel(&self, kind: JobKind) -> &JobPanelView {
        match kind {
            JobKind::Scrape => &self.scrape,
            JobKind::Download => &self.download,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobPanelView {
    /// Whether the start action may be triggered right now.
    pub enabled: bool,
    pub running: bool,
    pub hint: String,
    pub log: Option<String>,
    /// Session that wrote `log`; changes when a new run starts.
    pub log_session: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLineView {
    pub depth: usize,
    pub path: TreePath,
    pub label: String,
    pub kind: TreeLineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLineKind {
    Course { expanded: bool },
    Container { expanded: bool },
    Leaf,
}
