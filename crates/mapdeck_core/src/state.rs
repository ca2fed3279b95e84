use crate::view_model::{AppViewModel, JobPanelView};
use crate::{
    policy, JobKind, JobSession, MapModel, Page, SettingsStore, StatsView, TreeView,
    EMPTY_TREE_PLACEHOLDER,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: Page,
    settings: SettingsStore,
    stats: StatsView,
    map: MapModel,
    session: JobSession,
    tree: TreeView,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn stats(&self) -> &StatsView {
        &self.stats
    }

    pub fn map(&self) -> &MapModel {
        &self.map
    }

    pub fn session(&self) -> &JobSession {
        &self.session
    }

    pub fn tree(&self) -> &TreeView {
        &self.tree
    }

    pub fn view(&self) -> AppViewModel {
        let enablement = policy::derive(self.settings.settings(), &self.map);
        let idle = self.session.is_idle();
        let panel = |kind: JobKind, permitted: bool, hint: &str| JobPanelView {
            enabled: permitted && idle,
            running: self.session.active_kind() == Some(kind),
            hint: hint.to_string(),
            log: self.session.log(kind).map(ToOwned::to_owned),
            log_session: self.session.log_session(kind),
        };

        AppViewModel {
            page: self.page,
            global_status: enablement.global_status,
            stats: self.stats.snapshot(),
            stats_refreshing: self.stats.is_refreshing(),
            scrape: panel(JobKind::Scrape, enablement.can_scrape, &enablement.scrape_hint),
            download: panel(
                JobKind::Download,
                enablement.can_download,
                &enablement.download_hint,
            ),
            settings: self.settings.settings().clone(),
            settings_draft: self.settings.draft().clone(),
            settings_status: self.settings.status().map(|s| s.text().to_string()),
            tree_query: self.tree.query().to_string(),
            tree_lines: self.tree.lines(),
            tree_hidden_sections: self
                .tree
                .sections()
                .iter()
                .filter(|section| !section.visible)
                .count(),
            tree_placeholder: self.tree.is_empty().then_some(EMPTY_TREE_PLACEHOLDER),
            last_outcome: self.session.last_outcome().cloned(),
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    pub(crate) fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    pub(crate) fn stats_mut(&mut self) -> &mut StatsView {
        &mut self.stats
    }

    pub(crate) fn map_mut(&mut self) -> &mut MapModel {
        &mut self.map
    }

    pub(crate) fn session_mut(&mut self) -> &mut JobSession {
        &mut self.session
    }

    pub(crate) fn tree_mut(&mut self) -> &mut TreeView {
        &mut self.tree
    }

    /// Rebuilds the tree from the current map, keeping the search query.
    pub(crate) fn rebuild_tree(&mut self) {
        let query = self.tree.query().to_string();
        self.tree = TreeView::build(self.map.map(), &query);
    }
}
