use deck_logging::{deck_error, deck_warn};

use crate::{policy, AppState, Effect, JobKind, JobOutcome, Msg, Page, SETTINGS_STATUS_TTL};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::LoadSettings],
        Msg::SettingsLoaded(result) => {
            // Stats and map are only requested once settings are in place.
            if state.settings_mut().apply_loaded(result) {
                state.mark_dirty();
            }
            refresh_all(&mut state)
        }
        Msg::PageSelected(page) => select_page(&mut state, page),
        Msg::ViewMapClicked => select_page(&mut state, Page::Courses),
        Msg::RefreshClicked => refresh_all(&mut state),
        Msg::TargetUrlEdited(value) => {
            state.settings_mut().set_draft_target_url(value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::OutputDirEdited(value) => {
            state.settings_mut().set_draft_output_dir(value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SaveSettingsClicked => {
            let draft = state.settings_mut().begin_save();
            state.mark_dirty();
            vec![Effect::SaveSettings(draft)]
        }
        Msg::SettingsSaved(result) => {
            let token = state.settings_mut().apply_saved(result);
            state.mark_dirty();
            token
                .map(|token| Effect::ClearSettingsStatusAfter {
                    token,
                    delay: SETTINGS_STATUS_TTL,
                })
                .into_iter()
                .collect()
        }
        Msg::SettingsStatusExpired { token } => {
            if state.settings_mut().expire_status(token) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PickFolderClicked => vec![Effect::PickFolder],
        Msg::FolderPicked(result) => {
            state.settings_mut().apply_folder_picked(result);
            state.mark_dirty();
            Vec::new()
        }
        Msg::StartJobClicked(kind) => start_job(&mut state, kind),
        Msg::TreeFilterChanged(query) => {
            state.tree_mut().filter(&query);
            state.mark_dirty();
            Vec::new()
        }
        Msg::TreeToggled(path) => {
            if state.tree_mut().toggle(&path) {
                state.mark_dirty();
            } else {
                deck_warn!("no expandable tree entry at {path}");
            }
            Vec::new()
        }
        Msg::StatsLoaded(result) => {
            state.stats_mut().apply(result);
            state.mark_dirty();
            Vec::new()
        }
        Msg::MapLoaded(result) => {
            if state.map_mut().apply(result) {
                if state.page() == Page::Courses {
                    state.rebuild_tree();
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobStreamOpened { session } => {
            if state.session_mut().mark_streaming(session) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobOutput { session, text } => {
            if state.session_mut().append(session, &text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobFinished { session, result } => finish_job(&mut state, session, result),
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn refresh_all(state: &mut AppState) -> Vec<Effect> {
    state.stats_mut().begin_refresh();
    state.mark_dirty();
    vec![Effect::FetchStats, Effect::FetchMap]
}

fn select_page(state: &mut AppState, page: Page) -> Vec<Effect> {
    state.set_page(page);
    state.mark_dirty();
    match page {
        Page::Dashboard => {
            state.stats_mut().begin_refresh();
            vec![Effect::FetchStats]
        }
        Page::Courses => {
            state.rebuild_tree();
            Vec::new()
        }
        Page::Settings => Vec::new(),
    }
}

fn start_job(state: &mut AppState, kind: JobKind) -> Vec<Effect> {
    let enablement = policy::derive(state.settings().settings(), state.map());
    let permitted = match kind {
        JobKind::Scrape => enablement.can_scrape,
        JobKind::Download => enablement.can_download,
    };
    if !permitted {
        deck_warn!("{kind:?} requested while not permitted; ignoring");
        return Vec::new();
    }

    match state.session_mut().start(kind) {
        Ok(session) => {
            state.mark_dirty();
            vec![Effect::StartJob { session, kind }]
        }
        Err(err) => {
            // The start control is disabled while a session runs.
            deck_error!("session contract violated: {err}");
            Vec::new()
        }
    }
}

fn finish_job(
    state: &mut AppState,
    session: crate::SessionId,
    result: Result<(), crate::FetchError>,
) -> Vec<Effect> {
    let Some(outcome) = state.session_mut().finish(session, result) else {
        return Vec::new();
    };
    state.session_mut().reset();
    state.mark_dirty();
    match outcome {
        JobOutcome::Succeeded(_) => refresh_all(state),
        JobOutcome::Failed(..) => Vec::new(),
    }
}
