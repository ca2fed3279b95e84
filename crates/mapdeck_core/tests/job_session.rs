mod support;

use mapdeck_core::{
    update, Effect, FailureKind, FetchError, JobKind, JobOutcome, Msg, SessionState,
};
use pretty_assertions::assert_eq;
use support::*;

fn started(kind: JobKind) -> (mapdeck_core::AppState, u64) {
    init_logging();
    let map = course_map(vec![course("A", vec![])]);
    let state = ready_state(settings("http://x", "/out"), Some(map));
    let (state, effects) = update(state, Msg::StartJobClicked(kind));
    let session = match effects.as_slice() {
        [Effect::StartJob { session, kind: k }] if *k == kind => *session,
        other => panic!("unexpected effects {other:?}"),
    };
    (state, session)
}

#[test]
fn starting_disables_both_actions() {
    let (state, session) = started(JobKind::Scrape);
    let view = state.view();
    assert!(!view.scrape.enabled);
    assert!(!view.download.enabled);
    assert!(view.scrape.running);
    assert_eq!(
        state.session().state(),
        &SessionState::Starting {
            id: session,
            kind: JobKind::Scrape
        }
    );
    assert_eq!(
        view.scrape.log.as_deref(),
        Some("🚀 Initializing Mapper...\n")
    );

    let (_state, effects) = update(state, Msg::StartJobClicked(JobKind::Download));
    assert!(effects.is_empty());
}

#[test]
fn success_appends_marker_then_refreshes_once() {
    let (state, session) = started(JobKind::Scrape);
    let (state, effects) = run(
        state,
        vec![
            Msg::JobStreamOpened { session },
            Msg::JobOutput {
                session,
                text: "line 1\n".to_string(),
            },
            Msg::JobOutput {
                session,
                text: "line 2\n".to_string(),
            },
        ],
    );
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::JobFinished {
            session,
            result: Ok(()),
        },
    );
    assert_eq!(effects, vec![Effect::FetchStats, Effect::FetchMap]);
    assert!(state.session().is_idle());
    assert_eq!(
        state.session().last_outcome(),
        Some(&JobOutcome::Succeeded(JobKind::Scrape))
    );

    let view = state.view();
    assert_eq!(
        view.scrape.log.as_deref(),
        Some("🚀 Initializing Mapper...\nline 1\nline 2\n\n✅ SCRAPE COMPLETE!")
    );
    assert!(view.scrape.enabled);
    assert!(view.download.enabled);

    // A duplicate terminal event must not refresh again.
    let (_state, effects) = update(
        state,
        Msg::JobFinished {
            session,
            result: Ok(()),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn failure_appends_error_and_does_not_refresh() {
    let (state, session) = started(JobKind::Download);
    let error = FetchError::new(FailureKind::Stream, "connection reset");
    let (state, effects) = run(
        state,
        vec![
            Msg::JobStreamOpened { session },
            Msg::JobOutput {
                session,
                text: "partial".to_string(),
            },
            Msg::JobFinished {
                session,
                result: Err(error.clone()),
            },
        ],
    );
    assert!(effects.is_empty());
    assert!(state.session().is_idle());
    assert_eq!(
        state.session().last_outcome(),
        Some(&JobOutcome::Failed(JobKind::Download, error))
    );
    let log = state.view().download.log.unwrap();
    assert!(log.ends_with("partial\n❌ ERROR: stream interrupted: connection reset"));
    assert!(state.view().download.enabled);
}

#[test]
fn new_session_resets_only_its_own_log() {
    let (state, first) = started(JobKind::Scrape);
    let (state, _) = run(
        state,
        vec![
            Msg::JobOutput {
                session: first,
                text: "mapped".to_string(),
            },
            Msg::JobFinished {
                session: first,
                result: Ok(()),
            },
            Msg::StartJobClicked(JobKind::Download),
        ],
    );
    let view = state.view();
    assert!(view.scrape.log.unwrap().contains("mapped"));
    assert_eq!(
        view.download.log.as_deref(),
        Some("🚀 Initializing Downloader...\n")
    );
}

#[test]
fn output_from_stale_session_is_dropped() {
    let (state, first) = started(JobKind::Scrape);
    let (state, _) = run(
        state,
        vec![
            Msg::JobFinished {
                session: first,
                result: Err(FetchError::new(FailureKind::Network, "refused")),
            },
            Msg::StartJobClicked(JobKind::Scrape),
            Msg::JobOutput {
                session: first,
                text: "ghost".to_string(),
            },
        ],
    );
    assert!(!state.view().scrape.log.unwrap().contains("ghost"));
}
