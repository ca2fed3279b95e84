//! Lifecycle of the single streaming job the console may run.
//!
//! `Idle -> Starting -> Streaming -> {Succeeded | Failed} -> Idle`. Terminal
//! states are momentary: the owner calls [`JobSession::reset`] in the same
//! handling step that observed the terminal event.

use std::collections::BTreeMap;

use deck_logging::{deck_debug, deck_info, deck_warn};

use crate::{FetchError, JobKind, SessionError};

pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Request issued, response not yet open.
    Starting { id: SessionId, kind: JobKind },
    Streaming { id: SessionId, kind: JobKind },
    Succeeded { id: SessionId, kind: JobKind },
    Failed {
        id: SessionId,
        kind: JobKind,
        error: FetchError,
    },
}

impl SessionState {
    fn active(&self) -> Option<(SessionId, JobKind)> {
        match self {
            SessionState::Starting { id, kind } | SessionState::Streaming { id, kind } => {
                Some((*id, *kind))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded(JobKind),
    Failed(JobKind, FetchError),
}

impl JobOutcome {
    pub fn kind(&self) -> JobKind {
        match self {
            JobOutcome::Succeeded(kind) | JobOutcome::Failed(kind, _) => *kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct JobLog {
    session: SessionId,
    text: String,
}

impl JobLog {
    fn empty(session: SessionId) -> Self {
        Self {
            session,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSession {
    state: SessionState,
    last_id: SessionId,
    logs: BTreeMap<JobKind, JobLog>,
    last_outcome: Option<JobOutcome>,
}

impl JobSession {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    pub fn active_kind(&self) -> Option<JobKind> {
        self.state.active().map(|(_, kind)| kind)
    }

    /// Output of the most recent session of `kind`, if one ever ran.
    pub fn log(&self, kind: JobKind) -> Option<&str> {
        self.logs.get(&kind).map(|log| log.text.as_str())
    }

    /// Session that wrote the current log of `kind`.
    pub fn log_session(&self, kind: JobKind) -> Option<SessionId> {
        self.logs.get(&kind).map(|log| log.session)
    }

    pub fn last_outcome(&self) -> Option<&JobOutcome> {
        self.last_outcome.as_ref()
    }

    /// Opens a new session and resets that kind's log to the init line.
    pub fn start(&mut self, kind: JobKind) -> Result<SessionId, SessionError> {
        if let Some((active, active_kind)) = self.state.active() {
            return Err(SessionError::AlreadyRunning {
                requested: kind,
                active,
                active_kind,
            });
        }
        debug_assert!(self.is_idle(), "terminal session was not reset");

        self.last_id += 1;
        let id = self.last_id;
        self.state = SessionState::Starting { id, kind };
        self.logs.insert(
            kind,
            JobLog {
                session: id,
                text: format!("🚀 Initializing {}...\n", kind.tool_name()),
            },
        );
        deck_info!("session {id} starting {kind:?}");
        Ok(id)
    }

    pub fn mark_streaming(&mut self, id: SessionId) -> bool {
        match self.state {
            SessionState::Starting { id: current, kind } if current == id => {
                self.state = SessionState::Streaming { id, kind };
                true
            }
            _ => {
                deck_debug!("ignoring stream-open for session {id}");
                false
            }
        }
    }

    /// Appends decoded output verbatim, in arrival order.
    pub fn append(&mut self, id: SessionId, text: &str) -> bool {
        match self.state.active() {
            Some((current, kind)) if current == id => {
                self.logs
                    .entry(kind)
                    .or_insert_with(|| JobLog::empty(id))
                    .text
                    .push_str(text);
                true
            }
            _ => {
                deck_debug!("dropping {} bytes for stale session {id}", text.len());
                false
            }
        }
    }

    /// Moves the running session to its terminal state and appends the marker.
    ///
    /// Returns the outcome, or `None` if `id` is not the running session.
    pub fn finish(&mut self, id: SessionId, result: Result<(), FetchError>) -> Option<JobOutcome> {
        let (current, kind) = self.state.active()?;
        if current != id {
            deck_debug!("ignoring finish for stale session {id}");
            return None;
        }

        let log = &mut self.logs.entry(kind).or_insert_with(|| JobLog::empty(id)).text;
        let outcome = match result {
            Ok(()) => {
                log.push_str(&format!(
                    "\n✅ {} COMPLETE!",
                    kind.endpoint().to_uppercase()
                ));
                deck_info!("session {id} {kind:?} succeeded");
                self.state = SessionState::Succeeded { id, kind };
                JobOutcome::Succeeded(kind)
            }
            Err(error) => {
                log.push_str(&format!("\n❌ ERROR: {error}"));
                deck_warn!("session {id} {kind:?} failed [{}]: {error}", error.category());
                self.state = SessionState::Failed {
                    id,
                    kind,
                    error: error.clone(),
                };
                JobOutcome::Failed(kind, error)
            }
        };
        Some(outcome)
    }

    /// Returns a terminal session to `Idle`, remembering how it ended.
    pub fn reset(&mut self) {
        let outcome = match std::mem::take(&mut self.state) {
            SessionState::Succeeded { kind, .. } => JobOutcome::Succeeded(kind),
            SessionState::Failed { kind, error, .. } => JobOutcome::Failed(kind, error),
            other => {
                self.state = other;
                return;
            }
        };
        self.last_outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    #[test]
    fn second_start_is_rejected_while_running() {
        let mut session = JobSession::default();
        let id = session.start(JobKind::Scrape).unwrap();
        let err = session.start(JobKind::Download).unwrap_err();
        assert_eq!(
            err,
            SessionError::AlreadyRunning {
                requested: JobKind::Download,
                active: id,
                active_kind: JobKind::Scrape,
            }
        );
        assert_eq!(session.log(JobKind::Download), None);
    }

    #[test]
    fn success_walks_every_state() {
        let mut session = JobSession::default();
        let id = session.start(JobKind::Download).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Starting {
                id,
                kind: JobKind::Download
            }
        );
        assert!(session.mark_streaming(id));
        assert!(session.append(id, "a"));
        assert_eq!(
            session.finish(id, Ok(())),
            Some(JobOutcome::Succeeded(JobKind::Download))
        );
        assert!(matches!(session.state(), SessionState::Succeeded { .. }));

        session.reset();
        assert!(session.is_idle());
        assert_eq!(
            session.log(JobKind::Download),
            Some("🚀 Initializing Downloader...\na\n✅ DOWNLOAD COMPLETE!")
        );
    }

    #[test]
    fn failure_before_open_is_terminal() {
        let mut session = JobSession::default();
        let id = session.start(JobKind::Scrape).unwrap();
        let error = FetchError::new(FailureKind::Network, "connection refused");
        let outcome = session.finish(id, Err(error.clone()));
        assert_eq!(outcome, Some(JobOutcome::Failed(JobKind::Scrape, error)));
        session.reset();
        assert!(session
            .log(JobKind::Scrape)
            .unwrap()
            .ends_with("\n❌ ERROR: network error: connection refused"));
    }

    #[test]
    fn stale_events_are_ignored() {
        let mut session = JobSession::default();
        let first = session.start(JobKind::Scrape).unwrap();
        session.finish(first, Ok(()));
        session.reset();

        let second = session.start(JobKind::Scrape).unwrap();
        assert!(!session.append(first, "late"));
        assert_eq!(session.finish(first, Ok(())), None);
        assert!(session.append(second, "fresh"));
        assert!(!session.log(JobKind::Scrape).unwrap().contains("late"));
    }

    #[test]
    fn each_log_remembers_its_session() {
        let mut session = JobSession::default();
        assert_eq!(session.log_session(JobKind::Scrape), None);
        let first = session.start(JobKind::Scrape).unwrap();
        session.finish(first, Ok(()));
        session.reset();
        let second = session.start(JobKind::Scrape).unwrap();
        assert_eq!(session.log_session(JobKind::Scrape), Some(second));
        assert_ne!(first, second);
        assert_eq!(session.log_session(JobKind::Download), None);
    }

    #[test]
    fn reset_is_noop_while_running() {
        let mut session = JobSession::default();
        session.start(JobKind::Scrape).unwrap();
        session.reset();
        assert_eq!(session.active_kind(), Some(JobKind::Scrape));
    }
}
