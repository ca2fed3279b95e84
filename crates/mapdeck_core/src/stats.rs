use deck_logging::{deck_debug, deck_warn};

use crate::{FetchError, Stats};

/// Last good counter snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsView {
    snapshot: Stats,
    refreshing: bool,
}

impl StatsView {
    pub fn snapshot(&self) -> Stats {
        self.snapshot
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
    }

    /// Replaces all four counters at once, or keeps the old snapshot on error.
    pub fn apply(&mut self, result: Result<Stats, FetchError>) -> bool {
        self.refreshing = false;
        match result {
            Ok(stats) => {
                deck_debug!("stats refreshed {stats:?}");
                self.snapshot = stats;
                true
            }
            Err(err) => {
                deck_warn!("stats refresh failed [{}]: {err}", err.category());
                false
            }
        }
    }
}
