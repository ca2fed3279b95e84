//! Mapdeck core: pure console state machine and view-model helpers.
mod effect;
mod error;
mod map;
mod model;
mod msg;
mod policy;
mod session;
mod settings;
mod state;
mod stats;
mod tree;
mod update;
mod view_model;

pub use effect::{Effect, SETTINGS_STATUS_TTL};
pub use error::{ErrorCategory, FailureKind, FetchError, SessionError};
pub use map::MapModel;
pub use model::{Course, CourseDetails, CourseMap, JobKind, Node, Settings, Stats};
pub use msg::{Msg, Page};
pub use policy::{derive as derive_enablement, Enablement, GlobalStatus, DEFAULT_OUTPUT_LABEL};
pub use session::{JobOutcome, JobSession, SessionId, SessionState};
pub use settings::{SettingsStatus, SettingsStore};
pub use state::AppState;
pub use stats::StatsView;
pub use tree::{TreeNode, TreePath, TreeSection, TreeView};
pub use update::update;
pub use view_model::{AppViewModel, JobPanelView, TreeLineKind, TreeLineView, EMPTY_TREE_PLACEHOLDER};
