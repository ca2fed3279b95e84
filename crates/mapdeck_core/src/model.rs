use serde::{Deserialize, Serialize};

/// The two operator-editable values persisted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub target_url: String,
    #[serde(default)]
    pub output_dir: String,
}

/// Aggregate counters. Fields the backend omits read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub courses: u64,
    #[serde(default)]
    pub modules: u64,
    #[serde(default)]
    pub videos: u64,
    #[serde(default)]
    pub attachments: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CourseMap {
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: CourseDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CourseDetails {
    #[serde(default)]
    pub hierarchy: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "unitType")]
    pub unit_type: String,
    #[serde(default)]
    pub children: Option<Vec<Node>>,
}

impl Node {
    pub const CONTAINER_UNIT_TYPE: &'static str = "set";

    pub fn is_container(&self) -> bool {
        self.unit_type == Self::CONTAINER_UNIT_TYPE
    }

    /// Children as rendered: leaves never expose children.
    pub fn rendered_children(&self) -> &[Node] {
        match (&self.children, self.is_container()) {
            (Some(children), true) => children,
            _ => &[],
        }
    }
}

/// The two server-side jobs the console can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobKind {
    Scrape,
    Download,
}

impl JobKind {
    pub const ALL: [JobKind; 2] = [JobKind::Scrape, JobKind::Download];

    /// Path segment under `/api/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            JobKind::Scrape => "scrape",
            JobKind::Download => "download",
        }
    }

    /// Name of the external tool the job runs.
    pub fn tool_name(self) -> &'static str {
        match self {
            JobKind::Scrape => "Mapper",
            JobKind::Download => "Downloader",
        }
    }
}
