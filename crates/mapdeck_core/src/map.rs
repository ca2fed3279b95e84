use deck_logging::{deck_info, deck_warn};

use crate::{CourseMap, FetchError};

/// Holds the discovered course structure, replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapModel {
    map: Option<CourseMap>,
}

impl MapModel {
    pub fn map(&self) -> Option<&CourseMap> {
        self.map.as_ref()
    }

    /// True iff a map is present with at least one course.
    pub fn is_usable(&self) -> bool {
        self.course_count() > 0
    }

    pub fn course_count(&self) -> usize {
        self.map.as_ref().map_or(0, |map| map.courses.len())
    }

    /// `Ok(None)` means the backend has no map yet. Errors keep the previous map.
    pub fn apply(&mut self, result: Result<Option<CourseMap>, FetchError>) -> bool {
        match result {
            Ok(map) => {
                match &map {
                    Some(map) => deck_info!("map loaded with {} courses", map.courses.len()),
                    None => deck_info!("no map available yet"),
                }
                self.map = map;
                true
            }
            Err(err) => {
                deck_warn!("map refresh failed [{}]: {err}", err.category());
                false
            }
        }
    }
}
