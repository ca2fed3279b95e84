//! The single place that decides which console actions are permitted.

use crate::{MapModel, Settings};

/// Label shown when no output directory is configured.
pub const DEFAULT_OUTPUT_LABEL: &str = "downloads";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobalStatus {
    #[default]
    SetupRequired,
    Ready,
}

impl GlobalStatus {
    pub fn label(self) -> &'static str {
        match self {
            GlobalStatus::SetupRequired => "Setup Required",
            GlobalStatus::Ready => "Ready",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Enablement {
    pub can_scrape: bool,
    pub can_download: bool,
    pub scrape_hint: String,
    pub download_hint: String,
    pub global_status: GlobalStatus,
}

/// Derives enablement from the confirmed settings and the map model.
///
/// Global status only reflects whether any work can start; it ignores the map.
pub fn derive(settings: &Settings, map: &MapModel) -> Enablement {
    let can_scrape = !settings.target_url.is_empty();
    let (scrape_hint, global_status) = if can_scrape {
        ("✅ URL Ready".to_string(), GlobalStatus::Ready)
    } else {
        (
            "⚠️ Set Target URL in Settings first.".to_string(),
            GlobalStatus::SetupRequired,
        )
    };

    let can_download = map.is_usable();
    let download_hint = if can_download {
        let sink = if settings.output_dir.is_empty() {
            DEFAULT_OUTPUT_LABEL
        } else {
            settings.output_dir.as_str()
        };
        format!(
            "✅ Map loaded ({} courses). Files sink: {}",
            map.course_count(),
            sink
        )
    } else {
        "⚠️ You must Map the course first.".to_string()
    };

    Enablement {
        can_scrape,
        can_download,
        scrape_hint,
        download_hint,
        global_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Course, CourseMap};

    fn map_with(courses: usize) -> MapModel {
        let mut model = MapModel::default();
        model.apply(Ok(Some(CourseMap {
            courses: vec![Course::default(); courses],
        })));
        model
    }

    #[test]
    fn empty_url_requires_setup_regardless_of_map() {
        for map in [MapModel::default(), map_with(0), map_with(3)] {
            let e = derive(&Settings::default(), &map);
            assert!(!e.can_scrape);
            assert_eq!(e.global_status, GlobalStatus::SetupRequired);
            assert!(e.scrape_hint.contains("Set Target URL"));
        }
    }

    #[test]
    fn any_url_is_ready_regardless_of_map() {
        let settings = Settings {
            target_url: "x".to_string(),
            output_dir: String::new(),
        };
        for map in [MapModel::default(), map_with(0), map_with(2)] {
            let e = derive(&settings, &map);
            assert!(e.can_scrape);
            assert_eq!(e.global_status, GlobalStatus::Ready);
        }
    }

    #[test]
    fn empty_course_list_disables_download_like_missing_map() {
        let settings = Settings::default();
        assert_eq!(
            derive(&settings, &map_with(0)),
            derive(&settings, &MapModel::default())
        );
        assert!(!derive(&settings, &map_with(0)).can_download);
    }

    #[test]
    fn download_hint_falls_back_to_default_sink() {
        let e = derive(&Settings::default(), &map_with(2));
        assert!(e.can_download);
        assert_eq!(e.download_hint, "✅ Map loaded (2 courses). Files sink: downloads");
    }
}
