#![allow(dead_code)]

use mapdeck_core::{update, AppState, Course, CourseDetails, CourseMap, Effect, Msg, Node, Settings, Stats};

pub fn init_logging() {
    deck_logging::initialize_for_tests();
}

pub fn settings(url: &str, dir: &str) -> Settings {
    Settings {
        target_url: url.to_string(),
        output_dir: dir.to_string(),
    }
}

pub fn leaf(title: &str) -> Node {
    Node {
        title: title.to_string(),
        unit_type: "module".to_string(),
        children: None,
    }
}

pub fn set(title: &str, children: Vec<Node>) -> Node {
    Node {
        title: title.to_string(),
        unit_type: "set".to_string(),
        children: Some(children),
    }
}

pub fn course(title: &str, hierarchy: Vec<Node>) -> Course {
    Course {
        title: title.to_string(),
        details: CourseDetails { hierarchy },
    }
}

pub fn course_map(courses: Vec<Course>) -> CourseMap {
    CourseMap { courses }
}

/// Drives `msgs` through `update`, collecting every emitted effect.
pub fn run(state: AppState, msgs: Vec<Msg>) -> (AppState, Vec<Effect>) {
    msgs.into_iter().fold((state, Vec::new()), |(state, mut all), msg| {
        let (state, effects) = update(state, msg);
        all.extend(effects);
        (state, all)
    })
}

/// A console that finished startup with the given settings and map.
pub fn ready_state(settings: Settings, map: Option<CourseMap>) -> AppState {
    let (state, _) = run(
        AppState::new(),
        vec![
            Msg::Started,
            Msg::SettingsLoaded(Ok(settings)),
            Msg::StatsLoaded(Ok(Stats::default())),
            Msg::MapLoaded(Ok(map)),
        ],
    );
    state
}
