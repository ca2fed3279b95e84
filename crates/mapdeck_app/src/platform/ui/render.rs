use std::collections::BTreeMap;

use mapdeck_core::{
    AppViewModel, JobKind, JobOutcome, JobPanelView, Page, SessionId, TreeLineKind, TreeLineView,
};

/// Turns view models into terminal output.
///
/// The status frame is reprinted only when it changes. Job logs are printed
/// as appended suffixes so streaming output reads like a live pane.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    last_frame: String,
    printed_logs: BTreeMap<JobKind, PrintedLog>,
}

/// How much of one session's log is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PrintedLog {
    session: Option<SessionId>,
    len: usize,
}

impl ConsoleRenderer {
    pub fn render(&mut self, view: &AppViewModel) -> String {
        let mut out = String::new();

        let frame = render_frame(view);
        if frame != self.last_frame {
            out.push_str(&frame);
            self.last_frame = frame;
        }

        for kind in JobKind::ALL {
            let panel = view.panel(kind);
            let Some(log) = panel.log.as_deref() else {
                continue;
            };
            let printed = self.printed_logs.entry(kind).or_insert(PrintedLog {
                session: panel.log_session,
                len: 0,
            });
            if printed.session != panel.log_session {
                *printed = PrintedLog {
                    session: panel.log_session,
                    len: 0,
                };
            }
            if log.len() > printed.len && log.is_char_boundary(printed.len) {
                let delta = &log[printed.len..];
                if printed.len == 0 {
                    out.push_str(&format!("\n--- {} output ---\n", kind.tool_name()));
                }
                out.push_str(delta);
                if !delta.ends_with('\n') {
                    out.push('\n');
                }
                printed.len = log.len();
            }
        }
        out
    }
}

pub fn render_frame(view: &AppViewModel) -> String {
    let mut lines = vec![format!(
        "== Mapdeck [{}] == {}",
        view.global_status.label(),
        page_label(view.page)
    )];

    match view.page {
        Page::Dashboard => {
            let stats = &view.stats;
            lines.push(format!(
                "Courses {} | Modules {} | Videos {} | Attachments {}{}",
                stats.courses,
                stats.modules,
                stats.videos,
                stats.attachments,
                if view.stats_refreshing { " (refreshing)" } else { "" }
            ));
            lines.push(panel_line("scrape", &view.scrape));
            lines.push(panel_line("download", &view.download));
            if let Some(outcome) = &view.last_outcome {
                lines.push(outcome_line(outcome));
            }
        }
        Page::Courses => {
            if !view.tree_query.is_empty() {
                lines.push(format!(
                    "Filter: {:?} ({} hidden)",
                    view.tree_query, view.tree_hidden_sections
                ));
            }
            match view.tree_placeholder {
                Some(placeholder) => lines.push(placeholder.to_string()),
                None => lines.extend(view.tree_lines.iter().map(tree_line)),
            }
        }
        Page::Settings => {
            lines.push(format!(
                "Target URL:  {}",
                field(&view.settings_draft.target_url)
            ));
            lines.push(format!(
                "Output dir:  {}",
                field(&view.settings_draft.output_dir)
            ));
            if view.settings_draft != view.settings {
                lines.push("(unsaved changes)".to_string());
            }
            if let Some(status) = &view.settings_status {
                lines.push(status.clone());
            }
        }
    }

    let mut frame = lines.join("\n");
    frame.push('\n');
    frame
}

fn page_label(page: Page) -> &'static str {
    match page {
        Page::Dashboard => "Dashboard",
        Page::Courses => "Courses",
        Page::Settings => "Settings",
    }
}

fn panel_line(name: &str, panel: &JobPanelView) -> String {
    let state = if panel.running {
        "running"
    } else if panel.enabled {
        "ready"
    } else {
        "disabled"
    };
    format!("[{name}: {state}] {}", panel.hint)
}

fn outcome_line(outcome: &JobOutcome) -> String {
    let tool = outcome.kind().tool_name();
    match outcome {
        JobOutcome::Succeeded(_) => format!("Last job: {tool} succeeded"),
        JobOutcome::Failed(_, error) => format!("Last job: {tool} failed ({error})"),
    }
}

fn tree_line(line: &TreeLineView) -> String {
    let indent = "  ".repeat(line.depth);
    let marker = match line.kind {
        TreeLineKind::Course { expanded } => format!("{} 📂", arrow(expanded)),
        TreeLineKind::Container { expanded } => format!("{} 📁", arrow(expanded)),
        TreeLineKind::Leaf => "  📄".to_string(),
    };
    format!("{indent}{marker} {} [{}]", line.label, line.path)
}

fn arrow(expanded: bool) -> &'static str {
    if expanded {
        "▾"
    } else {
        "▸"
    }
}

fn field(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapdeck_core::{GlobalStatus, TreePath};
    use pretty_assertions::assert_eq;

    fn dashboard() -> AppViewModel {
        AppViewModel {
            global_status: GlobalStatus::Ready,
            scrape: JobPanelView {
                enabled: true,
                running: false,
                hint: "✅ URL Ready".to_string(),
                log: None,
                log_session: None,
            },
            ..AppViewModel::default()
        }
    }

    #[test]
    fn frame_is_printed_once_until_it_changes() {
        let mut renderer = ConsoleRenderer::default();
        let view = dashboard();
        let first = renderer.render(&view);
        assert!(first.starts_with("== Mapdeck [Ready] == Dashboard\n"));
        assert!(first.contains("[scrape: ready] ✅ URL Ready"));
        assert!(first.contains("[download: disabled]"));
        assert_eq!(renderer.render(&view), "");
    }

    #[test]
    fn logs_print_only_new_text() {
        let mut renderer = ConsoleRenderer::default();
        let mut view = dashboard();
        view.scrape.log = Some("🚀 Initializing Mapper...\n".to_string());
        view.scrape.log_session = Some(1);
        let first = renderer.render(&view);
        assert!(first.ends_with("--- Mapper output ---\n🚀 Initializing Mapper...\n"));

        view.scrape.log = Some("🚀 Initializing Mapper...\nfound 2\n".to_string());
        assert_eq!(renderer.render(&view), "found 2\n");

        view.scrape.log = Some("🚀 Init\n".to_string());
        view.scrape.log_session = Some(2);
        assert_eq!(renderer.render(&view), "\n--- Mapper output ---\n🚀 Init\n");
    }

    #[test]
    fn new_session_reprints_even_when_its_log_is_longer() {
        let mut renderer = ConsoleRenderer::default();
        let mut view = dashboard();
        view.scrape.log = Some("🚀 Initializing Mapper...\n\n❌ ERROR: x".to_string());
        view.scrape.log_session = Some(1);
        renderer.render(&view);

        let fresh = "🚀 Initializing Mapper...\nFound 12 courses, mapping module 1 of 40\n";
        view.scrape.log = Some(fresh.to_string());
        view.scrape.log_session = Some(2);
        assert_eq!(
            renderer.render(&view),
            format!("\n--- Mapper output ---\n{fresh}")
        );
    }

    #[test]
    fn last_outcome_names_the_tool() {
        let view = AppViewModel {
            last_outcome: Some(JobOutcome::Succeeded(JobKind::Download)),
            ..AppViewModel::default()
        };
        assert!(render_frame(&view).contains("Last job: Downloader succeeded\n"));
    }

    #[test]
    fn tree_lines_show_paths_and_nesting() {
        let view = AppViewModel {
            page: Page::Courses,
            tree_lines: vec![
                TreeLineView {
                    depth: 0,
                    path: TreePath(vec![0]),
                    label: "Rust".to_string(),
                    kind: TreeLineKind::Course { expanded: true },
                },
                TreeLineView {
                    depth: 1,
                    path: TreePath(vec![0, 0]),
                    label: "Intro".to_string(),
                    kind: TreeLineKind::Leaf,
                },
            ],
            ..AppViewModel::default()
        };
        let frame = render_frame(&view);
        assert!(frame.contains("▾ 📂 Rust [0]\n"));
        assert!(frame.contains("    📄 Intro [0.0]\n"));
    }
}
