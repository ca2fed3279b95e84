use mapdeck_core::{JobKind, Msg, Page, TreePath};

pub const HELP: &str = "\
Commands:
  dashboard | courses | settings   switch page
  map                              view the course map
  refresh                          reload stats and map
  scrape | download                start a job
  url <text>                       edit target URL (empty clears)
  out <text>                       edit output directory
  pick                             choose output directory
  save                             save settings
  find <query>                     filter courses (empty clears)
  toggle <i.j.k>                   expand/collapse a tree entry
  help | quit";

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Msg(Msg),
    Help,
    Quit,
    /// Stdin reached end of input; exit once no job is running.
    Closed,
    Invalid(String),
}

/// Parses a command line. Blank lines yield `None`.
pub fn parse(line: &str) -> Option<Input> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.trim().is_empty() {
        return None;
    }
    let trimmed = line.trim_start();
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "dashboard" => Input::Msg(Msg::PageSelected(Page::Dashboard)),
        "courses" => Input::Msg(Msg::PageSelected(Page::Courses)),
        "settings" => Input::Msg(Msg::PageSelected(Page::Settings)),
        "map" => Input::Msg(Msg::ViewMapClicked),
        "refresh" => Input::Msg(Msg::RefreshClicked),
        "scrape" => Input::Msg(Msg::StartJobClicked(JobKind::Scrape)),
        "download" => Input::Msg(Msg::StartJobClicked(JobKind::Download)),
        "url" => Input::Msg(Msg::TargetUrlEdited(arg.to_string())),
        "out" => Input::Msg(Msg::OutputDirEdited(arg.to_string())),
        "pick" => Input::Msg(Msg::PickFolderClicked),
        "save" => Input::Msg(Msg::SaveSettingsClicked),
        "find" => Input::Msg(Msg::TreeFilterChanged(arg.to_string())),
        "toggle" => match TreePath::parse(arg) {
            Some(path) => Input::Msg(Msg::TreeToggled(path)),
            None => Input::Invalid(format!("toggle needs a path like 0.1, got {arg:?}")),
        },
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Invalid(format!("unknown command {other:?}; try help")),
    };
    Some(input)
}
