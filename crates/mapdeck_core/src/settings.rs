use deck_logging::{deck_info, deck_warn};

use crate::{FetchError, Settings};

/// Inline status shown next to the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsStatus {
    Saving,
    Saved,
    SaveFailed,
    FolderPickerFailed,
}

impl SettingsStatus {
    pub fn text(self) -> &'static str {
        match self {
            SettingsStatus::Saving => "Saving...",
            SettingsStatus::Saved => "✅ Saved!",
            SettingsStatus::SaveFailed => "❌ Error",
            SettingsStatus::FolderPickerFailed => "❌ Folder picker error",
        }
    }
}

/// Confirmed settings plus the operator's unsaved form draft.
///
/// `cached` only changes on a successful load or a server-confirmed save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsStore {
    cached: Settings,
    draft: Settings,
    status: Option<SettingsStatus>,
    status_token: u64,
}

impl SettingsStore {
    pub fn settings(&self) -> &Settings {
        &self.cached
    }

    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    pub fn status(&self) -> Option<SettingsStatus> {
        self.status
    }

    /// Applies the startup load. Failures keep the defaults.
    pub fn apply_loaded(&mut self, result: Result<Settings, FetchError>) -> bool {
        match result {
            Ok(settings) => {
                deck_info!(
                    "settings loaded target_url_len={} output_dir={:?}",
                    settings.target_url.len(),
                    settings.output_dir
                );
                self.draft = settings.clone();
                self.cached = settings;
                true
            }
            Err(err) => {
                deck_warn!(
                    "settings load failed [{}], keeping defaults: {err}",
                    err.category()
                );
                false
            }
        }
    }

    pub fn set_draft_target_url(&mut self, value: String) {
        self.draft.target_url = value;
    }

    pub fn set_draft_output_dir(&mut self, value: String) {
        self.draft.output_dir = value;
    }

    /// Marks a save as in flight and returns the values to send.
    pub fn begin_save(&mut self) -> Settings {
        self.set_status(SettingsStatus::Saving);
        self.draft.clone()
    }

    /// Applies the server's answer to a save. Returns the token of the
    /// transient success status so the caller can schedule its expiry.
    pub fn apply_saved(&mut self, result: Result<Settings, FetchError>) -> Option<u64> {
        match result {
            Ok(settings) => {
                deck_info!("settings saved");
                self.cached = settings;
                Some(self.set_status(SettingsStatus::Saved))
            }
            Err(err) => {
                deck_warn!("settings save failed [{}]: {err}", err.category());
                self.set_status(SettingsStatus::SaveFailed);
                None
            }
        }
    }

    /// A picked folder only lands in the draft; saving makes it effective.
    pub fn apply_folder_picked(&mut self, result: Result<Option<String>, FetchError>) {
        match result {
            Ok(Some(folder)) => self.draft.output_dir = folder,
            Ok(None) => {}
            Err(err) => {
                deck_warn!("folder picker failed [{}]: {err}", err.category());
                self.set_status(SettingsStatus::FolderPickerFailed);
            }
        }
    }

    /// Clears the status if it is still the one identified by `token`.
    pub fn expire_status(&mut self, token: u64) -> bool {
        if self.status_token == token && self.status.is_some() {
            self.status = None;
            true
        } else {
            false
        }
    }

    fn set_status(&mut self, status: SettingsStatus) -> u64 {
        self.status_token += 1;
        self.status = Some(status);
        self.status_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    fn settings(url: &str, dir: &str) -> Settings {
        Settings {
            target_url: url.to_string(),
            output_dir: dir.to_string(),
        }
    }

    #[test]
    fn failed_save_keeps_cached_values() {
        let mut store = SettingsStore::default();
        store.apply_loaded(Ok(settings("http://a", "/a")));
        store.set_draft_target_url("http://b".to_string());
        let sent = store.begin_save();
        assert_eq!(sent.target_url, "http://b");
        assert_eq!(store.status(), Some(SettingsStatus::Saving));

        let token = store.apply_saved(Err(FetchError::new(FailureKind::Network, "refused")));
        assert_eq!(token, None);
        assert_eq!(store.settings(), &settings("http://a", "/a"));
        assert_eq!(store.status(), Some(SettingsStatus::SaveFailed));
    }

    #[test]
    fn stale_expiry_does_not_clear_newer_status() {
        let mut store = SettingsStore::default();
        let first = store.apply_saved(Ok(settings("u", ""))).unwrap();
        store.begin_save();
        assert!(!store.expire_status(first));
        assert_eq!(store.status(), Some(SettingsStatus::Saving));

        let second = store.apply_saved(Ok(settings("u", ""))).unwrap();
        assert!(store.expire_status(second));
        assert_eq!(store.status(), None);
    }

    #[test]
    fn cancelled_folder_pick_leaves_draft() {
        let mut store = SettingsStore::default();
        store.set_draft_output_dir("/keep".to_string());
        store.apply_folder_picked(Ok(None));
        assert_eq!(store.draft().output_dir, "/keep");

        store.apply_folder_picked(Ok(Some("/picked".to_string())));
        assert_eq!(store.draft().output_dir, "/picked");
        assert_eq!(store.settings().output_dir, "");
    }
}
