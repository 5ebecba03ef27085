//! Host capabilities injected into the panel.
//!
//! The panel never reaches into ambient state: persistence and stream
//! subscription are explicit constructor parameters, so embeddings and
//! tests can substitute their own implementations.

use crate::settings::SettingsForm;

/// Fixed key embeddings should store the config blob under.
pub const PANEL_STORAGE_KEY: &str = "steering-wheel-gauge";

/// Opaque key-value persistence for the config blob.
///
/// Writes are best effort: the previous snapshot is simply overwritten and
/// failures are not reported back to the panel.
pub trait ConfigStore {
    /// The last persisted blob, if any.
    fn read_config(&self) -> Option<String>;
    /// Overwrite the persisted blob.
    fn write_config(&mut self, blob: &str);
}

/// Stream subscription and settings-form delivery.
///
/// `subscribe` carries replace semantics: the panel holds at most one
/// subscription and always unsubscribes before subscribing to a new stream.
pub trait StreamHost {
    /// Register interest in `stream`.
    fn subscribe(&mut self, stream: &str);
    /// Drop the current subscription, if any.
    fn unsubscribe(&mut self);
    /// Receive the regenerated settings form after a config change.
    fn update_settings_form(&mut self, form: &SettingsForm);
}

/// In-memory [`ConfigStore`] for demos and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    /// Start from an already-persisted blob.
    pub fn with_blob(blob: impl Into<String>) -> MemoryStore {
        MemoryStore {
            blob: Some(blob.into()),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn read_config(&self) -> Option<String> {
        self.blob.clone()
    }

    fn write_config(&mut self, blob: &str) {
        self.blob = Some(blob.to_string());
    }
}

/// [`StreamHost`] that records the current interest and the latest form.
///
/// Suitable for embeddings where frames arrive on a channel and the panel
/// does its own stream filtering (the egui app in this crate), and for
/// tests that inspect what the panel asked for.
#[derive(Debug, Default)]
pub struct PassiveHost {
    /// Currently subscribed stream, if any.
    pub stream: Option<String>,
    /// Most recently pushed settings form.
    pub form: Option<SettingsForm>,
}

impl StreamHost for PassiveHost {
    fn subscribe(&mut self, stream: &str) {
        self.stream = Some(stream.to_string());
    }

    fn unsubscribe(&mut self) {
        self.stream = None;
    }

    fn update_settings_form(&mut self, form: &SettingsForm) {
        self.form = Some(form.clone());
    }
}
