/// Shared plugin settings
///
/// The host owns a settings store the wizard reads and writes. The endpoint
/// prefix typed into the settings form is what gets sent with the security
/// code, so it is read at request time rather than captured at mount.
use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::DEFAULT_ENDPOINT_PREFIX;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    endpoint_prefix: Arc<RwLock<String>>,
}

impl SettingsStore {
    pub fn new(endpoint_prefix: impl Into<String>) -> Self {
        Self {
            endpoint_prefix: Arc::new(RwLock::new(endpoint_prefix.into())),
        }
    }

    pub fn endpoint_prefix(&self) -> String {
        self.endpoint_prefix.read().clone()
    }

    pub fn set_endpoint_prefix(&self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        tracing::debug!(target: "pairing_wizard::settings", "endpoint_prefix = {}", prefix);
        *self.endpoint_prefix.write() = prefix;
    }

    /// Point the wizard back at the hosted service
    pub fn reset_endpoint_prefix(&self) {
        self.set_endpoint_prefix(DEFAULT_ENDPOINT_PREFIX);
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_PREFIX)
    }
}
