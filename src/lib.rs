//! Printer pairing wizard
//!
//! Links a printer to a remote monitoring account: a six-digit security code
//! is collected, verified through the printer host's plugin command endpoint,
//! and the linked printer is then named.
//!
//! The wizard logic is sans-IO. [`wizard::WizardController`] takes the
//! current time as a parameter and queues API calls instead of making them;
//! [`runtime::WizardRuntime`] wires it to threads, channels and HTTP.

pub mod api;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod messaging;
pub mod pairing;
pub mod runtime;
pub mod settings;
pub mod timer;
pub mod wizard;

pub use api::{HttpApiClient, PairingApi};
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use runtime::{HostCommand, WizardHandle, WizardRuntime};
pub use settings::SettingsStore;
