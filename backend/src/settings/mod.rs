//! Process configuration.
//!
//! [`ServiceSettings`] covers connection descriptors, the listening port and
//! the reported hostname, read through [`mockable::Env`] so tests can inject
//! values. [`StartupSettings`] holds the retry schedule and is layered by
//! OrthoConfig from `STARTUP_*` variables.

mod service;
mod startup;

pub use service::{
    DATABASE_FALLBACK_URL_ENV, DATABASE_URL_ENV, DEFAULT_FALLBACK_URL, DEFAULT_PORT, HOSTNAME_ENV,
    PORT_ENV, ServiceSettings, SettingsError,
};
pub use startup::StartupSettings;
