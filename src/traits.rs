use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::Appcast;
use crate::settings::SettingsError;
use crate::transport::TransportError;

/// Options for a single appcast fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Connect straight to the origin server, skipping intermediate HTTP
    /// caches.
    pub bypass_cache: bool,
}

/// Download seam used to retrieve the appcast document.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, options: FetchOptions) -> Result<Vec<u8>, TransportError>;
}

/// Persistence seam for the few values an update checker needs to remember
/// between runs.
pub trait SettingsStore: Send + Sync {
    fn read_string(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn write_string(&self, key: &str, value: &str) -> Result<(), SettingsError>;
    fn read_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>, SettingsError>;
    fn write_timestamp(&self, key: &str, value: DateTime<Utc>) -> Result<(), SettingsError>;
}

/// Notification seam for reporting the outcome of a check.
pub trait Notifier: Send + Sync {
    fn update_available(&self, appcast: &Appcast);
    fn no_updates(&self);
    fn error(&self);
}
