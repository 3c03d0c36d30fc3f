use std::cmp::Ordering;

use chrono::Utc;
use log::debug;

use crate::error::Error;
use crate::parser::parse_appcast_async;
use crate::settings::keys;
use crate::traits::{FetchOptions, Notifier, SettingsStore, Transport};
use crate::version::compare_versions;

/// How a check was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Periodic background check.
    Scheduled,
    /// Check explicitly requested by the user.
    Manual,
}

impl CheckMode {
    fn fetch_options(self) -> FetchOptions {
        // A manual check always connects to the origin server; this finds
        // updates too new to have propagated through caches yet.
        FetchOptions {
            bypass_cache: matches!(self, CheckMode::Manual),
        }
    }

    fn honors_skipped_version(self) -> bool {
        // "Skip this version" silences scheduled checks only. A user asking
        // for a check by hand still gets to see the skipped version.
        match self {
            CheckMode::Scheduled => true,
            CheckMode::Manual => false,
        }
    }
}

/// Static configuration for an update checker.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Where the appcast lives.
    pub appcast_url: String,
    /// Build version of the running application.
    pub app_version: String,
}

/// Checks the appcast for updates and reports the outcome through the
/// notifier.
///
/// The checker remembers the version of the last enclosure it accepted and
/// threads it through successive parses, so a feed that later lists only
/// older entries cannot roll the offer backwards. All parses are serialized
/// through the single owner.
pub struct UpdateChecker<T, S, N> {
    config: CheckConfig,
    transport: T,
    settings: S,
    notifier: N,
    last_seen_version: Option<String>,
}

impl<T, S, N> UpdateChecker<T, S, N>
where
    T: Transport,
    S: SettingsStore,
    N: Notifier,
{
    pub fn new(config: CheckConfig, transport: T, settings: S, notifier: N) -> Self {
        Self {
            config,
            transport,
            settings,
            notifier,
            last_seen_version: None,
        }
    }

    /// Runs one update check. Every outcome is reported through the
    /// notifier; failures are additionally returned to the caller.
    pub async fn check(&mut self, mode: CheckMode) -> Result<(), Error> {
        match self.check_inner(mode).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notifier.error();
                Err(e)
            }
        }
    }

    async fn check_inner(&mut self, mode: CheckMode) -> Result<(), Error> {
        if self.config.appcast_url.is_empty() {
            return Err(Error::MissingAppcastUrl);
        }

        let bytes = self
            .transport
            .fetch(&self.config.appcast_url, mode.fetch_options())
            .await?;
        debug!(
            "downloaded {} bytes from {}",
            bytes.len(),
            self.config.appcast_url
        );

        let outcome = parse_appcast_async(bytes, self.last_seen_version.clone()).await?;
        self.last_seen_version = outcome.last_seen_version;
        let appcast = outcome.appcast;

        self.settings
            .write_timestamp(keys::LAST_CHECK_TIME, Utc::now())?;

        // The same or a newer version is already installed.
        if compare_versions(&self.config.app_version, &appcast.version) != Ordering::Less {
            self.notifier.no_updates();
            return Ok(());
        }

        if mode.honors_skipped_version() && self.is_skipped(&appcast.version)? {
            self.notifier.no_updates();
            return Ok(());
        }

        self.notifier.update_available(&appcast);
        Ok(())
    }

    fn is_skipped(&self, version: &str) -> Result<bool, Error> {
        let skipped = self.settings.read_string(keys::SKIP_THIS_VERSION)?;
        Ok(skipped.as_deref() == Some(version))
    }

    /// Records the user's choice to ignore this particular version.
    pub fn skip_version(&self, version: &str) -> Result<(), Error> {
        self.settings.write_string(keys::SKIP_THIS_VERSION, version)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::Value as JsonValue;

    use super::*;
    use crate::models::Appcast;
    use crate::settings::SettingsError;
    use crate::transport::TransportError;

    #[derive(Clone)]
    struct StaticTransport {
        body: Vec<u8>,
        seen_options: Arc<Mutex<Vec<FetchOptions>>>,
    }

    impl StaticTransport {
        fn new(body: &[u8]) -> Self {
            Self {
                body: body.to_vec(),
                seen_options: Arc::default(),
            }
        }
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn fetch(
            &self,
            _url: &str,
            options: FetchOptions,
        ) -> Result<Vec<u8>, TransportError> {
            self.seen_options.lock().unwrap().push(options);
            Ok(self.body.clone())
        }
    }

    #[derive(Default, Clone)]
    struct MemorySettings {
        map: Arc<Mutex<BTreeMap<String, JsonValue>>>,
    }

    impl SettingsStore for MemorySettings {
        fn read_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
            Ok(self
                .map
                .lock()
                .unwrap()
                .get(key)
                .and_then(JsonValue::as_str)
                .map(str::to_string))
        }

        fn write_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
            self.map
                .lock()
                .unwrap()
                .insert(key.to_string(), JsonValue::from(value));
            Ok(())
        }

        fn read_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>, SettingsError> {
            Ok(self
                .map
                .lock()
                .unwrap()
                .get(key)
                .and_then(JsonValue::as_i64)
                .and_then(|secs| DateTime::from_timestamp(secs, 0)))
        }

        fn write_timestamp(&self, key: &str, value: DateTime<Utc>) -> Result<(), SettingsError> {
            self.map
                .lock()
                .unwrap()
                .insert(key.to_string(), JsonValue::from(value.timestamp()));
            Ok(())
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        UpdateAvailable(String),
        NoUpdates,
        Error,
    }

    #[derive(Default, Clone)]
    struct RecordingNotifier {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl Notifier for RecordingNotifier {
        fn update_available(&self, appcast: &Appcast) {
            self.events
                .lock()
                .unwrap()
                .push(Event::UpdateAvailable(appcast.version.clone()));
        }

        fn no_updates(&self) {
            self.events.lock().unwrap().push(Event::NoUpdates);
        }

        fn error(&self) {
            self.events.lock().unwrap().push(Event::Error);
        }
    }

    const FEED: &[u8] = br#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0" xmlns:sparkle="http://www.andymatuschak.org/xml-namespaces/sparkle">
  <channel>
    <item>
      <title>Version 2.0</title>
      <enclosure url="https://example.com/app-2.0.zip" sparkle:version="2.0"/>
    </item>
  </channel>
</rss>"#;

    fn config(app_version: &str) -> CheckConfig {
        CheckConfig {
            appcast_url: "https://example.com/appcast.xml".to_string(),
            app_version: app_version.to_string(),
        }
    }

    #[tokio::test]
    async fn newer_version_notifies_update_available() {
        let notifier = RecordingNotifier::default();
        let mut checker = UpdateChecker::new(
            config("1.0"),
            StaticTransport::new(FEED),
            MemorySettings::default(),
            notifier.clone(),
        );

        checker.check(CheckMode::Scheduled).await.expect("check succeeds");

        assert_eq!(
            *notifier.events.lock().unwrap(),
            vec![Event::UpdateAvailable("2.0".to_string())]
        );
    }

    #[tokio::test]
    async fn same_or_newer_installed_version_notifies_no_updates() {
        for installed in ["2.0", "2.1"] {
            let notifier = RecordingNotifier::default();
            let mut checker = UpdateChecker::new(
                config(installed),
                StaticTransport::new(FEED),
                MemorySettings::default(),
                notifier.clone(),
            );

            checker.check(CheckMode::Scheduled).await.expect("check succeeds");

            assert_eq!(*notifier.events.lock().unwrap(), vec![Event::NoUpdates]);
        }
    }

    #[tokio::test]
    async fn last_check_time_is_recorded() {
        let settings = MemorySettings::default();
        let mut checker = UpdateChecker::new(
            config("1.0"),
            StaticTransport::new(FEED),
            settings.clone(),
            RecordingNotifier::default(),
        );

        checker.check(CheckMode::Scheduled).await.expect("check succeeds");

        assert!(settings
            .read_timestamp(keys::LAST_CHECK_TIME)
            .expect("read succeeds")
            .is_some());
    }

    #[tokio::test]
    async fn skipped_version_suppresses_scheduled_check() {
        let settings = MemorySettings::default();
        let notifier = RecordingNotifier::default();
        settings
            .write_string(keys::SKIP_THIS_VERSION, "2.0")
            .expect("write succeeds");

        let mut checker = UpdateChecker::new(
            config("1.0"),
            StaticTransport::new(FEED),
            settings,
            notifier.clone(),
        );
        checker.check(CheckMode::Scheduled).await.expect("check succeeds");

        assert_eq!(*notifier.events.lock().unwrap(), vec![Event::NoUpdates]);
    }

    #[tokio::test]
    async fn manual_check_ignores_skipped_version() {
        let settings = MemorySettings::default();
        let notifier = RecordingNotifier::default();
        settings
            .write_string(keys::SKIP_THIS_VERSION, "2.0")
            .expect("write succeeds");

        let mut checker = UpdateChecker::new(
            config("1.0"),
            StaticTransport::new(FEED),
            settings,
            notifier.clone(),
        );
        checker.check(CheckMode::Manual).await.expect("check succeeds");

        assert_eq!(
            *notifier.events.lock().unwrap(),
            vec![Event::UpdateAvailable("2.0".to_string())]
        );
    }

    #[tokio::test]
    async fn manual_check_bypasses_caches() {
        let transport = StaticTransport::new(FEED);
        let mut checker = UpdateChecker::new(
            config("1.0"),
            transport.clone(),
            MemorySettings::default(),
            RecordingNotifier::default(),
        );

        checker.check(CheckMode::Scheduled).await.expect("check succeeds");
        checker.check(CheckMode::Manual).await.expect("check succeeds");

        let seen = transport.seen_options.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                FetchOptions {
                    bypass_cache: false
                },
                FetchOptions { bypass_cache: true },
            ]
        );
    }

    #[tokio::test]
    async fn malformed_feed_notifies_error_and_propagates() {
        let notifier = RecordingNotifier::default();
        let mut checker = UpdateChecker::new(
            config("1.0"),
            StaticTransport::new(b"<rss><channel><item>"),
            MemorySettings::default(),
            notifier.clone(),
        );

        let result = checker.check(CheckMode::Scheduled).await;

        assert!(matches!(result, Err(Error::MalformedDocument(_))));
        assert_eq!(*notifier.events.lock().unwrap(), vec![Event::Error]);
    }

    #[tokio::test]
    async fn missing_appcast_url_is_an_error() {
        let notifier = RecordingNotifier::default();
        let mut config = config("1.0");
        config.appcast_url.clear();
        let mut checker = UpdateChecker::new(
            config,
            StaticTransport::new(FEED),
            MemorySettings::default(),
            notifier.clone(),
        );

        let result = checker.check(CheckMode::Manual).await;

        assert!(matches!(result, Err(Error::MissingAppcastUrl)));
        assert_eq!(*notifier.events.lock().unwrap(), vec![Event::Error]);
    }

    #[tokio::test]
    async fn later_feed_with_older_entries_does_not_offer_downgrade() {
        // First check accepts 2.0; a later feed listing only 1.5 must not
        // produce a fresh offer.
        let old_feed: &[u8] = br#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0" xmlns:sparkle="http://www.andymatuschak.org/xml-namespaces/sparkle">
  <channel>
    <item>
      <enclosure url="https://example.com/app-1.5.zip" sparkle:version="1.5"/>
    </item>
  </channel>
</rss>"#;

        let notifier = RecordingNotifier::default();
        let mut checker = UpdateChecker::new(
            config("1.0"),
            StaticTransport::new(FEED),
            MemorySettings::default(),
            notifier.clone(),
        );
        checker.check(CheckMode::Scheduled).await.expect("check succeeds");

        // Swap in a transport serving the stale feed; the retained
        // last-seen-version rejects the older enclosure.
        checker.transport = StaticTransport::new(old_feed);
        checker.check(CheckMode::Scheduled).await.expect("check succeeds");

        assert_eq!(
            *notifier.events.lock().unwrap(),
            vec![Event::UpdateAvailable("2.0".to_string()), Event::NoUpdates]
        );
    }

    #[tokio::test]
    async fn skip_version_persists_choice() {
        let settings = MemorySettings::default();
        let checker = UpdateChecker::new(
            config("1.0"),
            StaticTransport::new(FEED),
            settings.clone(),
            RecordingNotifier::default(),
        );

        checker.skip_version("2.0").expect("write succeeds");

        assert_eq!(
            settings
                .read_string(keys::SKIP_THIS_VERSION)
                .expect("read succeeds")
                .as_deref(),
            Some("2.0")
        );
    }
}
