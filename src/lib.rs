//! Appcast-driven update checking.
//!
//! An appcast is an RSS-style feed describing the versions of an
//! application available for download. This crate parses such feeds into an
//! [`Appcast`] descriptor, compares free-form version strings, and drives a
//! complete check-for-updates pass over pluggable transport, settings, and
//! notification seams.
//!
//! ```
//! use std::cmp::Ordering;
//! use sparkcast::{compare_versions, parse_appcast};
//!
//! let xml = br#"<?xml version="1.0"?>
//! <rss xmlns:sparkle="http://www.andymatuschak.org/xml-namespaces/sparkle">
//!   <channel>
//!     <item>
//!       <enclosure url="https://example.com/app-1.5.zip" sparkle:version="1.5"/>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let outcome = parse_appcast(&xml[..], None)?;
//! assert_eq!(outcome.appcast.version, "1.5");
//! assert_eq!(compare_versions("1.4", &outcome.appcast.version), Ordering::Less);
//! # Ok::<(), sparkcast::Error>(())
//! ```

pub mod checker;
pub mod error;
pub mod models;
pub mod parser;
pub mod parser_state;
pub mod settings;
pub mod tags;
pub mod traits;
pub mod transport;
pub mod utils;
pub mod version;


pub use error::Error;
pub use models::Appcast;
pub use parser::{parse_appcast, parse_appcast_into, ParseOutcome};
pub use version::compare_versions;

/// XML namespace of the feed's update-specific elements and attributes.
pub const SPARKLE_NAMESPACE: &str = "http://www.andymatuschak.org/xml-namespaces/sparkle";
