use crate::models::Appcast;

/// Transient state for one parse pass.
///
/// The nesting counters behave as flags in well-formed documents, but stay
/// integers so duplicate or re-entrant tags cannot underflow them; all
/// decrements clamp at zero.
#[derive(Default)]
pub struct ParserState {
    pub in_channel: u32,
    pub in_item: u32,
    pub in_release_notes: u32,
    pub in_title: u32,
    pub in_description: u32,

    /// Descriptor being filled in.
    pub appcast: Appcast,

    /// Version of the most recently accepted enclosure. Seeded by the
    /// caller, updated whenever an enclosure with a version is accepted.
    pub last_seen_version: Option<String>,
}
